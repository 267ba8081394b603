//! Helper functions for server functions.

use crate::error::IntegrationError;
use integrations_portal_core::Identity;
use integrations_portal_integration::Connector;
use leptos::prelude::*;
use std::sync::Arc;

/// Gets the backend connector from the request context.
pub fn get_connector() -> Arc<dyn Connector> {
    expect_context::<Arc<dyn Connector>>()
}

/// Builds an identity, rejecting blank fields.
pub fn require_identity(user_id: String, org_id: String) -> Result<Identity, IntegrationError> {
    let identity = Identity::new(user_id, org_id);
    match identity.missing_field() {
        Some(field) => {
            tracing::debug!(field, "Identity field missing");
            Err(IntegrationError::MissingField { field })
        }
        None => Ok(identity),
    }
}
