//! Integration server functions.
//!
//! These proxy the backend for the browser: each one resolves the
//! connector from context, calls it, and maps failures to user-safe
//! messages.

use integrations_portal_core::{FetchResult, Provider};
use leptos::prelude::*;

/// Starts authorization and returns the consent URL to open.
#[server]
pub async fn authorize_integration(
    provider: Provider,
    user_id: String,
    org_id: String,
) -> Result<String, ServerFnError> {
    use crate::error::IntegrationError;
    use crate::server_helpers::{get_connector, require_identity};

    let identity = require_identity(user_id, org_id).map_err(|e| e.into_server_error())?;

    let request = get_connector()
        .begin_authorization(provider, &identity)
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e,
                provider = %provider,
                user_id = %identity.user_id,
                org_id = %identity.org_id,
                "Failed to start authorization"
            );
            IntegrationError::Authorization {
                provider,
                source: e,
            }
            .into_server_error()
        })?;

    tracing::info!(
        provider = %provider,
        user_id = %identity.user_id,
        org_id = %identity.org_id,
        "Started authorization"
    );

    Ok(request.url)
}

/// Retrieves the credentials issued by a finished authorization.
///
/// The value is returned as-is; the caller decides whether it is present.
#[server]
pub async fn fetch_integration_credentials(
    provider: Provider,
    user_id: String,
    org_id: String,
) -> Result<serde_json::Value, ServerFnError> {
    use crate::error::IntegrationError;
    use crate::server_helpers::{get_connector, require_identity};

    let identity = require_identity(user_id, org_id).map_err(|e| e.into_server_error())?;

    let value = get_connector()
        .extract_credentials(provider, &identity)
        .await
        .map_err(|e| {
            tracing::warn!(
                error = %e,
                provider = %provider,
                user_id = %identity.user_id,
                "Failed to retrieve credentials"
            );
            IntegrationError::Authorization {
                provider,
                source: e,
            }
            .into_server_error()
        })?;

    tracing::info!(
        provider = %provider,
        user_id = %identity.user_id,
        present = integrations_portal_core::credential::is_present(&value),
        "Retrieved credentials"
    );

    Ok(value)
}

/// Lists the items reachable with `credentials`.
///
/// `credentials` is the JSON text of the credential value, exactly as the
/// backend expects it in its form field.
#[server]
pub async fn load_integration_items(
    provider: Provider,
    credentials: String,
) -> Result<FetchResult, ServerFnError> {
    use crate::error::IntegrationError;
    use crate::server_helpers::get_connector;
    use integrations_portal_core::CredentialBundle;

    let value: serde_json::Value = serde_json::from_str(&credentials).map_err(|e| {
        tracing::debug!(error = %e, provider = %provider, "Credentials are not valid JSON");
        IntegrationError::InvalidCredentials {
            details: e.to_string(),
        }
        .into_server_error()
    })?;

    let bundle = CredentialBundle::new(provider, value)
        .ok_or_else(|| IntegrationError::NoCredentials { provider }.into_server_error())?;

    let result = get_connector().load_items(&bundle).await.map_err(|e| {
        tracing::error!(error = %e, provider = %provider, "Failed to load items");
        IntegrationError::Load {
            provider,
            source: e,
        }
        .into_server_error()
    })?;

    match &result {
        FetchResult::List(items) => {
            tracing::info!(provider = %provider, item_count = items.len(), "Loaded items");
        }
        FetchResult::Single(_) => {
            tracing::info!(provider = %provider, "Loaded single result");
        }
    }

    Ok(result)
}
