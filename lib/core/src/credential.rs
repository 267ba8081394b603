//! Credential bundles produced by the authorization flow.
//!
//! Bundles live only in component state. They are never persisted and are
//! lost when the page reloads.

use crate::provider::Provider;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// The user and organization an authorization is performed for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub org_id: String,
}

impl Identity {
    /// Creates a new identity.
    #[must_use]
    pub fn new(user_id: impl Into<String>, org_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            org_id: org_id.into(),
        }
    }

    /// Returns the label of the first blank field, if any.
    #[must_use]
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.user_id.trim().is_empty() {
            Some("User ID")
        } else if self.org_id.trim().is_empty() {
            Some("Organization ID")
        } else {
            None
        }
    }
}

/// Opaque authorization artifact tagged with the provider that issued it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialBundle {
    #[serde(rename = "type")]
    pub provider: Provider,
    pub credentials: JsonValue,
}

impl CredentialBundle {
    /// Wraps a credential value returned by the backend.
    ///
    /// Returns `None` when the value is absent (see [`is_present`]).
    #[must_use]
    pub fn new(provider: Provider, credentials: JsonValue) -> Option<Self> {
        is_present(&credentials).then_some(Self {
            provider,
            credentials,
        })
    }

    /// Serializes the credential value the way the backend expects it in
    /// the `credentials` form field.
    #[must_use]
    pub fn credentials_json(&self) -> String {
        self.credentials.to_string()
    }
}

/// Whether a credential value counts as "acquired".
///
/// `null`, `false`, and the empty string are treated as no credentials.
#[must_use]
pub fn is_present(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null | JsonValue::Bool(false) => false,
        JsonValue::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// The orchestrator's write-back slot for a credential bundle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegrationParams {
    bundle: Option<CredentialBundle>,
}

impl IntegrationParams {
    /// Returns the stored bundle.
    #[must_use]
    pub fn bundle(&self) -> Option<&CredentialBundle> {
        self.bundle.as_ref()
    }

    /// Whether no credentials are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bundle.is_none()
    }

    /// Stores a bundle, replacing any previous one.
    pub fn store(&mut self, bundle: CredentialBundle) {
        self.bundle = Some(bundle);
    }

    /// Discards the stored bundle.
    pub fn clear(&mut self) {
        self.bundle = None;
    }
}
