//! Error handling foundation for the integrations portal.
//!
//! Provides the `Result` alias using rootcause and the user-facing
//! failure taxonomy shared by the credential widget and the data panel.
//! Lower layers keep their own error enums and convert into
//! [`PortalError`] at the component boundary.

use crate::provider::Provider;
use rootcause::Report;
use std::fmt;

/// A Result type alias using rootcause's Report for error handling.
///
/// Each layer adds its own context via `.context()` as errors propagate.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

/// Generic message shown when a data load fails without a backend detail.
pub const LOAD_FALLBACK_MESSAGE: &str = "Error loading data";

/// Generic message shown when authorization fails without a backend detail.
pub const AUTHORIZATION_FALLBACK_MESSAGE: &str = "Authorization failed";

/// Failures surfaced inline by the portal components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortalError {
    /// The third-party authorization flow could not be started or finished.
    AuthorizationFailure {
        provider: Provider,
        detail: Option<String>,
    },
    /// The request never produced a usable response.
    NetworkFailure { reason: String },
    /// The backend answered with an error.
    BackendError { detail: Option<String> },
}

impl PortalError {
    /// Returns the message to display, falling back to `fallback` when the
    /// failure carries no human-readable detail.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::AuthorizationFailure {
                detail: Some(detail),
                ..
            }
            | Self::BackendError {
                detail: Some(detail),
            } => detail.clone(),
            Self::AuthorizationFailure { detail: None, .. }
            | Self::BackendError { detail: None }
            | Self::NetworkFailure { .. } => fallback.to_string(),
        }
    }
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuthorizationFailure { provider, detail } => match detail {
                Some(detail) => write!(f, "{provider} authorization failed: {detail}"),
                None => write!(f, "{provider} authorization failed"),
            },
            Self::NetworkFailure { reason } => write!(f, "network failure: {reason}"),
            Self::BackendError { detail } => match detail {
                Some(detail) => write!(f, "backend error: {detail}"),
                None => write!(f, "backend error"),
            },
        }
    }
}

impl std::error::Error for PortalError {}

/// Extracts the `detail` string from a backend error body.
///
/// Returns `None` for bodies that are not JSON objects or whose `detail`
/// is missing, empty, or not a string (validation errors carry a list).
#[must_use]
pub fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(serde_json::Value::as_str)
        .filter(|detail| !detail.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_type_works() {
        let ok: Result<i32> = Ok(42);
        assert_eq!(ok.expect("should be ok"), 42);
    }

    #[test]
    fn backend_detail_is_shown_verbatim() {
        let err = PortalError::BackendError {
            detail: Some("Invalid HubSpot credentials".to_string()),
        };
        assert_eq!(
            err.user_message(LOAD_FALLBACK_MESSAGE),
            "Invalid HubSpot credentials"
        );
    }

    #[test]
    fn missing_detail_uses_fallback() {
        let err = PortalError::BackendError { detail: None };
        assert_eq!(err.user_message(LOAD_FALLBACK_MESSAGE), "Error loading data");

        let err = PortalError::NetworkFailure {
            reason: "connection refused".to_string(),
        };
        assert_eq!(err.user_message(LOAD_FALLBACK_MESSAGE), "Error loading data");
    }

    #[test]
    fn authorization_failure_display_names_provider() {
        let err = PortalError::AuthorizationFailure {
            provider: Provider::Notion,
            detail: None,
        };
        assert_eq!(err.to_string(), "Notion authorization failed");
        assert_eq!(
            err.user_message(AUTHORIZATION_FALLBACK_MESSAGE),
            "Authorization failed"
        );
    }

    #[test]
    fn extract_detail_reads_string_field() {
        assert_eq!(
            extract_detail(r#"{"detail": "No credentials found."}"#),
            Some("No credentials found.".to_string())
        );
    }

    #[test]
    fn extract_detail_ignores_other_shapes() {
        assert_eq!(extract_detail("Internal Server Error"), None);
        assert_eq!(extract_detail(r#"{"message": "nope"}"#), None);
        assert_eq!(extract_detail(r#"{"detail": ""}"#), None);
        assert_eq!(
            extract_detail(r#"{"detail": [{"loc": ["body", "credentials"], "msg": "field required"}]}"#),
            None
        );
        assert_eq!(extract_detail(r#"["detail"]"#), None);
    }
}
