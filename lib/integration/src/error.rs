//! Error types for the integration crate.
//!
//! Errors are designed for layered context using rootcause. Server code
//! converts them to the portal's user-facing taxonomy with
//! [`ConnectorError::to_portal_error`].

use integrations_portal_core::PortalError;
use std::fmt;

/// Errors from talking to the backend service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectorError {
    /// The connector could not be constructed.
    Configuration { reason: String },
    /// The request failed before a response arrived.
    Request { endpoint: String, reason: String },
    /// The backend answered with a non-success status.
    Backend {
        endpoint: String,
        status: u16,
        detail: Option<String>,
    },
    /// The response body could not be interpreted.
    Decode { endpoint: String, reason: String },
}

impl fmt::Display for ConnectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration { reason } => {
                write!(f, "connector configuration error: {reason}")
            }
            Self::Request { endpoint, reason } => {
                write!(f, "request to '{endpoint}' failed: {reason}")
            }
            Self::Backend {
                endpoint,
                status,
                detail,
            } => match detail {
                Some(detail) => write!(f, "'{endpoint}' returned {status}: {detail}"),
                None => write!(f, "'{endpoint}' returned {status}"),
            },
            Self::Decode { endpoint, reason } => {
                write!(f, "invalid response from '{endpoint}': {reason}")
            }
        }
    }
}

impl std::error::Error for ConnectorError {}

impl ConnectorError {
    /// Converts to the failure shown to the user.
    ///
    /// Only a backend-supplied detail is passed through; everything else
    /// is reported without internals.
    #[must_use]
    pub fn to_portal_error(&self) -> PortalError {
        match self {
            Self::Backend { detail, .. } => PortalError::BackendError {
                detail: detail.clone(),
            },
            Self::Decode { .. } => PortalError::BackendError { detail: None },
            Self::Configuration { reason } | Self::Request { reason, .. } => {
                PortalError::NetworkFailure {
                    reason: reason.clone(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_display() {
        let err = ConnectorError::Backend {
            endpoint: "/integrations/hubspot/credentials".to_string(),
            status: 400,
            detail: Some("No credentials found.".to_string()),
        };
        assert!(err.to_string().contains("400"));
        assert!(err.to_string().contains("No credentials found."));
    }

    #[test]
    fn backend_detail_reaches_the_user() {
        let err = ConnectorError::Backend {
            endpoint: "/integrations/notion/load".to_string(),
            status: 400,
            detail: Some("Invalid credentials".to_string()),
        };
        assert_eq!(
            err.to_portal_error(),
            PortalError::BackendError {
                detail: Some("Invalid credentials".to_string())
            }
        );
    }

    #[test]
    fn transport_failure_is_a_network_failure() {
        let err = ConnectorError::Request {
            endpoint: "/integrations/notion/load".to_string(),
            reason: "connection refused".to_string(),
        };
        assert!(matches!(
            err.to_portal_error(),
            PortalError::NetworkFailure { .. }
        ));
    }

    #[test]
    fn decode_failure_hides_internals() {
        let err = ConnectorError::Decode {
            endpoint: "/integrations/airtable/authorize".to_string(),
            reason: "expected a string".to_string(),
        };
        assert_eq!(
            err.to_portal_error(),
            PortalError::BackendError { detail: None }
        );
    }
}
