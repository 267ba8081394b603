//! Error types crossing the server function boundary.
//!
//! Server functions log the full error and hand the browser only a
//! user-safe message. The browser turns that message back into a
//! [`PortalError`] so components share one display rule.

use integrations_portal_core::PortalError;
use leptos::server_fn::error::ServerFnError;

#[cfg(feature = "ssr")]
pub use server::IntegrationError;

/// Recovers a [`PortalError`] from a server function failure.
///
/// Messages produced by [`IntegrationError::into_server_error`] arrive as
/// `ServerError` and are shown verbatim. Anything else (transport or
/// decoding failures) carries no user-facing detail.
pub fn portal_error(err: &ServerFnError) -> PortalError {
    match err {
        ServerFnError::ServerError(message) if !message.trim().is_empty() => {
            PortalError::BackendError {
                detail: Some(message.clone()),
            }
        }
        other => PortalError::NetworkFailure {
            reason: other.to_string(),
        },
    }
}

#[cfg(feature = "ssr")]
mod server {
    use integrations_portal_core::error::{
        AUTHORIZATION_FALLBACK_MESSAGE, LOAD_FALLBACK_MESSAGE,
    };
    use integrations_portal_core::{PortalError, Provider};
    use integrations_portal_integration::ConnectorError;
    use leptos::server_fn::error::ServerFnError;
    use std::fmt;

    /// Integration-related errors.
    #[derive(Debug)]
    pub enum IntegrationError {
        /// A required identity field was blank.
        MissingField { field: &'static str },
        /// The credentials sent for an item load were not valid JSON.
        InvalidCredentials { details: String },
        /// The credentials sent for an item load were empty.
        NoCredentials { provider: Provider },
        /// Starting or finishing authorization failed.
        Authorization {
            provider: Provider,
            source: ConnectorError,
        },
        /// Listing items failed.
        Load {
            provider: Provider,
            source: ConnectorError,
        },
    }

    impl fmt::Display for IntegrationError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::MissingField { field } => write!(f, "{field} is required"),
                Self::InvalidCredentials { details } => {
                    write!(f, "invalid credentials: {details}")
                }
                Self::NoCredentials { provider } => {
                    write!(f, "no credentials supplied for {provider}")
                }
                Self::Authorization { provider, source } => {
                    write!(f, "{provider} authorization failed: {source}")
                }
                Self::Load { provider, source } => {
                    write!(f, "loading {provider} items failed: {source}")
                }
            }
        }
    }

    impl std::error::Error for IntegrationError {}

    impl IntegrationError {
        /// Convert to a user-safe ServerFnError.
        ///
        /// Backend detail messages pass through; everything else collapses
        /// to the generic message for the operation.
        pub fn into_server_error(self) -> ServerFnError {
            match self {
                Self::MissingField { field } => ServerFnError::new(format!("{field} is required")),
                Self::InvalidCredentials { .. } => ServerFnError::new("Invalid credentials"),
                Self::NoCredentials { .. } => ServerFnError::new("No credentials provided"),
                Self::Authorization { provider, source } => {
                    let detail = match source.to_portal_error() {
                        PortalError::BackendError { detail } => detail,
                        _ => None,
                    };
                    let err = PortalError::AuthorizationFailure { provider, detail };
                    ServerFnError::new(err.user_message(AUTHORIZATION_FALLBACK_MESSAGE))
                }
                Self::Load { source, .. } => ServerFnError::new(
                    source.to_portal_error().user_message(LOAD_FALLBACK_MESSAGE),
                ),
            }
        }
    }
}
