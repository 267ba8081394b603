//! Credential acquisition flow driven by the credential widget.
//!
//! The widget asks the backend for an authorization URL, opens it in a
//! separate window, waits for that window to close, and then asks the
//! backend for the credentials the third party issued:
//!
//! ```text
//! Idle -> Authorizing -> AwaitingWindow -> Exchanging -> Connected
//!              \               \                \
//!               +---------------+----------------+--> Failed
//! ```
//!
//! Failures are terminal for the attempt only; the user retries manually.

use crate::credential::{CredentialBundle, Identity};
use crate::error::{AUTHORIZATION_FALLBACK_MESSAGE, PortalError};
use crate::provider::Provider;
use serde_json::Value as JsonValue;

/// The window the user completes the third-party consent screen in.
pub trait AuthorizationWindow {
    /// Whether the user (or the backend's callback page) closed the window.
    fn is_closed(&self) -> bool;
}

/// Where an authorization attempt currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationPhase {
    Idle,
    /// Waiting for the backend to return the authorization URL.
    Authorizing,
    /// The authorization window is open.
    AwaitingWindow,
    /// The window closed; waiting for the backend to hand over credentials.
    Exchanging,
    Connected,
    Failed { message: String },
}

/// One provider's authorization attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationFlow {
    provider: Provider,
    phase: AuthorizationPhase,
}

impl AuthorizationFlow {
    /// Creates an idle flow for `provider`.
    #[must_use]
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            phase: AuthorizationPhase::Idle,
        }
    }

    #[must_use]
    pub fn provider(&self) -> Provider {
        self.provider
    }

    #[must_use]
    pub fn phase(&self) -> &AuthorizationPhase {
        &self.phase
    }

    /// Whether an attempt is in progress.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            AuthorizationPhase::Authorizing
                | AuthorizationPhase::AwaitingWindow
                | AuthorizationPhase::Exchanging
        )
    }

    /// Returns the inline error message of a failed attempt.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            AuthorizationPhase::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Label for the connect button.
    ///
    /// `connected` reflects whether the form currently holds credentials
    /// from this provider.
    #[must_use]
    pub fn button_label(&self, connected: bool) -> String {
        if connected {
            format!("{} Connected", self.provider)
        } else if self.is_busy() {
            "Connecting...".to_string()
        } else {
            format!("Connect to {}", self.provider)
        }
    }

    /// Starts an attempt for `identity`.
    ///
    /// Returns `false` when an attempt is already running, the provider is
    /// already connected, or an identity field is blank (which fails the
    /// attempt with a message naming the field).
    pub fn begin_authorization(&mut self, identity: &Identity) -> bool {
        if self.is_busy() || self.phase == AuthorizationPhase::Connected {
            return false;
        }
        if let Some(field) = identity.missing_field() {
            self.phase = AuthorizationPhase::Failed {
                message: format!("{field} is required"),
            };
            return false;
        }
        self.phase = AuthorizationPhase::Authorizing;
        true
    }

    /// Moves the attempt on to waiting for the authorization window.
    ///
    /// Call before opening the window. Returns `false` when the attempt is
    /// no longer authorizing, in which case no window may be opened.
    pub fn window_opened(&mut self) -> bool {
        if self.phase != AuthorizationPhase::Authorizing {
            return false;
        }
        self.phase = AuthorizationPhase::AwaitingWindow;
        true
    }

    /// Whether the attempt is waiting for the authorization window to close.
    #[must_use]
    pub fn is_awaiting_window(&self) -> bool {
        self.phase == AuthorizationPhase::AwaitingWindow
    }

    /// Polls the authorization window.
    ///
    /// Returns `true` exactly once, on the poll that first observes the
    /// window closed; the flow then waits for [`Self::extract_credentials`].
    pub fn is_complete(&mut self, window: &dyn AuthorizationWindow) -> bool {
        if self.phase == AuthorizationPhase::AwaitingWindow && window.is_closed() {
            self.phase = AuthorizationPhase::Exchanging;
            return true;
        }
        false
    }

    /// Consumes the backend's credentials response.
    ///
    /// A present value connects the flow and yields the bundle to write
    /// back. An absent value returns the flow to idle without a bundle.
    pub fn extract_credentials(
        &mut self,
        outcome: Result<JsonValue, PortalError>,
    ) -> Option<CredentialBundle> {
        if self.phase != AuthorizationPhase::Exchanging {
            return None;
        }
        match outcome {
            Ok(value) => match CredentialBundle::new(self.provider, value) {
                Some(bundle) => {
                    self.phase = AuthorizationPhase::Connected;
                    Some(bundle)
                }
                None => {
                    self.phase = AuthorizationPhase::Idle;
                    None
                }
            },
            Err(err) => {
                self.fail(&err);
                None
            }
        }
    }

    /// Fails the current attempt.
    pub fn fail(&mut self, err: &PortalError) {
        self.phase = AuthorizationPhase::Failed {
            message: err.user_message(AUTHORIZATION_FALLBACK_MESSAGE),
        };
    }
}
