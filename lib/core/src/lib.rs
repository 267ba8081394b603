//! Core domain types for the integrations portal.
//!
//! This crate holds everything the browser and the server share: the
//! provider catalogue, credential bundles, fetched items, and the state
//! machines behind the form, the credential widget, and the data panel.
//! Nothing in here performs I/O.

pub mod authorization;
pub mod credential;
pub mod error;
pub mod form;
pub mod item;
pub mod panel;
pub mod provider;

pub use authorization::{AuthorizationFlow, AuthorizationPhase, AuthorizationWindow};
pub use credential::{CredentialBundle, Identity, IntegrationParams};
pub use error::{PortalError, Result, extract_detail};
pub use form::{FormStage, IntegrationForm};
pub use item::{FetchResult, Item, ItemCard, ResultView};
pub use panel::{DataPanel, LoadTicket};
pub use provider::{ParseProviderError, Provider};
