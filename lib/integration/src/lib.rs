//! Backend boundary for the integrations portal.
//!
//! This crate provides:
//!
//! - **Connector trait**: the one capability interface every provider is
//!   driven through
//! - **Provider endpoints**: the backend's URL conventions, normalized per
//!   provider
//! - **HTTP connector**: the reqwest implementation talking to the backend

pub mod connector;
pub mod endpoint;
pub mod error;
pub mod http;

pub use connector::{AuthorizationRequest, Connector};
pub use endpoint::{Endpoint, ProviderEndpoints};
pub use error::ConnectorError;
pub use http::HttpConnector;
