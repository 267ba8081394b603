//! Connector trait and related types.
//!
//! Every provider is driven through the same [`Connector`] interface. The
//! provider is a value, not a type: implementations dispatch on
//! [`Provider`] rather than callers picking per-provider code.

use crate::error::ConnectorError;
use async_trait::async_trait;
use integrations_portal_core::{CredentialBundle, FetchResult, Identity, Provider};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A started authorization: where to send the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    pub provider: Provider,
    /// Third-party consent URL to open in the authorization window.
    pub url: String,
}

/// Trait for the backend service.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Starts third-party authorization for `identity`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the request or does not
    /// return an authorization URL.
    async fn begin_authorization(
        &self,
        provider: Provider,
        identity: &Identity,
    ) -> Result<AuthorizationRequest, ConnectorError>;

    /// Retrieves the credentials issued by a finished authorization.
    ///
    /// The value is opaque; callers decide whether it counts as present.
    async fn extract_credentials(
        &self,
        provider: Provider,
        identity: &Identity,
    ) -> Result<JsonValue, ConnectorError>;

    /// Lists the items reachable with `bundle`.
    async fn load_items(&self, bundle: &CredentialBundle) -> Result<FetchResult, ConnectorError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    /// Connector that answers from fixed values.
    struct StaticConnector;

    #[async_trait]
    impl Connector for StaticConnector {
        async fn begin_authorization(
            &self,
            provider: Provider,
            _identity: &Identity,
        ) -> Result<AuthorizationRequest, ConnectorError> {
            Ok(AuthorizationRequest {
                provider,
                url: format!("https://example.com/{}", provider.slug()),
            })
        }

        async fn extract_credentials(
            &self,
            _provider: Provider,
            _identity: &Identity,
        ) -> Result<JsonValue, ConnectorError> {
            Ok(json!({"access_token": "tok"}))
        }

        async fn load_items(
            &self,
            _bundle: &CredentialBundle,
        ) -> Result<FetchResult, ConnectorError> {
            Ok(FetchResult::from_value(json!([{"id": "1", "type": "Page"}])))
        }
    }

    #[tokio::test]
    async fn connector_drives_every_provider_through_one_interface() {
        let connector: Arc<dyn Connector> = Arc::new(StaticConnector);
        let identity = Identity::new("TestUser", "TestOrg");

        for provider in Provider::ALL {
            let request = connector
                .begin_authorization(provider, &identity)
                .await
                .expect("starts");
            assert_eq!(request.provider, provider);

            let value = connector
                .extract_credentials(provider, &identity)
                .await
                .expect("credentials");
            let bundle = CredentialBundle::new(provider, value).expect("present");

            let result = connector.load_items(&bundle).await.expect("loads");
            assert!(matches!(result, FetchResult::List(ref items) if items.len() == 1));
        }
    }
}
