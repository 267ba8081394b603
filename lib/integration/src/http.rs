//! HTTP implementation of [`Connector`] against the backend service.
//!
//! All calls are form-encoded `POST`s. Authorization calls carry `user_id`
//! and `org_id`; item loads carry `credentials`, the JSON-serialized
//! credential value.

use crate::connector::{AuthorizationRequest, Connector};
use crate::endpoint::{Endpoint, ProviderEndpoints};
use crate::error::ConnectorError;
use async_trait::async_trait;
use integrations_portal_core::{CredentialBundle, FetchResult, Identity, Provider, extract_detail};
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Connector that talks to the backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    http: reqwest::Client,
    endpoints: ProviderEndpoints,
}

impl HttpConnector {
    /// Creates a connector for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> integrations_portal_core::Result<Self, ConnectorError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConnectorError::Configuration {
                reason: e.to_string(),
            })?;

        Ok(Self {
            http,
            endpoints: ProviderEndpoints::new(base_url),
        })
    }

    /// Returns the endpoint resolver.
    #[must_use]
    pub fn endpoints(&self) -> &ProviderEndpoints {
        &self.endpoints
    }

    /// Posts `fields` form-encoded and decodes the JSON response body.
    async fn post_form(
        &self,
        provider: Provider,
        endpoint: Endpoint,
        fields: &[(&str, &str)],
    ) -> Result<JsonValue, ConnectorError> {
        let path = ProviderEndpoints::path(provider, endpoint);
        let url = self.endpoints.url(provider, endpoint);

        let response = self
            .http
            .post(&url)
            .form(fields)
            .send()
            .await
            .map_err(|e| ConnectorError::Request {
                endpoint: path.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ConnectorError::Request {
            endpoint: path.clone(),
            reason: e.to_string(),
        })?;

        if !status.is_success() {
            let detail = extract_detail(&body);
            warn!(
                provider = %provider,
                endpoint = %path,
                status = status.as_u16(),
                detail = detail.as_deref().unwrap_or(""),
                "backend returned an error"
            );
            return Err(ConnectorError::Backend {
                endpoint: path,
                status: status.as_u16(),
                detail,
            });
        }

        if body.trim().is_empty() {
            return Ok(JsonValue::Null);
        }

        serde_json::from_str(&body).map_err(|e| ConnectorError::Decode {
            endpoint: path,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl Connector for HttpConnector {
    #[instrument(skip_all, fields(provider = %provider))]
    async fn begin_authorization(
        &self,
        provider: Provider,
        identity: &Identity,
    ) -> Result<AuthorizationRequest, ConnectorError> {
        let body = self
            .post_form(
                provider,
                Endpoint::Authorize,
                &[
                    ("user_id", identity.user_id.as_str()),
                    ("org_id", identity.org_id.as_str()),
                ],
            )
            .await?;

        match body {
            JsonValue::String(url) if !url.is_empty() => {
                debug!("authorization url issued");
                Ok(AuthorizationRequest { provider, url })
            }
            other => Err(ConnectorError::Decode {
                endpoint: ProviderEndpoints::path(provider, Endpoint::Authorize),
                reason: format!("expected an authorization URL, got {other}"),
            }),
        }
    }

    #[instrument(skip_all, fields(provider = %provider))]
    async fn extract_credentials(
        &self,
        provider: Provider,
        identity: &Identity,
    ) -> Result<JsonValue, ConnectorError> {
        self.post_form(
            provider,
            Endpoint::Credentials,
            &[
                ("user_id", identity.user_id.as_str()),
                ("org_id", identity.org_id.as_str()),
            ],
        )
        .await
    }

    #[instrument(skip_all, fields(provider = %bundle.provider))]
    async fn load_items(&self, bundle: &CredentialBundle) -> Result<FetchResult, ConnectorError> {
        let credentials = bundle.credentials_json();
        let body = self
            .post_form(
                bundle.provider,
                Endpoint::LoadItems,
                &[("credentials", credentials.as_str())],
            )
            .await?;

        let result = FetchResult::from_value(body);
        if let FetchResult::List(items) = &result {
            debug!(item_count = items.len(), "items loaded");
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn connector(server: &MockServer) -> HttpConnector {
        HttpConnector::new(server.uri(), Duration::from_secs(5)).expect("client builds")
    }

    fn identity() -> Identity {
        Identity::new("TestUser", "TestOrg")
    }

    #[tokio::test]
    async fn begin_authorization_returns_consent_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/integrations/notion/authorize"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string("user_id=TestUser&org_id=TestOrg"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!("https://api.notion.com/v1/oauth/authorize?state=abc")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let request = connector(&server)
            .begin_authorization(Provider::Notion, &identity())
            .await
            .expect("authorization starts");

        assert_eq!(request.provider, Provider::Notion);
        assert_eq!(
            request.url,
            "https://api.notion.com/v1/oauth/authorize?state=abc"
        );
    }

    #[tokio::test]
    async fn begin_authorization_rejects_non_string_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/integrations/airtable/authorize"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"url": 1})))
            .mount(&server)
            .await;

        let err = connector(&server)
            .begin_authorization(Provider::Airtable, &identity())
            .await
            .unwrap_err();

        assert!(matches!(err, ConnectorError::Decode { .. }));
    }

    #[tokio::test]
    async fn extract_credentials_returns_opaque_value() {
        let server = MockServer::start().await;
        let tokens = json!({"access_token": "abc", "refresh_token": "def", "expires_in": 1800});
        Mock::given(method("POST"))
            .and(path("/integrations/hubspot/credentials"))
            .and(body_string("user_id=TestUser&org_id=TestOrg"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tokens.clone()))
            .mount(&server)
            .await;

        let value = connector(&server)
            .extract_credentials(Provider::Hubspot, &identity())
            .await
            .expect("credentials returned");

        assert_eq!(value, tokens);
    }

    #[tokio::test]
    async fn missing_credentials_carry_backend_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/integrations/notion/credentials"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"detail": "No credentials found."})),
            )
            .mount(&server)
            .await;

        let err = connector(&server)
            .extract_credentials(Provider::Notion, &identity())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ConnectorError::Backend {
                endpoint: "/integrations/notion/credentials".to_string(),
                status: 400,
                detail: Some("No credentials found.".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn hubspot_items_load_from_irregular_route() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/integrations/hubspot/get_hubspot_items"))
            .and(body_string_contains(
                "credentials=%7B%22access_token%22%3A%22abc%22%7D",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "1", "type": "Contact", "name": "Ada Lovelace"},
                {"id": "2", "type": "Company", "name": "Analytical Engines"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let bundle = CredentialBundle::new(Provider::Hubspot, json!({"access_token": "abc"}))
            .expect("present");
        let result = connector(&server).load_items(&bundle).await.expect("loads");

        let FetchResult::List(items) = result else {
            panic!("expected a list");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].name.as_deref(), Some("Analytical Engines"));
    }

    #[tokio::test]
    async fn object_response_is_kept_whole() {
        let server = MockServer::start().await;
        let body = json!({"object": "list", "results": [], "has_more": false});
        Mock::given(method("POST"))
            .and(path("/integrations/notion/load"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let bundle = CredentialBundle::new(Provider::Notion, json!("token")).expect("present");
        let result = connector(&server).load_items(&bundle).await.expect("loads");

        assert_eq!(result, FetchResult::Single(body));
    }

    #[tokio::test]
    async fn server_error_without_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/integrations/airtable/load"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;

        let bundle = CredentialBundle::new(Provider::Airtable, json!("token")).expect("present");
        let err = connector(&server).load_items(&bundle).await.unwrap_err();

        assert!(matches!(
            err,
            ConnectorError::Backend {
                status: 500,
                detail: None,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_request_error() {
        let connector =
            HttpConnector::new("http://127.0.0.1:1", Duration::from_secs(2)).expect("client builds");
        let bundle = CredentialBundle::new(Provider::Notion, json!("token")).expect("present");

        let err = connector.load_items(&bundle).await.unwrap_err();
        assert!(matches!(err, ConnectorError::Request { .. }));
    }
}
