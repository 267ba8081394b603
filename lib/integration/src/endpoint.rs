//! Backend URL conventions.
//!
//! Every provider is served under `/integrations/{slug}`. Item listing is
//! the one irregular route: Hubspot exposes it as `get_hubspot_items`
//! while the others use `load`. The irregularity is absorbed here so
//! callers only ever name an [`Endpoint`].

use integrations_portal_core::Provider;

/// A backend operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Starts third-party authorization and returns the consent URL.
    Authorize,
    /// Hands over the credentials obtained by a finished authorization.
    Credentials,
    /// Lists the items reachable with a credential bundle.
    LoadItems,
}

/// Resolves backend URLs for each provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoints {
    base_url: String,
}

impl ProviderEndpoints {
    /// Creates a resolver rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the path of `endpoint` for `provider`.
    #[must_use]
    pub fn path(provider: Provider, endpoint: Endpoint) -> String {
        let action = match (provider, endpoint) {
            (_, Endpoint::Authorize) => "authorize",
            (_, Endpoint::Credentials) => "credentials",
            (Provider::Hubspot, Endpoint::LoadItems) => "get_hubspot_items",
            (Provider::Notion | Provider::Airtable, Endpoint::LoadItems) => "load",
        };
        format!("/integrations/{}/{action}", provider.slug())
    }

    /// Returns the absolute URL of `endpoint` for `provider`.
    #[must_use]
    pub fn url(&self, provider: Provider, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, Self::path(provider, endpoint))
    }
}
