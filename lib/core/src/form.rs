//! State held by the integration form.
//!
//! The form owns the identity fields, the selected provider, and the
//! credential write-back slot. Children receive what they need from here
//! and report back through [`IntegrationForm::store_credentials`].

use crate::credential::{CredentialBundle, Identity, IntegrationParams};
use crate::provider::Provider;

/// Default user identifier shown in the form.
pub const DEFAULT_USER_ID: &str = "TestUser";

/// Default organization identifier shown in the form.
pub const DEFAULT_ORG_ID: &str = "TestOrg";

/// Which parts of the form are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStage {
    /// No provider selected; only the inputs are shown.
    Empty,
    /// A provider is selected and its credential widget is shown.
    TypeSelected(Provider),
    /// Credentials were acquired; the data panel is shown too.
    CredentialsAcquired(Provider),
}

/// The integration form's state.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationForm {
    pub identity: Identity,
    selected: Option<Provider>,
    params: IntegrationParams,
}

impl Default for IntegrationForm {
    fn default() -> Self {
        Self {
            identity: Identity::new(DEFAULT_USER_ID, DEFAULT_ORG_ID),
            selected: None,
            params: IntegrationParams::default(),
        }
    }
}

impl IntegrationForm {
    /// Returns the selected provider.
    #[must_use]
    pub fn selected(&self) -> Option<Provider> {
        self.selected
    }

    /// Returns the credential write-back slot.
    #[must_use]
    pub fn params(&self) -> &IntegrationParams {
        &self.params
    }

    /// Changes the selected provider.
    ///
    /// Any acquired or in-progress credentials are discarded, even when the
    /// same provider is picked again.
    pub fn select(&mut self, provider: Option<Provider>) {
        self.selected = provider;
        self.params.clear();
    }

    /// Stores a bundle produced by a credential widget.
    ///
    /// Returns `false` and leaves the form unchanged when the bundle was
    /// issued for a provider that is no longer selected.
    pub fn store_credentials(&mut self, bundle: CredentialBundle) -> bool {
        if self.selected != Some(bundle.provider) {
            return false;
        }
        self.params.store(bundle);
        true
    }

    /// Returns the current stage.
    #[must_use]
    pub fn stage(&self) -> FormStage {
        match (self.selected, self.params.bundle()) {
            (None, _) => FormStage::Empty,
            (Some(provider), None) => FormStage::TypeSelected(provider),
            (Some(provider), Some(_)) => FormStage::CredentialsAcquired(provider),
        }
    }
}
