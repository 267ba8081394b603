//! Integrations page.
//!
//! Collects the user and organization identifiers, lets the user pick a
//! provider, and reveals the connect widget and items panel as each
//! stage of the form is reached.

mod connect;
mod data;
mod server;

pub use connect::ConnectIntegration;
pub use data::ItemsPanel;
pub use server::*;

use integrations_portal_core::{CredentialBundle, Identity, IntegrationForm, Provider};
use leptos::prelude::*;

/// Integrations page component.
#[component]
pub fn IntegrationsPage() -> impl IntoView {
    let form = RwSignal::new(IntegrationForm::default());

    // Memos so that typing in the identity fields does not re-create the
    // widget or the panel.
    let selected = Memo::new(move |_| form.with(IntegrationForm::selected));
    let bundle = Memo::new(move |_| form.with(|f| f.params().bundle().cloned()));
    let identity = Signal::derive(move || form.with(|f| f.identity.clone()));

    let on_credentials = Callback::new(move |bundle: CredentialBundle| {
        let provider = bundle.provider;
        let mut stored = false;
        form.update(|f| stored = f.store_credentials(bundle));
        if !stored {
            leptos::logging::warn!("ignoring {provider} credentials for a deselected provider");
        }
    });

    view! {
        <div class="integrations-page">
            <h1>"Integrations Portal"</h1>

            <section class="integration-form">
                <div class="form-group">
                    <label for="user-id">"User ID"</label>
                    <input
                        id="user-id"
                        type="text"
                        prop:value=move || form.with(|f| f.identity.user_id.clone())
                        on:input=move |ev| form.update(|f| f.identity.user_id = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="org-id">"Organization ID"</label>
                    <input
                        id="org-id"
                        type="text"
                        prop:value=move || form.with(|f| f.identity.org_id.clone())
                        on:input=move |ev| form.update(|f| f.identity.org_id = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="integration-type">"Integration Type"</label>
                    <select
                        id="integration-type"
                        prop:value=move || selected.get().map(Provider::display_name).unwrap_or_default()
                        on:change=move |ev| {
                            let provider = event_target_value(&ev).parse::<Provider>().ok();
                            form.update(|f| f.select(provider));
                        }
                    >
                        <option value="">"Select an integration"</option>
                        {Provider::ALL
                            .into_iter()
                            .map(|provider| {
                                view! {
                                    <option value=provider.display_name()>{provider.display_name()}</option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>
            </section>

            {move || {
                selected.get().map(|provider| view! {
                    <IntegrationSection provider identity bundle on_credentials/>
                })
            }}

            {move || {
                bundle.get().map(|bundle| view! {
                    <section class="data-section">
                        <h2>"Data Fetching"</h2>
                        <ItemsPanel bundle/>
                    </section>
                })
            }}
        </div>
    }
}

/// Connect widget section for the selected provider.
#[component]
fn IntegrationSection(
    provider: Provider,
    identity: Signal<Identity>,
    bundle: Memo<Option<CredentialBundle>>,
    on_credentials: Callback<CredentialBundle>,
) -> impl IntoView {
    let connected = Signal::derive(move || {
        bundle.with(|b| b.as_ref().is_some_and(|b| b.provider == provider))
    });

    view! {
        <section class="integration-section">
            <h2>{format!("{provider} Integration")}</h2>
            <ConnectIntegration provider identity connected on_credentials/>
        </section>
    }
}
