//! Load/clear panel for one credential bundle.

use super::server::load_integration_items;
use crate::error::portal_error;
use integrations_portal_core::{CredentialBundle, DataPanel, FetchResult, ItemCard, ResultView};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Loads and displays the items reachable with `bundle`.
///
/// The parent re-creates this component whenever the bundle changes, so
/// results from one credential never show under another.
#[component]
pub fn ItemsPanel(bundle: CredentialBundle) -> impl IntoView {
    let panel = RwSignal::new(DataPanel::default());
    let provider = bundle.provider;
    let credentials = bundle.credentials_json();

    let on_load = move |_| {
        let mut ticket = None;
        panel.update(|p| ticket = p.begin_load());
        let Some(ticket) = ticket else {
            return;
        };

        let credentials = credentials.clone();
        spawn_local(async move {
            let outcome = load_integration_items(provider, credentials)
                .await
                .map_err(|e| {
                    leptos::logging::error!("loading {provider} items failed: {e}");
                    portal_error(&e)
                });
            panel.try_update(|p| p.finish_load(ticket, outcome));
        });
    };

    let on_clear = move |_| panel.update(DataPanel::clear);

    view! {
        <div class="items-panel">
            <div class="panel-actions">
                <button
                    class="primary-btn"
                    disabled=move || panel.with(DataPanel::is_loading)
                    on:click=on_load
                >
                    {move || if panel.with(DataPanel::is_loading) { "Loading..." } else { "Load Data" }}
                </button>
                <button class="secondary-btn" on:click=on_clear>
                    "Clear Data"
                </button>
            </div>
            {move || {
                panel.with(|p| p.error().map(str::to_string))
                    .map(|message| view! { <div class="alert alert-error">{message}</div> })
            }}
            {move || panel.with(|p| p.result().cloned()).map(|result| view! { <ResultDisplay result/> })}
        </div>
    }
}

/// Renders a fetch result as cards or as pretty-printed JSON.
#[component]
fn ResultDisplay(result: FetchResult) -> impl IntoView {
    let body = match result.view() {
        ResultView::Cards(cards) => view! {
            <div class="item-list">
                {cards.into_iter().map(|card| view! { <ItemCardView card/> }).collect_view()}
            </div>
        }
        .into_any(),
        ResultView::Text(text) => view! {
            <textarea class="raw-result" rows="12" readonly prop:value=text></textarea>
        }
        .into_any(),
    };

    view! {
        <div class="result">
            <h3>{result.heading()}</h3>
            {body}
        </div>
    }
}

#[component]
fn ItemCardView(card: ItemCard) -> impl IntoView {
    view! {
        <div class="item-card">
            <h4>{card.title}</h4>
            <p>"ID: " {card.id}</p>
            <p>"Type: " {card.item_type}</p>
            {card.parent_id.map(|id| view! { <p>"Parent ID: " {id}</p> })}
            {card.created.map(|at| view! { <p>"Created: " {at}</p> })}
            {card.modified.map(|at| view! { <p>"Modified: " {at}</p> })}
        </div>
    }
}
