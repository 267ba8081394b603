//! Connect button for a single provider.
//!
//! Clicking the button asks the server for a consent URL, opens it in a
//! popup, and polls the popup until the user closes it. The credentials
//! are then requested once and handed to the parent.

use super::server::{authorize_integration, fetch_integration_credentials};
use crate::error::portal_error;
use integrations_portal_core::{AuthorizationFlow, CredentialBundle, Identity, Provider};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// How often the authorization window is checked.
#[cfg(feature = "hydrate")]
const POLL_INTERVAL: std::time::Duration = std::time::Duration::from_millis(200);

/// Connect button and inline error for `provider`.
#[component]
pub fn ConnectIntegration(
    provider: Provider,
    identity: Signal<Identity>,
    connected: Signal<bool>,
    on_credentials: Callback<CredentialBundle>,
) -> impl IntoView {
    let flow = RwSignal::new(AuthorizationFlow::new(provider));

    let on_connect = move |_| {
        let identity = identity.get_untracked();
        let mut started = false;
        flow.update(|f| started = f.begin_authorization(&identity));
        if !started {
            return;
        }

        spawn_local(async move {
            let url = match authorize_integration(
                provider,
                identity.user_id.clone(),
                identity.org_id.clone(),
            )
            .await
            {
                Ok(url) => url,
                Err(e) => {
                    leptos::logging::error!("{provider} authorization failed: {e}");
                    flow.try_update(|f| f.fail(&portal_error(&e)));
                    return;
                }
            };

            // The selection may have changed while the URL was in flight.
            if flow.try_update(AuthorizationFlow::window_opened) != Some(true) {
                return;
            }

            match popup::open(provider, &url) {
                Ok(window) => popup::watch(window, flow, identity, on_credentials),
                Err(err) => {
                    leptos::logging::error!("{err}");
                    flow.try_update(|f| f.fail(&err));
                }
            }
        });
    };

    view! {
        <div class="connect-integration">
            <button
                class="primary-btn"
                class:connected=move || connected.get()
                disabled=move || connected.get() || flow.with(AuthorizationFlow::is_busy)
                on:click=on_connect
            >
                {move || flow.with(|f| f.button_label(connected.get()))}
            </button>
            {move || {
                flow.with(|f| f.error().map(str::to_string))
                    .map(|message| view! { <p class="error-message">{message}</p> })
            }}
        </div>
    }
}

/// Exchanges a finished authorization for credentials.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
async fn exchange_credentials(
    flow: RwSignal<AuthorizationFlow>,
    identity: Identity,
    on_credentials: Callback<CredentialBundle>,
) {
    let Some(provider) = flow.try_with_untracked(AuthorizationFlow::provider) else {
        return;
    };
    let outcome = fetch_integration_credentials(provider, identity.user_id, identity.org_id)
        .await
        .map_err(|e| {
            leptos::logging::error!("{provider} credential exchange failed: {e}");
            portal_error(&e)
        });

    let mut bundle = None;
    flow.try_update(|f| bundle = f.extract_credentials(outcome));
    if let Some(bundle) = bundle {
        on_credentials.run(bundle);
    }
}

#[cfg(feature = "hydrate")]
mod popup {
    use super::{POLL_INTERVAL, exchange_credentials};
    use integrations_portal_core::{
        AuthorizationFlow, AuthorizationWindow, CredentialBundle, Identity, PortalError, Provider,
    };
    use leptos::prelude::*;
    use leptos::task::spawn_local;
    use std::cell::Cell;
    use std::rc::Rc;

    /// A browser window opened for third-party consent.
    pub struct PopupWindow(web_sys::Window);

    impl AuthorizationWindow for PopupWindow {
        fn is_closed(&self) -> bool {
            // A window we can no longer inspect is as good as gone.
            self.0.closed().unwrap_or(true)
        }
    }

    impl PopupWindow {
        /// Closes a window whose attempt was discarded.
        fn close(&self) {
            if let Err(e) = self.0.close() {
                leptos::logging::error!("failed to close authorization window: {e:?}");
            }
        }
    }

    /// Opens `url` in a named, fixed-size popup.
    pub fn open(provider: Provider, url: &str) -> Result<PopupWindow, PortalError> {
        let blocked = || PortalError::AuthorizationFailure {
            provider,
            detail: Some(format!("Could not open the {provider} authorization window")),
        };
        let window = web_sys::window().ok_or_else(blocked)?;
        window
            .open_with_url_and_target_and_features(
                url,
                &format!("{provider} Authorization"),
                "width=600, height=600",
            )
            .ok()
            .flatten()
            .map(PopupWindow)
            .ok_or_else(blocked)
    }

    /// Polls `window` until it closes, then exchanges credentials once.
    pub fn watch(
        window: PopupWindow,
        flow: RwSignal<AuthorizationFlow>,
        identity: Identity,
        on_credentials: Callback<CredentialBundle>,
    ) {
        let handle: Rc<Cell<Option<IntervalHandle>>> = Rc::new(Cell::new(None));
        let stop = {
            let handle = Rc::clone(&handle);
            move || {
                if let Some(handle) = handle.take() {
                    handle.clear();
                }
            }
        };

        let tick = {
            let stop = stop.clone();
            move || {
                // None means the component is gone.
                match flow.try_with_untracked(AuthorizationFlow::is_awaiting_window) {
                    Some(true) => {}
                    Some(false) => {
                        stop();
                        return;
                    }
                    None => {
                        stop();
                        window.close();
                        return;
                    }
                }
                if !window.is_closed() {
                    return;
                }
                if flow.try_update(|f| f.is_complete(&window)) == Some(true) {
                    stop();
                    spawn_local(exchange_credentials(flow, identity.clone(), on_credentials));
                }
            }
        };

        match set_interval_with_handle(tick, POLL_INTERVAL) {
            Ok(interval) => handle.set(Some(interval)),
            Err(e) => {
                leptos::logging::error!("failed to watch authorization window: {e:?}");
                let provider = flow.with_untracked(AuthorizationFlow::provider);
                flow.try_update(|f| {
                    f.fail(&PortalError::AuthorizationFailure {
                        provider,
                        detail: None,
                    })
                });
            }
        }
    }
}

#[cfg(not(feature = "hydrate"))]
mod popup {
    use integrations_portal_core::{
        AuthorizationFlow, AuthorizationWindow, CredentialBundle, Identity, PortalError, Provider,
    };
    use leptos::prelude::*;

    /// Server renders never open windows.
    pub struct PopupWindow;

    impl AuthorizationWindow for PopupWindow {
        fn is_closed(&self) -> bool {
            true
        }
    }

    pub fn open(provider: Provider, _url: &str) -> Result<PopupWindow, PortalError> {
        Err(PortalError::AuthorizationFailure {
            provider,
            detail: None,
        })
    }

    pub fn watch(
        _window: PopupWindow,
        _flow: RwSignal<AuthorizationFlow>,
        _identity: Identity,
        _on_credentials: Callback<CredentialBundle>,
    ) {
    }
}
