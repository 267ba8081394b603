//! Integrations portal web server and UI.
//!
//! This crate provides the Leptos-based web interface for connecting a
//! user's third-party accounts and browsing the items they expose.

#![allow(non_snake_case)]

pub mod app;
#[cfg(feature = "ssr")]
pub mod config;
pub mod error;
pub mod pages;
#[cfg(feature = "ssr")]
pub mod server_helpers;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
