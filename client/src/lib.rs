//! # quickthumb-web
//!
//! Leptos + WASM single-page app for QuickThumb.
//!
//! Pages, components and browser glue live here. State machines, wire types
//! and the backend contract come from the core `quickthumb` crate; this crate
//! supplies a `fetch`-based implementation of that contract and renders the
//! state.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod util;

/// WASM entry point: install panic and log hooks, then mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("logger already installed");
    }
    leptos::mount::mount_to_body(app::App);
}
