//! # studyboard
//!
//! Leptos + WASM frontend for the Study App dashboard.
//!
//! The crate is organized around the auth session core: `net` holds the
//! capability seam over the hosted identity provider, `state` owns the
//! session store and its bootstrap/subscription lifecycle, and `util`
//! carries the route-gating decision applied by the protected layout
//! shell in `components`. Pages under `pages` consume the store through
//! Leptos context.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install panic/log hooks and hydrate the app shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(crate::app::App);
}
