// lib.rs - Root module for the product_listing library
//
// The same crate builds the SSR server (feature "ssr") and the WASM bundle
// that hydrates it in the browser (feature "hydrate").

/// Deterministic product sources and clocks for tests
pub mod fixtures;
pub mod web_app;

/// WASM entry point, called by the hydration script cargo-leptos injects
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(web_app::App);
}
