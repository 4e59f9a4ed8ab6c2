// web_app/mod.rs - Root module for the Leptos web application
//
// Architecture:
// - model/: Shared data types (products, page responses, query keys)
// - api/: Paged fetch contract, HTTP transport, query cache and session client
// - config.rs, pagination.rs, columns.rs: Plain logic behind the views
// - state/: View state stores (table, infinite feed)
// - components/: Reusable UI components (both SSR and hydrate)
// - pages/: Page-level components (both SSR and hydrate)
// - app.rs: Root application component with routing (both SSR and hydrate)
//
// Everything up to state/ compiles without a web feature, so it is tested
// with a plain `cargo test`.

pub mod api;
pub mod columns;
pub mod config;
pub mod model;
pub mod pagination;
pub mod state;

// Components, pages, and app are used by both server and client
#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod components;

#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod pages;

#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod app;

// Re-export main app component for convenience
#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub use app::App;
