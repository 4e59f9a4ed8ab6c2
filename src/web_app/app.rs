// web_app/app.rs - Root application component
//
// Sets up routing and the session QueryClient. The client is created once per
// app session, handed to the views through context, and its caches are
// dropped when the app is torn down.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::web_app::api::{HttpProductSource, QueryClient};
use crate::web_app::config::ClientConfig;
use crate::web_app::pages::{ScrollView, TableView};

/// Context handle for the session query client.
///
/// The client is single-threaded (`Rc` inside), so it lives in local storage.
pub type SessionClient = StoredValue<QueryClient, LocalStorage>;

/// Register `client` as the session client of the current owner
pub fn provide_query_client(client: QueryClient) -> SessionClient {
    let session = StoredValue::new_local(client);
    provide_context(session);
    session
}

/// The session client provided by `App` (or by a test harness)
pub fn use_query_client() -> QueryClient {
    expect_context::<SessionClient>().get_value()
}

/// Configuration of this session.
///
/// While rendering on the server it is the configuration provided through
/// context; in the browser it is read back from the settings meta tag the
/// server wrote. Anything else falls back to the defaults.
pub fn use_client_config() -> ClientConfig {
    use_context::<ClientConfig>()
        .or_else(config_from_document)
        .unwrap_or_default()
}

#[cfg(feature = "hydrate")]
fn config_from_document() -> Option<ClientConfig> {
    use crate::web_app::config::{ClientSettings, SETTINGS_META_NAME};

    let selector = format!("meta[name=\"{}\"]", SETTINGS_META_NAME);
    let content = document()
        .query_selector(&selector)
        .ok()
        .flatten()?
        .get_attribute("content")?;
    let settings: ClientSettings = serde_json::from_str(&content)
        .map_err(|e| tracing::warn!("Ignoring malformed client settings: {}", e))
        .ok()?;
    ClientConfig::default()
        .with_settings(settings)
        .map_err(|e| tracing::warn!("Ignoring invalid client settings: {}", e))
        .ok()
}

#[cfg(not(feature = "hydrate"))]
fn config_from_document() -> Option<ClientConfig> {
    None
}

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide meta context for <Title>, <Meta>, etc.
    provide_meta_context();

    let config = use_client_config();
    let source = Rc::new(HttpProductSource::new(config.api_base.clone()));
    let session = provide_query_client(QueryClient::new(config, source));

    on_cleanup(move || {
        session.try_with_value(|client| client.end_session());
    });

    view! {
        <Title text="Product Listing" />
        <Meta name="description" content="Browse products as a paginated table or an infinite grid" />
        <Meta name="viewport" content="width=device-width, initial-scale=1" />

        <Stylesheet id="leptos" href="/pkg/product_listing.css" />

        <Router>
            <div class="min-h-screen bg-gradient-to-br from-blue-50 to-indigo-100">
                <nav class="container mx-auto max-w-7xl px-4 pt-6 flex gap-4 text-sm font-medium">
                    <A href="/">"Table"</A>
                    <A href="/scroll">"Infinite scroll"</A>
                </nav>
                <main>
                    <Routes fallback=|| view! { <NotFound /> }>
                        <Route path=path!("/") view=TableView />
                        <Route path=path!("/scroll") view=ScrollView />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="min-h-[60vh] flex items-center justify-center">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-gray-300 mb-4">"404"</h1>
                <p class="text-xl text-gray-600 mb-8">"Page not found"</p>
                <a
                    href="/"
                    class="px-6 py-3 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700 transition-colors"
                >
                    "Back to products"
                </a>
            </div>
        </div>
    }
}
