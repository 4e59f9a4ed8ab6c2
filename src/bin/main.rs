// bin/main.rs - Product listing server
//
// Renders the table and scroll views with Leptos SSR on Actix and serves the
// hydration bundle from /pkg. Product data is fetched by the browser from
// PRODUCTS_API_URL (same origin when unset); this binary does not implement
// /api/products itself. The client configuration read from the environment is
// provided to every render and written into the page head for the browser.

#[cfg(feature = "ssr")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

#[cfg(feature = "ssr")]
fn invalid_input(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string())
}

#[cfg(feature = "ssr")]
fn shell(options: leptos_config::LeptosOptions) -> impl leptos::prelude::IntoView {
    use leptos::prelude::*;
    use leptos_meta::MetaTags;
    use product_listing::web_app::app::use_client_config;
    use product_listing::web_app::config::SETTINGS_META_NAME;
    use product_listing::web_app::App;

    let settings = serde_json::to_string(&use_client_config().settings())
        .map_err(|e| tracing::warn!("Client settings not written to the page: {}", e))
        .ok();

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                {settings.map(|json| view! { <meta name=SETTINGS_META_NAME content=json/> })}
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[cfg(feature = "ssr")]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    use actix_files::Files;
    use actix_web::{web, App, HttpServer};
    use leptos::prelude::provide_context;
    use leptos_actix::{generate_route_list, LeptosRoutes};
    use product_listing::web_app::config::ClientConfig;

    dotenv::dotenv().ok();
    init_tracing();

    let client = ClientConfig::from_env().map_err(invalid_input)?;
    tracing::info!(
        api_base = if client.api_base.is_empty() { "same origin" } else { client.api_base.as_str() },
        table_page_size = client.table_page_size,
        scroll_page_size = client.scroll_page_size,
        "product listing client configured"
    );

    let conf = leptos_config::get_configuration(None).map_err(invalid_input)?;
    let options = conf.leptos_options;
    let addr = options.site_addr;
    let pkg_dir = format!("{}/{}", options.site_root, options.site_pkg_dir);

    tracing::info!("Listening on http://{}", addr);

    HttpServer::new(move || {
        let routes = generate_route_list(product_listing::web_app::App);
        let options = options.clone();
        let client = client.clone();

        App::new()
            .service(Files::new("/pkg", pkg_dir.clone()))
            .leptos_routes_with_context(
                routes,
                move || provide_context(client.clone()),
                {
                    let options = options.clone();
                    move || shell(options.clone())
                },
            )
            .app_data(web::Data::new(options))
    })
    .bind(&addr)?
    .run()
    .await
}

#[cfg(not(feature = "ssr"))]
fn main() {
    panic!("The server needs the 'ssr' feature; run it with `cargo leptos watch`");
}
