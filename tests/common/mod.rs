// common/mod.rs - Shared test utilities
//
// Builds QueryClients over the in-memory fixtures so every suite starts from
// the same deterministic catalog.

#![allow(dead_code)]

use std::rc::Rc;

use product_listing::fixtures::{Catalog, CountingSource, GatedSource, ManualClock, ScriptedSource};
use product_listing::web_app::api::{ProductSource, QueryClient};
use product_listing::web_app::config::ClientConfig;

pub const SEED: u64 = 2024;

/// Client over `source` with the default configuration
pub fn client_over<S: ProductSource + 'static>(source: Rc<S>) -> QueryClient {
    QueryClient::new(ClientConfig::default(), source)
}

/// Client over `source` whose caches read time from `clock`
pub fn client_with_clock<S: ProductSource + 'static>(source: Rc<S>, clock: Rc<ManualClock>) -> QueryClient {
    QueryClient::with_clock(ClientConfig::default(), source, clock)
}

pub fn counting(count: usize) -> Rc<CountingSource<Catalog>> {
    Rc::new(CountingSource::new(Catalog::seeded(count, SEED)))
}

pub fn scripted(count: usize) -> Rc<CountingSource<ScriptedSource<Catalog>>> {
    Rc::new(CountingSource::new(ScriptedSource::new(Catalog::seeded(count, SEED))))
}

pub fn gated(count: usize) -> Rc<GatedSource> {
    Rc::new(GatedSource::new(Catalog::seeded(count, SEED)))
}

pub fn ids<'a>(products: impl IntoIterator<Item = &'a product_listing::web_app::model::Product>) -> Vec<i32> {
    products.into_iter().map(|p| p.id).collect()
}
