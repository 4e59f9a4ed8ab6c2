// fixtures/mod.rs - Test fixtures module
//
// Reusable setup for the cache, store and component tests. Instead of a live
// /api/products backend, tests plug one of these sources into a QueryClient:
//
//   let source = Rc::new(CountingSource::new(Catalog::seeded(45, 1)));
//   let client = QueryClient::new(ClientConfig::default(), source.clone());
//
// Everything here is deterministic: the catalog comes from a fixed seed and
// time only moves through ManualClock.

pub mod catalog;
pub mod clock;
pub mod sources;

pub use catalog::{product, Catalog, CATEGORIES};
pub use clock::ManualClock;
pub use sources::{CountingSource, GatedSource, ScriptedSource};
