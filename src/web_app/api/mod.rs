// web_app/api/mod.rs - Data fetching layer
//
// - client: the paged fetch contract and its HTTP transport
// - cache: per-key query cache (freshness window, in-flight dedup, retry)
// - query_client: the session object that ties transport and caches together

pub mod cache;
pub mod client;
pub mod error;
pub mod query_client;

pub use cache::{CacheOptions, Clock, QueryCache, SystemClock};
pub use client::{HttpProductSource, PageRequest, ProductSource};
pub use error::FetchError;
pub use query_client::{FeedPages, QueryClient};
