// web_app/api/query_client.rs - Session-scoped query client
//
// One QueryClient is created per app session and handed to the views. It owns
// the transport and the caches: table pages keyed by (page, search), the
// infinite list stored under a single key, and the page requests of that list
// while they are in flight. Cloning is cheap (shared Rc).

use std::rc::Rc;
use std::sync::Arc;

use futures::future::{self, LocalBoxFuture};
use chrono::Duration;
use futures::FutureExt;
use uuid::Uuid;

use crate::web_app::config::ClientConfig;
use crate::web_app::model::{FeedKey, FeedPageKey, PageResponse, TableKey};

use super::cache::{CacheOptions, Clock, QueryCache, SystemClock};
use super::client::{PageRequest, ProductSource};
use super::error::FetchError;

/// Pages accumulated by the infinite list, in cursor order
pub type FeedPages = Vec<Arc<PageResponse>>;

struct ClientInner {
    session: Uuid,
    config: ClientConfig,
    source: Rc<dyn ProductSource>,
    pages: QueryCache<TableKey, PageResponse>,
    feed: QueryCache<FeedKey, FeedPages>,
    feed_requests: QueryCache<FeedPageKey, PageResponse>,
}

#[derive(Clone)]
pub struct QueryClient {
    inner: Rc<ClientInner>,
}

impl QueryClient {
    pub fn new(config: ClientConfig, source: Rc<dyn ProductSource>) -> Self {
        Self::with_clock(config, source, Rc::new(SystemClock))
    }

    pub fn with_clock(config: ClientConfig, source: Rc<dyn ProductSource>, clock: Rc<dyn Clock>) -> Self {
        let session = Uuid::new_v4();
        let pages = QueryCache::new(
            "products",
            CacheOptions {
                stale_time: config.table_stale_time,
                gc_time: config.gc_time,
                retry: config.retry,
            },
            Rc::clone(&clock),
        );
        let feed = QueryCache::new(
            "products-infinite",
            CacheOptions {
                stale_time: config.scroll_stale_time,
                gc_time: config.gc_time,
                retry: config.retry,
            },
            Rc::clone(&clock),
        );
        // Zero freshness: a finished page is never served from here, only a
        // request still in flight is shared
        let feed_requests = QueryCache::new(
            "products-infinite-requests",
            CacheOptions {
                stale_time: Duration::zero(),
                gc_time: config.gc_time,
                retry: config.retry,
            },
            clock,
        );

        tracing::info!(%session, api_base = %config.api_base, "Query client session started");

        Self {
            inner: Rc::new(ClientInner {
                session,
                config,
                source,
                pages,
                feed,
                feed_requests,
            }),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.inner.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn pages(&self) -> &QueryCache<TableKey, PageResponse> {
        &self.inner.pages
    }

    pub fn feed(&self) -> &QueryCache<FeedKey, FeedPages> {
        &self.inner.feed
    }

    /// One table page, through the (page, search) cache
    pub fn fetch_table_page(&self, key: TableKey) -> LocalBoxFuture<'static, Result<Arc<PageResponse>, FetchError>> {
        let request = match PageRequest::new(key.page, self.inner.config.table_page_size, Some(key.search.as_str())) {
            Ok(request) => request,
            Err(e) => return future::ready(Err(e)).boxed_local(),
        };
        let source = Rc::clone(&self.inner.source);
        self.inner.pages.fetch(key, move || source.fetch_page(&request))
    }

    /// One page of the infinite list.
    ///
    /// A second call for a page that is still in flight joins that request,
    /// also from a feed created after the first one was dropped. Finished
    /// pages are not served from here; the feed keeps them under [`FeedKey`].
    pub fn fetch_feed_page(&self, page: u32) -> LocalBoxFuture<'static, Result<Arc<PageResponse>, FetchError>> {
        let request = match PageRequest::new(page, self.inner.config.scroll_page_size, None) {
            Ok(request) => request,
            Err(e) => return future::ready(Err(e)).boxed_local(),
        };
        let source = Rc::clone(&self.inner.source);
        self.inner
            .feed_requests
            .fetch(FeedPageKey { page }, move || source.fetch_page(&request))
    }

    /// Tear down the session: every cached page is dropped
    pub fn end_session(&self) {
        self.inner.pages.clear();
        self.inner.feed.clear();
        self.inner.feed_requests.clear();
        tracing::info!(session = %self.inner.session, "Query client session ended");
    }
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClient")
            .field("session", &self.inner.session)
            .field("cached_pages", &self.inner.pages.len())
            .finish()
    }
}
