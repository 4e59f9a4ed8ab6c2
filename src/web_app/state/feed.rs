// web_app/state/feed.rs - State behind the infinite-scroll view
//
//   Idle ──mount──▶ Loading ──ok──▶ Loaded ──more──▶ Loading ...
//                      │               └── last page ──▶ Exhausted
//                      └──err──▶ Failed ──retry──▶ Loading (same cursor)
//
// Pages are appended in cursor order and never replaced. The accumulated
// pages are written back to the session cache under the feed key, so coming
// back to the view within the freshness window restores the list without a
// request.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;

use crate::web_app::api::{FeedPages, FetchError, QueryClient};
use crate::web_app::model::{FeedKey, PageResponse, Product};

use super::observable::{Observers, SubscriptionId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedStatus {
    Idle,
    Loading,
    Loaded,
    Exhausted,
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeedState {
    pub pages: FeedPages,
    /// Next page to request; `None` once every product has been loaded
    pub next_page: Option<u32>,
    pub status: FeedStatus,
    pub error: Option<FetchError>,
    pub page_size: u32,
}

impl FeedState {
    fn new(page_size: u32) -> Self {
        Self {
            pages: Vec::new(),
            next_page: Some(1),
            status: FeedStatus::Idle,
            error: None,
            page_size,
        }
    }

    fn restored(pages: FeedPages, page_size: u32) -> Self {
        let loaded = u32::try_from(pages.len()).unwrap_or(u32::MAX);
        let next_page = match pages.last() {
            Some(last) => next_page_after(loaded, page_size, last.total),
            None => Some(1),
        };
        let status = match (pages.is_empty(), next_page) {
            (true, _) => FeedStatus::Idle,
            (false, Some(_)) => FeedStatus::Loaded,
            (false, None) => FeedStatus::Exhausted,
        };
        Self {
            pages,
            next_page,
            status,
            error: None,
            page_size,
        }
    }

    /// Every product loaded so far, in page order
    pub fn products(&self) -> Vec<Product> {
        self.pages
            .iter()
            .flat_map(|page| page.data.iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pages.iter().map(|page| page.data.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_next_page(&self) -> bool {
        self.next_page.is_some()
    }

    pub fn is_initial_loading(&self) -> bool {
        matches!(self.status, FeedStatus::Idle | FeedStatus::Loading) && self.pages.is_empty()
    }

    pub fn is_fetching_next_page(&self) -> bool {
        self.status == FeedStatus::Loading && !self.pages.is_empty()
    }
}

/// Cursor after `page`: there is more to fetch while `page * page_size < total`
pub fn next_page_after(page: u32, page_size: u32, total: u64) -> Option<u32> {
    (u64::from(page) * u64::from(page_size) < total).then(|| page + 1)
}

/// Whether the bottom of the viewport is within `threshold` pixels of the
/// end of the document
pub fn near_bottom(scroll_y: f64, viewport_height: f64, document_height: f64, threshold: f64) -> bool {
    scroll_y + viewport_height >= document_height - threshold
}

struct FeedInner {
    client: QueryClient,
    state: RefCell<FeedState>,
    observers: Observers<FeedState>,
    disposed: Cell<bool>,
}

#[derive(Clone)]
pub struct InfiniteFeed {
    inner: Rc<FeedInner>,
}

impl InfiniteFeed {
    /// A feed for this session, picking up cached pages that are still fresh
    pub fn new(client: QueryClient) -> Self {
        let page_size = client.config().scroll_page_size;
        let state = match client.feed().get_fresh(&FeedKey) {
            Some(pages) => {
                tracing::debug!("{}: restoring {} cached pages", FeedKey, pages.len());
                FeedState::restored(pages.as_ref().clone(), page_size)
            }
            None => FeedState::new(page_size),
        };
        Self {
            inner: Rc::new(FeedInner {
                client,
                state: RefCell::new(state),
                observers: Observers::new(),
                disposed: Cell::new(false),
            }),
        }
    }

    pub fn snapshot(&self) -> FeedState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self, callback: impl Fn(&FeedState) + 'static) -> SubscriptionId {
        self.inner.observers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.observers.unsubscribe(id)
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        self.inner.observers.notify(&snapshot);
    }

    /// First page, unless the feed already holds pages
    pub fn mount(&self) -> LocalBoxFuture<'static, bool> {
        if self.inner.state.borrow().status != FeedStatus::Idle {
            return future::ready(false).boxed_local();
        }
        self.fetch_next_page()
    }

    /// Request the page at the cursor.
    ///
    /// Inert (resolves to false) while a page is in flight, once the feed is
    /// exhausted, or after dispose.
    pub fn fetch_next_page(&self) -> LocalBoxFuture<'static, bool> {
        if self.inner.disposed.get() {
            return future::ready(false).boxed_local();
        }
        let cursor = {
            let mut state = self.inner.state.borrow_mut();
            let cursor = match (state.status, state.next_page) {
                (FeedStatus::Loading, _) | (_, None) => None,
                (_, Some(cursor)) => Some(cursor),
            };
            if cursor.is_some() {
                state.status = FeedStatus::Loading;
                state.error = None;
            }
            cursor
        };
        let Some(cursor) = cursor else {
            return future::ready(false).boxed_local();
        };
        self.notify();

        tracing::info!("{}: requesting page {}", FeedKey, cursor);
        let request = self.inner.client.fetch_feed_page(cursor);
        let feed = self.clone();
        async move {
            let result = request.await;
            feed.complete_page(cursor, result)
        }
        .boxed_local()
    }

    /// A failed page is requested again from the same cursor
    pub fn retry(&self) -> LocalBoxFuture<'static, bool> {
        self.fetch_next_page()
    }

    fn complete_page(&self, cursor: u32, result: Result<Arc<PageResponse>, FetchError>) -> bool {
        if self.inner.disposed.get() {
            tracing::debug!("{}: dropping page {}, view is gone", FeedKey, cursor);
            return false;
        }
        {
            let mut state = self.inner.state.borrow_mut();
            if state.next_page != Some(cursor) {
                tracing::warn!("{}: discarding page {} for a moved cursor", FeedKey, cursor);
                return false;
            }
            match result {
                Ok(page) => {
                    let next_page = next_page_after(cursor, state.page_size, page.total);
                    state.pages.push(page);
                    state.next_page = next_page;
                    state.status = match next_page {
                        Some(_) => FeedStatus::Loaded,
                        None => FeedStatus::Exhausted,
                    };
                    self.inner.client.feed().set(FeedKey, state.pages.clone());
                    if next_page.is_none() {
                        tracing::info!("{}: all {} products loaded", FeedKey, state.len());
                    }
                }
                Err(e) => {
                    tracing::error!("{}: page {} failed: {}", FeedKey, cursor, e);
                    state.error = Some(e);
                    state.status = FeedStatus::Failed;
                }
            }
        }
        self.notify();
        true
    }

    pub fn dispose(&self) {
        self.inner.disposed.set(true);
        self.inner.observers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_page_after() {
        assert_eq!(next_page_after(1, 20, 45), Some(2));
        assert_eq!(next_page_after(2, 20, 45), Some(3));
        assert_eq!(next_page_after(3, 20, 45), None);
        assert_eq!(next_page_after(2, 20, 40), None);
        assert_eq!(next_page_after(1, 20, 0), None);
    }

    #[test]
    fn test_near_bottom() {
        assert!(near_bottom(1300.0, 800.0, 2300.0, 300.0));
        assert!(near_bottom(1200.0, 800.0, 2300.0, 300.0));
        assert!(!near_bottom(1199.0, 800.0, 2300.0, 300.0));
    }

    #[test]
    fn test_restored_state() {
        let page = |n: u32| {
            Arc::new(PageResponse {
                data: Vec::new(),
                total: 45,
                page: n,
                limit: None,
            })
        };

        let partial = FeedState::restored(vec![page(1)], 20);
        assert_eq!(partial.next_page, Some(2));
        assert_eq!(partial.status, FeedStatus::Loaded);

        let full = FeedState::restored(vec![page(1), page(2), page(3)], 20);
        assert_eq!(full.next_page, None);
        assert_eq!(full.status, FeedStatus::Exhausted);

        let empty = FeedState::restored(Vec::new(), 20);
        assert_eq!(empty.next_page, Some(1));
        assert_eq!(empty.status, FeedStatus::Idle);
    }
}
