// web_app/state/table.rs - State behind the paginated table view
//
// The store owns the current (page, search) key, the sort order and the last
// response for that key. Every load takes a ticket carrying the key it was
// issued for; a completion whose key no longer matches (the user moved on) or
// that arrives after the view is gone is dropped.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;

use crate::web_app::api::{FetchError, QueryClient};
use crate::web_app::columns::{next_sort, sort_products, Column, SortState};
use crate::web_app::model::{PageResponse, Product, TableKey};
use crate::web_app::pagination::{total_pages, PaginationModel};

use super::observable::{Observers, SubscriptionId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableState {
    pub key: TableKey,
    pub page_size: u32,
    pub status: LoadStatus,
    /// Response for `key`; while reloading this may be an older cached copy
    pub page: Option<Arc<PageResponse>>,
    pub error: Option<FetchError>,
    pub sort: Option<SortState>,
    /// Total reported for the current search, once any page of it arrived
    pub known_total: Option<u64>,
}

impl TableState {
    fn new(page_size: u32) -> Self {
        Self {
            key: TableKey::default(),
            page_size,
            status: LoadStatus::Idle,
            page: None,
            error: None,
            sort: None,
            known_total: None,
        }
    }

    pub fn total(&self) -> u64 {
        self.page.as_ref().map(|p| p.total).unwrap_or(0)
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total(), self.page_size)
    }

    pub fn pagination(&self) -> PaginationModel {
        PaginationModel::new(self.key.page, self.total(), self.page_size)
    }

    /// Rows of the current page in display order
    pub fn rows(&self) -> Vec<Product> {
        let mut rows = self
            .page
            .as_ref()
            .map(|p| p.data.clone())
            .unwrap_or_default();
        sort_products(&mut rows, self.sort);
        rows
    }

    /// Nothing to show yet: not loaded or loading without a cached copy
    pub fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Idle | LoadStatus::Loading) && self.page.is_none()
    }

    pub fn is_error(&self) -> bool {
        self.status == LoadStatus::Failed
    }
}

/// Proof that a load was started for `key`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    key: TableKey,
}

impl LoadTicket {
    pub fn key(&self) -> &TableKey {
        &self.key
    }
}

struct TableInner {
    client: QueryClient,
    state: RefCell<TableState>,
    observers: Observers<TableState>,
    disposed: Cell<bool>,
}

#[derive(Clone)]
pub struct TableStore {
    inner: Rc<TableInner>,
}

impl TableStore {
    pub fn new(client: QueryClient) -> Self {
        let page_size = client.config().table_page_size;
        Self {
            inner: Rc::new(TableInner {
                client,
                state: RefCell::new(TableState::new(page_size)),
                observers: Observers::new(),
                disposed: Cell::new(false),
            }),
        }
    }

    pub fn snapshot(&self) -> TableState {
        self.inner.state.borrow().clone()
    }

    pub fn key(&self) -> TableKey {
        self.inner.state.borrow().key.clone()
    }

    pub fn subscribe(&self, callback: impl Fn(&TableState) + 'static) -> SubscriptionId {
        self.inner.observers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.observers.unsubscribe(id)
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        self.inner.observers.notify(&snapshot);
    }

    /// Move to `page`, clamped into the known page range.
    ///
    /// Returns true when the key changed and a load is due.
    pub fn set_page(&self, page: u32) -> bool {
        {
            let mut state = self.inner.state.borrow_mut();
            let mut page = page.max(1);
            if let Some(total) = state.known_total {
                page = page.min(total_pages(total, state.page_size).max(1));
            }
            if page == state.key.page {
                return false;
            }
            state.key.page = page;
        }
        self.notify();
        true
    }

    pub fn next_page(&self) -> bool {
        let current = self.inner.state.borrow().key.page;
        self.set_page(current.saturating_add(1))
    }

    pub fn previous_page(&self) -> bool {
        let current = self.inner.state.borrow().key.page;
        self.set_page(current.saturating_sub(1))
    }

    /// Change the search text; a new search always starts on page 1
    pub fn set_search(&self, search: &str) -> bool {
        {
            let mut state = self.inner.state.borrow_mut();
            if state.key.search == search {
                return false;
            }
            state.key = TableKey::new(1, search);
            state.known_total = None;
        }
        self.notify();
        true
    }

    pub fn toggle_sort(&self, column: Column) {
        {
            let mut state = self.inner.state.borrow_mut();
            state.sort = next_sort(state.sort, column);
        }
        self.notify();
    }

    /// Enter the loading state for the current key
    pub fn begin_load(&self) -> LoadTicket {
        let ticket = {
            let mut state = self.inner.state.borrow_mut();
            state.status = LoadStatus::Loading;
            state.error = None;
            let cached = self.inner.client.pages().peek(&state.key);
            state.page = cached;
            LoadTicket {
                key: state.key.clone(),
            }
        };
        self.notify();
        ticket
    }

    /// Apply the outcome of a load. Returns false when it was discarded.
    pub fn complete(&self, ticket: LoadTicket, result: Result<Arc<PageResponse>, FetchError>) -> bool {
        if self.inner.disposed.get() {
            tracing::debug!("Dropping result for {}: table view is gone", ticket.key);
            return false;
        }
        {
            let mut state = self.inner.state.borrow_mut();
            if state.key != ticket.key {
                tracing::warn!(
                    "Discarding superseded result for {} (current key is {})",
                    ticket.key,
                    state.key
                );
                return false;
            }
            match result {
                Ok(page) => {
                    state.known_total = Some(page.total);
                    state.page = Some(page);
                    state.status = LoadStatus::Loaded;
                }
                Err(e) => {
                    tracing::error!("Failed to load {}: {}", ticket.key, e);
                    state.error = Some(e);
                    state.status = LoadStatus::Failed;
                }
            }
        }
        self.notify();
        true
    }

    /// Fetch the current key through the session cache.
    ///
    /// Resolves to whether the result was applied.
    pub fn load(&self) -> LocalBoxFuture<'static, bool> {
        if self.inner.disposed.get() {
            return future::ready(false).boxed_local();
        }
        let ticket = self.begin_load();
        let request = self.inner.client.fetch_table_page(ticket.key.clone());
        let store = self.clone();
        async move {
            let result = request.await;
            store.complete(ticket, result)
        }
        .boxed_local()
    }

    pub fn retry(&self) -> LocalBoxFuture<'static, bool> {
        self.load()
    }

    /// Stop applying results and drop all subscribers
    pub fn dispose(&self) {
        self.inner.disposed.set(true);
        self.inner.observers.clear();
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }
}
