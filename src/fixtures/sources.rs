// fixtures/sources.rs - Product sources for exercising the cache and views
//
// - CountingSource: records every request it forwards
// - ScriptedSource: fails queued requests before answering normally
// - GatedSource: holds every request until the test releases it, so tests
//   decide the order in which responses arrive

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use futures::FutureExt;

use crate::web_app::api::{FetchError, PageRequest, ProductSource};
use crate::web_app::model::PageResponse;

use super::catalog::Catalog;

pub struct CountingSource<S> {
    inner: S,
    requests: RefCell<Vec<PageRequest>>,
}

impl<S: ProductSource> CountingSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.borrow().clone()
    }
}

impl<S: ProductSource> ProductSource for CountingSource<S> {
    fn fetch_page(&self, request: &PageRequest) -> LocalBoxFuture<'static, Result<PageResponse, FetchError>> {
        self.requests.borrow_mut().push(request.clone());
        self.inner.fetch_page(request)
    }
}

pub struct ScriptedSource<S> {
    inner: S,
    failures: RefCell<VecDeque<FetchError>>,
    calls: Cell<usize>,
}

impl<S: ProductSource> ScriptedSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            failures: RefCell::new(VecDeque::new()),
            calls: Cell::new(0),
        }
    }

    /// The next unanswered request fails with `error`
    pub fn fail_next(&self, error: FetchError) {
        self.failures.borrow_mut().push_back(error);
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl<S: ProductSource> ProductSource for ScriptedSource<S> {
    fn fetch_page(&self, request: &PageRequest) -> LocalBoxFuture<'static, Result<PageResponse, FetchError>> {
        self.calls.set(self.calls.get() + 1);
        match self.failures.borrow_mut().pop_front() {
            Some(error) => futures::future::ready(Err(error)).boxed_local(),
            None => self.inner.fetch_page(request),
        }
    }
}

type Reply = oneshot::Sender<Result<PageResponse, FetchError>>;

pub struct GatedSource {
    catalog: Catalog,
    pending: RefCell<Vec<(PageRequest, Reply)>>,
}

impl GatedSource {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            pending: RefCell::new(Vec::new()),
        }
    }

    /// Requests waiting for an answer, oldest first
    pub fn pending(&self) -> Vec<PageRequest> {
        self.pending.borrow().iter().map(|(req, _)| req.clone()).collect()
    }

    fn take(&self, page: u32, search: Option<&str>) -> Option<(PageRequest, Reply)> {
        let search = search.filter(|s| !s.is_empty());
        let mut pending = self.pending.borrow_mut();
        let index = pending
            .iter()
            .position(|(req, _)| req.page == page && req.search.as_deref() == search)?;
        Some(pending.remove(index))
    }

    /// Answer the oldest matching request from the catalog
    pub fn release(&self, page: u32, search: Option<&str>) -> bool {
        match self.take(page, search) {
            Some((request, reply)) => reply.send(Ok(self.catalog.page(&request))).is_ok(),
            None => false,
        }
    }

    /// Fail the oldest matching request
    pub fn fail(&self, page: u32, search: Option<&str>, error: FetchError) -> bool {
        match self.take(page, search) {
            Some((_, reply)) => reply.send(Err(error)).is_ok(),
            None => false,
        }
    }
}

impl ProductSource for GatedSource {
    fn fetch_page(&self, request: &PageRequest) -> LocalBoxFuture<'static, Result<PageResponse, FetchError>> {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().push((request.clone(), tx));
        async move {
            rx.await
                .unwrap_or_else(|_| Err(FetchError::Network("request was never answered".to_string())))
        }
        .boxed_local()
    }
}
