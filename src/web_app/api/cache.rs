// web_app/api/cache.rs - Per-key query cache
//
// Each query key owns one entry: the last successful value with the time it
// was fetched, and at most one request in flight. Callers asking for a key
// that is already being fetched join the in-flight request instead of issuing
// a new one. A value younger than `stale_time` is served without a request.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use futures::future::{self, LocalBoxFuture, Shared};
use futures::FutureExt;

use super::client::with_retry;
use super::error::FetchError;

/// Source of "now" for freshness checks
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Freshness, garbage collection and retry policy of one cache
#[derive(Clone, Debug, PartialEq)]
pub struct CacheOptions {
    pub stale_time: Duration,
    pub gc_time: Duration,
    pub retry: u32,
}

type SharedFetch<V> = Shared<LocalBoxFuture<'static, Result<Arc<V>, FetchError>>>;

struct InFlight<V> {
    /// Tells this request apart from a later one for the same key
    generation: u64,
    request: SharedFetch<V>,
}

struct Entry<V> {
    data: Option<(Arc<V>, DateTime<Utc>)>,
    in_flight: Option<InFlight<V>>,
}

impl<V> Entry<V> {
    fn empty() -> Self {
        Self {
            data: None,
            in_flight: None,
        }
    }
}

pub struct QueryCache<K, V> {
    name: &'static str,
    entries: Rc<RefCell<HashMap<K, Entry<V>>>>,
    generation: Rc<Cell<u64>>,
    options: CacheOptions,
    clock: Rc<dyn Clock>,
}

impl<K, V> Clone for QueryCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            entries: Rc::clone(&self.entries),
            generation: Rc::clone(&self.generation),
            options: self.options.clone(),
            clock: Rc::clone(&self.clock),
        }
    }
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash + Clone + Display + 'static,
    V: 'static,
{
    pub fn new(name: &'static str, options: CacheOptions, clock: Rc<dyn Clock>) -> Self {
        Self {
            name,
            entries: Rc::new(RefCell::new(HashMap::new())),
            generation: Rc::new(Cell::new(0)),
            options,
            clock,
        }
    }

    pub fn options(&self) -> &CacheOptions {
        &self.options
    }

    fn is_fresh(&self, fetched_at: DateTime<Utc>) -> bool {
        self.clock.now() - fetched_at < self.options.stale_time
    }

    /// Cached value if it is still inside the freshness window
    pub fn get_fresh(&self, key: &K) -> Option<Arc<V>> {
        let entries = self.entries.borrow();
        let (value, fetched_at) = entries.get(key)?.data.as_ref()?;
        self.is_fresh(*fetched_at).then(|| Arc::clone(value))
    }

    /// Cached value regardless of age
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        let entries = self.entries.borrow();
        entries
            .get(key)
            .and_then(|entry| entry.data.as_ref())
            .map(|(value, _)| Arc::clone(value))
    }

    /// Store a value as freshly fetched
    pub fn set(&self, key: K, value: V) -> Arc<V> {
        let value = Arc::new(value);
        let now = self.clock.now();
        let mut entries = self.entries.borrow_mut();
        entries.entry(key).or_insert_with(Entry::empty).data = Some((Arc::clone(&value), now));
        value
    }

    pub fn is_fetching(&self, key: &K) -> bool {
        self.entries
            .borrow()
            .get(key)
            .is_some_and(|entry| entry.in_flight.is_some())
    }

    /// Drop the cached value of `key`; a request in flight is left alone
    pub fn invalidate(&self, key: &K) {
        if let Some(entry) = self.entries.borrow_mut().get_mut(key) {
            entry.data = None;
        }
    }

    /// Drop everything. Requests still in flight will not write back.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evict entries idle for longer than `gc_time`
    pub fn collect_garbage(&self) -> usize {
        let now = self.clock.now();
        let gc_time = self.options.gc_time;
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|_, entry| {
            entry.in_flight.is_some()
                || entry
                    .data
                    .as_ref()
                    .is_some_and(|(_, fetched_at)| now - *fetched_at < gc_time)
        });
        let evicted = before - entries.len();
        if evicted > 0 {
            tracing::debug!("{}: evicted {} idle entries", self.name, evicted);
        }
        evicted
    }

    /// Fresh value, the in-flight request for `key`, or a new request.
    ///
    /// `fetcher` is called once per attempt; a failure is retried
    /// `options.retry` times before the error is returned.
    pub fn fetch<F, Fut>(&self, key: K, fetcher: F) -> LocalBoxFuture<'static, Result<Arc<V>, FetchError>>
    where
        F: FnMut() -> Fut + 'static,
        Fut: Future<Output = Result<V, FetchError>> + 'static,
    {
        self.collect_garbage();

        let now = self.clock.now();
        let mut entries = self.entries.borrow_mut();
        let entry = entries.entry(key.clone()).or_insert_with(Entry::empty);

        if let Some((value, fetched_at)) = &entry.data {
            if now - *fetched_at < self.options.stale_time {
                tracing::debug!("{}: cache hit for {}", self.name, key);
                return future::ready(Ok(Arc::clone(value))).boxed_local();
            }
        }

        if let Some(pending) = &entry.in_flight {
            tracing::debug!("{}: joining request in flight for {}", self.name, key);
            return pending.request.clone().boxed_local();
        }

        tracing::debug!("{}: cache miss for {}", self.name, key);
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        let request = {
            let entries = Rc::clone(&self.entries);
            let clock = Rc::clone(&self.clock);
            let retries = self.options.retry;
            let name = self.name;
            let key = key.clone();
            async move {
                let result = with_retry(retries, fetcher).await.map(Arc::new);
                let mut entries = entries.borrow_mut();
                let current = entries.get_mut(&key).filter(|entry| {
                    entry
                        .in_flight
                        .as_ref()
                        .is_some_and(|pending| pending.generation == generation)
                });
                match current {
                    Some(entry) => {
                        entry.in_flight = None;
                        if let Ok(value) = &result {
                            entry.data = Some((Arc::clone(value), clock.now()));
                        }
                    }
                    None => tracing::debug!("{}: {} was cleared while in flight", name, key),
                }
                if let Err(e) = &result {
                    tracing::error!("{}: request for {} failed: {}", name, key, e);
                }
                result
            }
            .boxed_local()
            .shared()
        };

        entry.in_flight = Some(InFlight {
            generation,
            request: request.clone(),
        });
        drop(entries);
        request.boxed_local()
    }
}
