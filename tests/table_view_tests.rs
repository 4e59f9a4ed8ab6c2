// tests/table_view_tests.rs
//
// TableStore behavior: superseded loads, search resets, empty results and
// error handling, driven through the fixtures instead of a live backend.

mod common;

use std::rc::Rc;

use anyhow::Result;
use chrono::Duration;
use futures::poll;
use product_listing::fixtures::{Catalog, CountingSource, GatedSource, ManualClock};
use product_listing::web_app::api::FetchError;
use product_listing::web_app::columns::Column;
use product_listing::web_app::model::TableKey;
use product_listing::web_app::state::{LoadStatus, TableStore};

use common::{client_over, client_with_clock, counting, gated, ids, scripted};

#[tokio::test]
async fn test_late_result_for_old_page_is_discarded() -> Result<()> {
    let source = gated(50);
    let store = TableStore::new(client_over(source.clone()));

    let mut first = store.load();
    assert!(poll!(&mut first).is_pending());

    assert!(store.set_page(2));
    let mut second = store.load();
    assert!(poll!(&mut second).is_pending());

    // Page 2 answers first, then the stale page 1 response arrives
    assert!(source.release(2, None));
    assert!(second.await);
    assert!(source.release(1, None));
    assert!(!first.await);

    let state = store.snapshot();
    assert_eq!(state.key, TableKey::new(2, ""));
    assert_eq!(state.status, LoadStatus::Loaded);
    assert_eq!(ids(&state.rows()), (11..=20).collect::<Vec<_>>());
    Ok(())
}

#[tokio::test]
async fn test_early_result_for_old_page_is_discarded() -> Result<()> {
    let source = gated(50);
    let store = TableStore::new(client_over(source.clone()));

    let mut first = store.load();
    assert!(poll!(&mut first).is_pending());
    store.set_page(3);
    let mut second = store.load();
    assert!(poll!(&mut second).is_pending());

    // Page 1 arrives while page 3 is current: nothing is shown for it
    assert!(source.release(1, None));
    assert!(!first.await);
    let state = store.snapshot();
    assert_eq!(state.status, LoadStatus::Loading);
    assert!(state.page.is_none());

    assert!(source.release(3, None));
    assert!(second.await);
    assert_eq!(ids(&store.snapshot().rows()), (21..=30).collect::<Vec<_>>());
    Ok(())
}

#[tokio::test]
async fn test_search_resets_to_first_page() -> Result<()> {
    let store = TableStore::new(client_over(counting(50)));
    store.load().await;
    store.set_page(4);
    store.load().await;
    assert_eq!(store.key().page, 4);

    assert!(store.set_search("amber"));
    assert_eq!(store.key(), TableKey::new(1, "amber"));
    assert!(!store.set_search("amber"));
    Ok(())
}

#[tokio::test]
async fn test_next_and_previous_stay_in_range() -> Result<()> {
    let store = TableStore::new(client_over(counting(25)));
    store.load().await;
    assert_eq!(store.snapshot().total_pages(), 3);

    assert!(store.next_page());
    assert!(store.next_page());
    assert!(!store.next_page());
    assert_eq!(store.key().page, 3);

    store.load().await;
    assert_eq!(store.snapshot().rows().len(), 5);

    assert!(store.previous_page());
    assert_eq!(store.key().page, 2);
    Ok(())
}

#[tokio::test]
async fn test_no_results_disables_both_controls() -> Result<()> {
    let store = TableStore::new(client_over(counting(20)));
    store.set_search("no product is called this");
    store.load().await;

    let state = store.snapshot();
    assert_eq!(state.status, LoadStatus::Loaded);
    assert!(state.rows().is_empty());

    let pagination = state.pagination();
    assert_eq!(pagination.total_pages, 0);
    assert!(pagination.items.is_empty());
    assert!(!pagination.can_previous);
    assert!(!pagination.can_next);
    assert!(!store.next_page());
    Ok(())
}

#[tokio::test]
async fn test_failure_after_retry_shows_error() -> Result<()> {
    let source = scripted(30);
    source.inner().fail_next(FetchError::Status { status: 500 });
    source.inner().fail_next(FetchError::Status { status: 500 });
    let store = TableStore::new(client_over(source.clone()));

    assert!(store.load().await);
    let state = store.snapshot();
    assert!(state.is_error());
    assert_eq!(state.error, Some(FetchError::Status { status: 500 }));
    assert_eq!(source.calls(), 2);

    assert!(store.retry().await);
    let state = store.snapshot();
    assert_eq!(state.status, LoadStatus::Loaded);
    assert_eq!(state.error, None);
    assert_eq!(source.calls(), 3);
    Ok(())
}

#[tokio::test]
async fn test_sort_does_not_refetch() -> Result<()> {
    let source = counting(30);
    let store = TableStore::new(client_over(source.clone()));
    store.load().await;

    store.toggle_sort(Column::Name);
    store.toggle_sort(Column::Name);
    let names: Vec<String> = store.snapshot().rows().into_iter().map(|p| p.name.to_lowercase()).collect();
    let mut expected = names.clone();
    expected.sort();
    expected.reverse();

    assert_eq!(names, expected);
    assert_eq!(source.calls(), 1);
    Ok(())
}

#[tokio::test]
async fn test_stale_page_stays_visible_while_reloading() -> Result<()> {
    let source = Rc::new(GatedSource::new(Catalog::seeded(30, common::SEED)));
    let clock = Rc::new(ManualClock::default());
    let store = TableStore::new(client_with_clock(source.clone(), clock.clone()));

    let mut first = store.load();
    assert!(poll!(&mut first).is_pending());
    source.release(1, None);
    first.await;

    clock.advance(Duration::seconds(45));
    let mut reload = store.load();
    assert!(poll!(&mut reload).is_pending());

    let state = store.snapshot();
    assert_eq!(state.status, LoadStatus::Loading);
    assert!(!state.is_loading());
    assert_eq!(state.rows().len(), 10);

    source.release(1, None);
    assert!(reload.await);
    Ok(())
}

#[tokio::test]
async fn test_unmounted_store_ignores_arrivals() -> Result<()> {
    let source = Rc::new(CountingSource::new(GatedSource::new(Catalog::seeded(30, 1))));
    let store = TableStore::new(client_over(source.clone()));
    let seen = Rc::new(std::cell::Cell::new(0));
    let s = seen.clone();
    store.subscribe(move |_| s.set(s.get() + 1));

    let mut pending = store.load();
    assert!(poll!(&mut pending).is_pending());
    let before = seen.get();
    store.dispose();

    source.inner().release(1, None);
    assert!(!pending.await);
    assert_eq!(seen.get(), before);
    assert_eq!(source.calls(), 1);
    Ok(())
}
