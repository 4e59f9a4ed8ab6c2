// tests/scroll_view_tests.rs
//
// InfiniteFeed behavior: accumulation in cursor order, exhaustion, errors that
// keep the cursor, one page in flight at a time and restoring from the cache.

mod common;

use std::rc::Rc;

use anyhow::Result;
use chrono::Duration;
use futures::poll;
use product_listing::fixtures::ManualClock;
use product_listing::web_app::api::FetchError;
use product_listing::web_app::state::{FeedStatus, InfiniteFeed};

use common::{client_over, client_with_clock, counting, gated, ids, scripted};

#[tokio::test]
async fn test_feed_accumulates_until_exhausted() -> Result<()> {
    let source = counting(45);
    let feed = InfiniteFeed::new(client_over(source.clone()));
    assert_eq!(feed.snapshot().status, FeedStatus::Idle);

    assert!(feed.mount().await);
    assert_eq!(feed.snapshot().len(), 20);
    assert!(feed.snapshot().has_next_page());

    assert!(feed.fetch_next_page().await);
    assert_eq!(feed.snapshot().len(), 40);

    assert!(feed.fetch_next_page().await);
    let state = feed.snapshot();
    assert_eq!(state.len(), 45);
    assert_eq!(state.status, FeedStatus::Exhausted);
    assert!(!state.has_next_page());

    // Further triggers are inert
    assert!(!feed.fetch_next_page().await);
    assert_eq!(source.calls(), 3);

    let pages: Vec<u32> = source.requests().iter().map(|r| r.page).collect();
    assert_eq!(pages, vec![1, 2, 3]);
    assert!(source.requests().iter().all(|r| r.limit == 20 && r.search.is_none()));
    Ok(())
}

#[tokio::test]
async fn test_products_are_the_concatenation_of_pages() -> Result<()> {
    let feed = InfiniteFeed::new(client_over(counting(45)));
    feed.mount().await;
    feed.fetch_next_page().await;
    feed.fetch_next_page().await;

    assert_eq!(ids(&feed.snapshot().products()), (1..=45).collect::<Vec<_>>());
    Ok(())
}

#[tokio::test]
async fn test_exact_multiple_of_page_size() -> Result<()> {
    let source = counting(40);
    let feed = InfiniteFeed::new(client_over(source.clone()));
    feed.mount().await;
    feed.fetch_next_page().await;

    assert_eq!(feed.snapshot().status, FeedStatus::Exhausted);
    assert!(!feed.fetch_next_page().await);
    assert_eq!(source.calls(), 2);
    Ok(())
}

#[tokio::test]
async fn test_empty_catalog_is_exhausted_after_first_page() -> Result<()> {
    let feed = InfiniteFeed::new(client_over(counting(0)));
    assert!(feed.mount().await);

    let state = feed.snapshot();
    assert_eq!(state.status, FeedStatus::Exhausted);
    assert!(state.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_error_keeps_cursor_and_retry_resumes() -> Result<()> {
    let source = scripted(45);
    let feed = InfiniteFeed::new(client_over(source.clone()));
    feed.mount().await;

    source.inner().fail_next(FetchError::Status { status: 502 });
    source.inner().fail_next(FetchError::Status { status: 502 });
    assert!(feed.fetch_next_page().await);

    let state = feed.snapshot();
    assert_eq!(state.status, FeedStatus::Failed);
    assert_eq!(state.next_page, Some(2));
    assert_eq!(state.len(), 20);
    assert_eq!(
        state.error.as_ref().map(|e| format!("Error: {}", e)),
        Some("Error: Failed to fetch".to_string())
    );

    assert!(feed.retry().await);
    let state = feed.snapshot();
    assert_eq!(state.status, FeedStatus::Loaded);
    assert_eq!(state.len(), 40);
    assert_eq!(state.error, None);

    let pages: Vec<u32> = source.requests().iter().map(|r| r.page).collect();
    assert_eq!(pages, vec![1, 2, 2, 2]);
    Ok(())
}

#[tokio::test]
async fn test_one_page_in_flight_at_a_time() -> Result<()> {
    let source = gated(45);
    let feed = InfiniteFeed::new(client_over(source.clone()));

    let mut first = feed.mount();
    assert!(poll!(&mut first).is_pending());
    assert!(feed.snapshot().is_initial_loading());

    assert!(!feed.fetch_next_page().await);
    assert!(!feed.mount().await);
    assert_eq!(source.pending().len(), 1);

    source.release(1, None);
    assert!(first.await);

    let mut second = feed.fetch_next_page();
    assert!(poll!(&mut second).is_pending());
    assert!(feed.snapshot().is_fetching_next_page());
    source.release(2, None);
    assert!(second.await);
    assert_eq!(feed.snapshot().len(), 40);
    Ok(())
}

#[tokio::test]
async fn test_returning_within_freshness_restores_pages() -> Result<()> {
    let source = counting(45);
    let clock = Rc::new(ManualClock::default());
    let client = client_with_clock(source.clone(), clock.clone());

    let feed = InfiniteFeed::new(client.clone());
    feed.mount().await;
    feed.fetch_next_page().await;
    feed.dispose();

    clock.advance(Duration::seconds(59));
    let restored = InfiniteFeed::new(client.clone());
    let state = restored.snapshot();
    assert_eq!(state.len(), 40);
    assert_eq!(state.next_page, Some(3));
    assert_eq!(state.status, FeedStatus::Loaded);
    assert!(!restored.mount().await);
    assert_eq!(source.calls(), 2);

    restored.dispose();
    clock.advance(Duration::seconds(2));
    let fresh = InfiniteFeed::new(client);
    assert_eq!(fresh.snapshot().status, FeedStatus::Idle);
    assert!(fresh.snapshot().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_remounted_feed_joins_page_in_flight() -> Result<()> {
    let source = gated(45);
    let client = client_over(source.clone());

    let left = InfiniteFeed::new(client.clone());
    let mut first = left.mount();
    assert!(poll!(&mut first).is_pending());
    left.dispose();

    let returned = InfiniteFeed::new(client);
    let mut second = returned.mount();
    assert!(poll!(&mut second).is_pending());
    assert_eq!(source.pending().len(), 1);

    assert!(source.release(1, None));
    assert!(!first.await);
    assert!(second.await);
    assert_eq!(returned.snapshot().len(), 20);
    assert_eq!(returned.snapshot().next_page, Some(2));
    Ok(())
}

#[tokio::test]
async fn test_disposed_feed_drops_arrivals() -> Result<()> {
    let source = gated(45);
    let feed = InfiniteFeed::new(client_over(source.clone()));

    let mut pending = feed.mount();
    assert!(poll!(&mut pending).is_pending());
    feed.dispose();
    source.release(1, None);

    assert!(!pending.await);
    assert!(feed.snapshot().is_empty());
    assert!(!feed.fetch_next_page().await);
    Ok(())
}
