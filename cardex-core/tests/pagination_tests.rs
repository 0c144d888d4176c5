mod support;

use cardex_core::CatalogError;
use cardex_core::catalog::CatalogStore;
use cardex_core::query::QueryOrchestrator;
use std::time::Duration;
use support::{config, engine, numbered};

#[tokio::test]
async fn window_grows_twelve_at_a_time_until_exhausted() {
    let mut engine = engine(numbered(30));
    engine.run_search("");

    let status = engine.page_status();
    assert_eq!((status.visible, status.total), (12, 30));
    assert!(!status.exhausted);

    assert!(engine.load_more().await);
    assert_eq!(engine.page_status().visible, 24);

    assert!(engine.load_more().await);
    let status = engine.page_status();
    assert_eq!(status.visible, 30);
    assert!(status.exhausted);
    assert!(!status.loading_more);

    assert!(!engine.load_more().await);
    assert_eq!(engine.visible_results().len(), 30);
}

#[tokio::test]
async fn second_request_while_loading_is_a_no_op() {
    let mut engine = engine(numbered(40));
    engine.run_search("");

    let pending = engine.begin_load().expect("first load claims the slot");
    assert!(engine.page_status().loading_more);
    assert!(engine.begin_load().is_none());
    assert!(!engine.load_more().await);

    let ticket = pending.wait().await.expect("load completes");
    assert!(engine.finish_load(ticket));
    assert_eq!(engine.page_status().visible, 24);

    // Replaying the same ticket must not double-increment.
    assert!(!engine.finish_load(ticket));
    assert_eq!(engine.page_status().visible, 24);
}

#[tokio::test]
async fn teardown_cancels_pending_continuation() {
    let store = CatalogStore::from_records(numbered(40));
    let mut engine =
        QueryOrchestrator::new(store, config().with_latency(Duration::from_secs(30)));
    engine.run_search("");

    let pending = engine.begin_load().expect("slot available");
    let ticket = pending.ticket();
    let waiter = tokio::spawn(pending.wait());

    engine.teardown();
    let outcome = waiter.await.expect("task joins");
    assert!(matches!(outcome, Err(CatalogError::Cancelled(_))));

    assert!(!engine.finish_load(ticket));
    assert_eq!(engine.page_status().visible, 12);
}

#[tokio::test]
async fn new_search_cancels_in_flight_load() {
    let store = CatalogStore::from_records(numbered(40));
    let mut engine =
        QueryOrchestrator::new(store, config().with_latency(Duration::from_secs(30)));
    engine.run_search("");

    let pending = engine.begin_load().expect("slot available");
    let ticket = pending.ticket();
    let waiter = tokio::spawn(pending.wait());

    engine.run_search("card 1");
    assert!(waiter.await.expect("task joins").is_err());
    assert!(!engine.finish_load(ticket));
    assert!(!engine.page_status().loading_more);
}

#[tokio::test]
async fn external_cancellation_aborts_load_more_and_recovers() {
    let store = CatalogStore::from_records(numbered(40));
    let mut engine =
        QueryOrchestrator::new(store, config().with_latency(Duration::from_secs(30)));
    engine.run_search("");

    let token = engine.cancellation_token();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        token.cancel();
    });

    assert!(!engine.load_more().await);
    let status = engine.page_status();
    assert_eq!(status.visible, 12);
    assert!(!status.loading_more);

    let pending = engine.begin_load().expect("slot released");
    assert!(!pending.cancellation_token().is_cancelled());
}

#[tokio::test]
async fn small_results_are_exhausted_immediately() {
    let mut engine = engine(numbered(7));
    engine.run_search("");
    let status = engine.page_status();
    assert_eq!((status.visible, status.total), (7, 7));
    assert!(status.exhausted);
    assert!(engine.begin_load().is_none());
}

#[tokio::test]
async fn scroll_trigger_respects_guard_and_exhaustion() {
    let mut engine = engine(numbered(20));
    engine.run_search("");

    assert!(!engine.should_load_more(0.0, 400.0, 2000.0));
    assert!(engine.should_load_more(1300.0, 400.0, 2000.0));

    let pending = engine.begin_load().expect("slot available");
    assert!(!engine.should_load_more(1300.0, 400.0, 2000.0));

    let ticket = pending.wait().await.expect("load completes");
    engine.finish_load(ticket);
    assert!(engine.is_exhausted());
    assert!(!engine.should_load_more(1900.0, 400.0, 2000.0));
}
