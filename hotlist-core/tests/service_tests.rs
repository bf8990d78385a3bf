use std::time::Duration;

use reqwest::Client;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hotlist_core::{
    CacheSnapshot, CacheStore, Refresher, SourceConfig, TrendingClient, TrendingItem,
    TrendingService,
};

fn sample_body() -> &'static str {
    r#"{"data":{"trending":{"list":[{"keyword":"foo","show_name":"Foo Topic"}]}}}"#
}

fn service(server: &MockServer, store: CacheStore, max_age: Option<Duration>) -> TrendingService {
    let config = SourceConfig {
        endpoint: format!("{}/square", server.uri()),
        request_limit: 10,
        request_timeout_seconds: 2,
    };
    let client = TrendingClient::new(Client::new(), &config);
    let refresher = Refresher::new(client, store.clone());
    TrendingService::new(refresher, store, max_age)
}

#[tokio::test]
async fn current_on_empty_cache_runs_exactly_one_cycle() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/square"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_body()))
        .expect(1)
        .mount(&server)
        .await;

    let store = CacheStore::in_memory();
    let service = service(&server, store.clone(), None);

    let items = service.current().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].keyword, "foo");
    assert!(store.read().await.is_some());

    // The second call is served from the cache; the mock's single-request
    // expectation is verified when the server drops.
    let again = service.current().await.unwrap();
    assert_eq!(again, items);
}

#[tokio::test]
async fn current_on_warm_cache_does_not_touch_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/square"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_body()))
        .expect(0)
        .mount(&server)
        .await;

    let store = CacheStore::in_memory();
    let stored = CacheSnapshot::new(vec![
        TrendingItem::new("Cached Topic", "cached"),
        TrendingItem::new("Second Topic", "second"),
    ]);
    store.write(&stored).await.unwrap();

    let service = service(&server, store, None);
    let items = service.current().await.unwrap();

    assert_eq!(items, stored.items);
}

#[tokio::test]
async fn failed_force_refresh_keeps_serving_the_previous_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/square"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = CacheStore::in_memory();
    let previous = CacheSnapshot::new(vec![TrendingItem::new("Kept Topic", "kept")]);
    store.write(&previous).await.unwrap();

    let service = service(&server, store, None);
    assert!(service.force_refresh().await.is_err());

    let items = service.current().await.unwrap();
    assert_eq!(items, previous.items);
}

#[tokio::test]
async fn stale_snapshot_triggers_a_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/square"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_body()))
        .expect(1)
        .mount(&server)
        .await;

    let store = CacheStore::in_memory();
    let stale = CacheSnapshot {
        items: vec![TrendingItem::new("Old Topic", "old")],
        fetched_at: chrono::Utc::now() - chrono::Duration::hours(1),
    };
    store.write(&stale).await.unwrap();

    let service = service(&server, store.clone(), Some(Duration::from_secs(60)));
    let items = service.current().await.unwrap();

    assert_eq!(items[0].keyword, "foo");
    assert_eq!(store.read().await.unwrap().items, items);
}

#[tokio::test]
async fn fresh_snapshot_is_served_within_max_age() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/square"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_body()))
        .expect(0)
        .mount(&server)
        .await;

    let store = CacheStore::in_memory();
    let stored = CacheSnapshot::new(vec![TrendingItem::new("Fresh Topic", "fresh")]);
    store.write(&stored).await.unwrap();

    let service = service(&server, store, Some(Duration::from_secs(3600)));
    let items = service.current().await.unwrap();

    assert_eq!(items, stored.items);
}

#[tokio::test]
async fn startup_refresh_flips_readiness_and_fills_the_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/square"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_body()))
        .mount(&server)
        .await;

    let store = CacheStore::in_memory();
    let service = service(&server, store.clone(), None);
    assert!(!service.is_ready());

    service.spawn_startup_refresh().await.unwrap();

    assert!(service.is_ready());
    assert!(store.read().await.is_some());
}

#[tokio::test]
async fn failed_startup_refresh_still_reports_ready() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/square"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = CacheStore::in_memory();
    let service = service(&server, store.clone(), None);

    service.spawn_startup_refresh().await.unwrap();

    assert!(service.is_ready());
    assert!(store.read().await.is_none());
}

#[tokio::test]
async fn ready_signal_can_be_awaited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/square"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_body()))
        .mount(&server)
        .await;

    let service = service(&server, CacheStore::in_memory(), None);
    let mut ready = service.ready_signal();
    assert!(!*ready.borrow());

    let handle = service.spawn_startup_refresh();
    ready.changed().await.unwrap();
    assert!(*ready.borrow());

    handle.await.unwrap();
}
