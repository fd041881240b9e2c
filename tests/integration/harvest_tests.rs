//! Integration tests for the harvester
//!
//! These tests run the production reqwest client against wiremock servers
//! and a temporary SQLite post store.

use reddit_harvest::client::ReqwestClient;
use reddit_harvest::config::{ClientConfig, Config, RateConfig, StoreConfig};
use reddit_harvest::store::{PostStore, SqliteStore};
use reddit_harvest::strategy::{CandidateId, StopReason, StrategyKind};
use reddit_harvest::{harvest, HarvestError, HarvestRequest, Harvester};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a configuration with millisecond pacing pointed at `base_url`
fn create_test_config(base_url: &str, db_path: &str) -> Config {
    Config {
        rate: RateConfig {
            min_delay: 0.001,
            max_delay: 0.005,
            initial_delay: 0.001,
            backoff_factor: 2.0,
            error_step: 0.001,
            recovery_factor: 0.9,
            jitter: 0.1,
            skip_threshold: 3,
        },
        client: ClientConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            connect_timeout_secs: 2,
            user_agents: vec!["HarvestTest/1.0".to_string()],
        },
        store: StoreConfig {
            database_path: db_path.to_string(),
        },
        ..Config::default()
    }
}

fn listing_body(ids: &[&str], after: Option<&str>) -> Value {
    let children: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "kind": "t3",
                "data": { "id": id, "permalink": format!("/r/rust/comments/{}/title/", id) }
            })
        })
        .collect();
    json!({ "kind": "Listing", "data": { "after": after, "children": children } })
}

fn listing(ids: &[&str], after: Option<&str>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(listing_body(ids, after))
}

#[tokio::test]
async fn test_time_range_fallback_fills_deficit() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("posts.db");

    Mock::given(method("GET"))
        .and(path("/r/rust/hot.json"))
        .respond_with(listing(&["a", "b", "c"], None))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/r/rust/top.json"))
        .and(query_param("t", "day"))
        .respond_with(listing(&["d", "e", "f"], None))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Quota is met after the first window
    Mock::given(method("GET"))
        .and(path("/r/rust/top.json"))
        .and(query_param("t", "week"))
        .respond_with(listing(&["x"], None))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), db_path.to_str().unwrap());
    let result = harvest(&config, HarvestRequest::new("https://www.reddit.com/r/rust/", 6))
        .await
        .unwrap();

    assert_eq!(result.ids(), vec!["a", "b", "c", "d", "e", "f"]);
    assert_eq!(
        result.candidates[0].url,
        "https://www.reddit.com/r/rust/comments/a/title"
    );
    assert_eq!(result.strategies.len(), 2);
    assert_eq!(result.strategies[0].stop, StopReason::Exhausted);
    assert_eq!(result.strategies[1].kind, StrategyKind::TimeRange);
    assert_eq!(result.strategies[1].added, 3);
}

#[tokio::test]
async fn test_existing_posts_filtered_from_sqlite() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("posts.db");

    Mock::given(method("GET"))
        .and(path("/r/rust/top.json"))
        .respond_with(listing(&["a", "b", "c", "d"], None))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), db_path.to_str().unwrap());
    let store = SqliteStore::new(&db_path).unwrap();
    for id in ["a", "b"] {
        store
            .record(&CandidateId::new(format!("https://www.reddit.com/comments/{}", id), id))
            .unwrap();
    }

    let client = ReqwestClient::new(&config.client).unwrap();
    let harvester = Harvester::new(config, Arc::new(client), store);

    let result = harvester
        .harvest(HarvestRequest::new("r/rust", 3).sort("top"))
        .await
        .unwrap();

    assert_eq!(result.ids(), vec!["c"]);
    assert_eq!(result.already_stored, 2);
    assert!(harvester.store().exists("a").unwrap());
    assert!(!harvester.store().exists("c").unwrap());
}

#[tokio::test]
async fn test_invalid_target_fails_before_any_request() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("posts.db");

    Mock::given(method("GET"))
        .respond_with(listing(&["a"], None))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), db_path.to_str().unwrap());

    for raw in ["", "https://example.com/r/rust", "r/not a name", "https://www.reddit.com/"] {
        let result = harvest(&config, HarvestRequest::new(raw, 10)).await;
        assert!(
            matches!(result, Err(HarvestError::Target(_))),
            "expected target error for {:?}",
            raw
        );
    }

    let result = harvest(&config, HarvestRequest::new("r/rust", 0)).await;
    assert!(matches!(result, Err(HarvestError::Validation(_))));

    // Rejected requests never create the database
    assert!(!db_path.exists());
}

#[tokio::test]
async fn test_request_errors_win_over_store_errors() {
    let dir = TempDir::new().unwrap();
    let unreachable = dir.path().join("missing").join("posts.db");
    let config = create_test_config("http://127.0.0.1:9", unreachable.to_str().unwrap());

    let result = harvest(&config, HarvestRequest::new("https://example.com/r/rust", 5)).await;
    assert!(matches!(result, Err(HarvestError::Target(_))));

    let result = harvest(&config, HarvestRequest::new("r/rust", 5).sort("sideways")).await;
    assert!(matches!(result, Err(HarvestError::Validation(_))));

    // A valid request reaches the store and reports its failure
    let result = harvest(&config, HarvestRequest::new("r/rust", 5)).await;
    assert!(matches!(result, Err(HarvestError::Store(_))));
}

#[tokio::test]
async fn test_invalid_config_rejected_before_any_request() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("posts.db");

    Mock::given(method("GET"))
        .respond_with(listing(&["a"], None))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), db_path.to_str().unwrap());
    config.rate.min_delay = 5.0;
    config.rate.max_delay = 1.0;

    let result = harvest(&config, HarvestRequest::new("r/rust", 5)).await;
    assert!(matches!(result, Err(HarvestError::Config(_))));
    assert!(!db_path.exists());
}

#[tokio::test]
async fn test_rate_limited_page_retried_once() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("posts.db");

    Mock::given(method("GET"))
        .and(path("/r/rust/new.json"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/r/rust/new.json"))
        .respond_with(listing(&["a", "b"], Some("t3_b")))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), db_path.to_str().unwrap());
    let result = harvest(&config, HarvestRequest::new("rust", 2).sort("new"))
        .await
        .unwrap();

    assert_eq!(result.ids(), vec!["a", "b"]);
    assert_eq!(result.strategies[0].requests, 2);
    assert_eq!(result.strategies[0].stop, StopReason::QuotaReached);
}

#[tokio::test]
async fn test_user_target_uses_submitted_listing() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("posts.db");

    Mock::given(method("GET"))
        .and(path("/user/someone/submitted.json"))
        .and(query_param("sort", "top"))
        .respond_with(listing(&["u1", "u2"], None))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "author:someone rust"))
        .respond_with(listing(&["u2", "u3"], None))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), db_path.to_str().unwrap());
    let request = HarvestRequest::new("https://old.reddit.com/user/someone/", 5)
        .sort("top")
        .keywords(["rust"]);
    let result = harvest(&config, request).await.unwrap();

    assert_eq!(result.ids(), vec!["u1", "u2", "u3"]);
    assert_eq!(result.strategies.len(), 2);
    assert_eq!(result.strategies[1].kind, StrategyKind::Search);
}
