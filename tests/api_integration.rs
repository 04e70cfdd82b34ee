//! API integration tests.
//!
//! Boot the real router on a random port and drive it over HTTP.

use std::net::SocketAddr;
use std::time::Duration;

use graphmirror_backend::config::settings::Settings;
use graphmirror_backend::router;
use graphmirror_backend::twitter::TwitterCredentials;
use serde_json::{json, Value};
use tokio::net::TcpListener;

// =============================================================================
// Test Helpers
// =============================================================================

/// Settings for an unconfigured service, independent of the test environment.
fn test_settings() -> Settings {
    Settings {
        port: 0,
        addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        database_url: None,
        twitter_credentials: None,
        twitter_api_base: "https://api.twitter.com".to_string(),
        resolve_delay: Duration::ZERO,
    }
}

/// Start a test server and return its base URL.
async fn start_test_server(settings: Settings) -> String {
    let app = router(settings);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().expect("Failed to get local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give server time to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    format!("http://{}", addr)
}

// =============================================================================
// Health & Page Tests
// =============================================================================

#[tokio::test]
async fn healthz_reports_ok() {
    let base_url = start_test_server(test_settings()).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/healthz", base_url))
        .send()
        .await
        .expect("Failed to send healthz request");

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("Failed to parse healthz response");
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn index_page_links_the_graph_pages() {
    let base_url = start_test_server(test_settings()).await;
    let client = reqwest::Client::new();

    let resp = client.get(&base_url).send().await.unwrap();

    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("/followers"));
    assert!(html.contains("/followees"));
}

#[tokio::test]
async fn unconfigured_graph_pages_render_a_notice() {
    let base_url = start_test_server(test_settings()).await;
    let client = reqwest::Client::new();

    for path in ["/followers", "/followees"] {
        let resp = client
            .get(format!("{}{}", base_url, path))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 200, "{path}");
        let html = resp.text().await.unwrap();
        assert!(html.contains("not configured"), "{path}");
        assert!(html.contains("No users to show"), "{path}");
    }
}

#[tokio::test]
async fn unparsable_page_parameter_still_renders() {
    let base_url = start_test_server(test_settings()).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/followers?page=abc", base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn database_failure_renders_an_error_notice() {
    let settings = Settings {
        database_url: Some("not-a-connection-string".to_string()),
        twitter_credentials: Some(TwitterCredentials {
            consumer_key: "ck".to_string(),
            ..TwitterCredentials::default()
        }),
        ..test_settings()
    };
    let base_url = start_test_server(settings).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/followers", base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("could not be loaded"));
}

// =============================================================================
// Graph Query API Tests
// =============================================================================

#[tokio::test]
async fn query_graph_short_circuits_without_credentials() {
    let base_url = start_test_server(test_settings()).await;
    let client = reqwest::Client::new();

    let payloads = [
        json!({}),
        json!({ "twitterClient": {} }),
        json!({ "twitterClient": { "consumerKey": "" } }),
        json!({
            "twitterClient": { "consumerKey": "" },
            "dbString": "postgres://localhost/graph"
        }),
    ];

    for payload in payloads {
        let resp = client
            .post(format!("{}/api/query-graph", base_url))
            .json(&payload)
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 200, "payload: {payload}");
        let body: Value = resp.json().await.unwrap();
        // exactly one key, no count or error fields
        assert_eq!(body, json!({ "followers": [] }), "payload: {payload}");
    }
}

#[tokio::test]
async fn query_graph_requires_a_connection_string() {
    let base_url = start_test_server(test_settings()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/query-graph", base_url))
        .json(&json!({ "twitterClient": { "consumerKey": "ck" } }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("dbString"));
}

#[tokio::test]
async fn query_graph_reports_database_failures() {
    let base_url = start_test_server(test_settings()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/query-graph", base_url))
        .json(&json!({
            "twitterClient": { "consumerKey": "ck" },
            "dbString": "not-a-connection-string"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(!body["message"].as_str().unwrap().is_empty());
}

// =============================================================================
// Resolve API Tests
// =============================================================================

fn resolve_payload(limit: i64, offset: i64, count: i64) -> Value {
    json!({
        "db": { "string": "not-a-connection-string" },
        "twitterClient": { "consumerKey": "ck", "consumerSecret": "cs" },
        "group": "followers",
        "limit": limit,
        "offset": offset,
        "count": count
    })
}

#[tokio::test]
async fn resolve_users_rejects_out_of_range_pagination() {
    let base_url = start_test_server(test_settings()).await;
    let client = reqwest::Client::new();

    let rejected = [
        resolve_payload(0, 0, 250),
        resolve_payload(101, 0, 250),
        resolve_payload(100, -1, 250),
        resolve_payload(100, 0, -5),
    ];

    for payload in rejected {
        let resp = client
            .post(format!("{}/api/resolve-users", base_url))
            .json(&payload)
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 422, "payload: {payload}");
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["success"], false, "payload: {payload}");
    }
}

#[tokio::test]
async fn resolve_users_rejects_an_unknown_group() {
    let base_url = start_test_server(test_settings()).await;
    let client = reqwest::Client::new();

    let mut payload = resolve_payload(100, 0, 250);
    payload["group"] = json!("strangers");

    let resp = client
        .post(format!("{}/api/resolve-users", base_url))
        .json(&payload)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 422);
}

#[tokio::test]
async fn resolve_users_serializes_run_failures_into_the_error_field() {
    let base_url = start_test_server(test_settings()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/resolve-users", base_url))
        .json(&resolve_payload(100, 0, 250))
        .send()
        .await
        .unwrap();

    // run failures are reported in the body, not the status
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert!(!body["error"].as_str().unwrap().is_empty());
    assert!(body.get("success").is_none());
}
