mod common;

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use qr_shortlink::domain::entities::LinkStatus;
use qr_shortlink::domain::shortener::{ShortenerError, UrlShortener};
use qr_shortlink::infrastructure::shortener::{SHORTEN_PATH, SpooClient};
use serde_json::{Value, json};
use std::time::Duration;

fn client(base_url: &str, api_key: Option<&str>) -> SpooClient {
    SpooClient::new(
        base_url,
        api_key.map(str::to_string),
        Duration::from_secs(5),
    )
    .unwrap()
}

async fn upstream(status: StatusCode, body: &'static str) -> String {
    let router = Router::new().route(
        SHORTEN_PATH,
        post(move || async move { (status, body) }),
    );
    common::spawn_server(router).await
}

#[tokio::test]
async fn test_shorten_success_sends_key_and_body() {
    let router = Router::new().route(
        SHORTEN_PATH,
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            assert_eq!(headers["authorization"], "Bearer test-key");
            assert_eq!(body, json!({ "long_url": "https://example.com/page" }));

            Json(json!({
                "alias": "abc123",
                "short_url": "https://spoo.me/abc123",
                "long_url": "https://example.com/page",
                "owner_id": null,
                "created_at": 1_700_000_000,
                "status": "ACTIVE",
                "private_stats": false
            }))
        }),
    );
    let base = common::spawn_server(router).await;

    let shortened = client(&base, Some("test-key"))
        .shorten("https://example.com/page")
        .await
        .unwrap();

    assert_eq!(shortened.short_url, "https://spoo.me/abc123");
    assert_eq!(shortened.alias, "abc123");
    assert_eq!(shortened.status, Some(LinkStatus::Active));
}

#[tokio::test]
async fn test_shorten_without_key_sends_no_auth_header() {
    let router = Router::new().route(
        SHORTEN_PATH,
        post(|headers: HeaderMap| async move {
            assert!(headers.get("authorization").is_none());
            Json(json!({ "short_url": "https://spoo.me/x" }))
        }),
    );
    let base = common::spawn_server(router).await;

    let shortened = client(&base, None).shorten("https://example.com").await.unwrap();

    assert_eq!(shortened.short_url, "https://spoo.me/x");
}

#[tokio::test]
async fn test_upstream_server_error_keeps_status() {
    let base = upstream(StatusCode::INTERNAL_SERVER_ERROR, "oops").await;

    let err = client(&base, Some("k"))
        .shorten("https://example.com")
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 500);
    assert!(matches!(err, ShortenerError::Upstream { status: 500, .. }));
    assert_ne!(err.to_string(), "oops");
}

#[tokio::test]
async fn test_upstream_rate_limit_message_substituted() {
    let base = upstream(
        StatusCode::TOO_MANY_REQUESTS,
        r#"{"message":"quota exhausted for key"}"#,
    )
    .await;

    let err = client(&base, Some("k"))
        .shorten("https://example.com")
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 429);
    assert_eq!(err.to_string(), "Shortening service rate limit exceeded");
}

#[tokio::test]
async fn test_upstream_other_status_uses_message_field() {
    let base = upstream(StatusCode::CONFLICT, r#"{"message":"Alias already exists"}"#).await;

    let err = client(&base, Some("k"))
        .shorten("https://example.com")
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 409);
    assert_eq!(err.to_string(), "Alias already exists");
}

#[tokio::test]
async fn test_malformed_success_body() {
    let base = upstream(StatusCode::OK, "<html>not json</html>").await;

    let err = client(&base, Some("k"))
        .shorten("https://example.com")
        .await
        .unwrap_err();

    assert!(matches!(err, ShortenerError::InvalidResponse(_)));
    assert_eq!(err.status_code(), 502);
}

#[tokio::test]
async fn test_timeout() {
    let router = Router::new().route(
        SHORTEN_PATH,
        post(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({ "short_url": "https://spoo.me/late" }))
        }),
    );
    let base = common::spawn_server(router).await;

    let client = SpooClient::new(&base, None, Duration::from_millis(200)).unwrap();
    let err = client.shorten("https://example.com").await.unwrap_err();

    assert_eq!(err, ShortenerError::Timeout);
    assert_eq!(err.status_code(), 408);
}

#[tokio::test]
async fn test_network_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}"), Some("k"))
        .shorten("https://example.com")
        .await
        .unwrap_err();

    assert!(matches!(err, ShortenerError::Network(_)));
    assert_eq!(err.status_code(), 503);
}
