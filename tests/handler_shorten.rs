mod common;

use axum::http::Method;
use axum_test::TestServer;
use kv_shortener::routes::{RouterOptions, app_router};
use serde_json::{Value, json};
use std::time::Duration;

fn code_of(short_url: &str) -> &str {
    short_url
        .strip_prefix(&format!("{}/", common::BASE_URL))
        .unwrap()
}

#[tokio::test]
async fn test_shorten_generates_code() {
    let (server, store) = common::create_test_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "https://example.com/a" }))
        .await;

    assert_eq!(response.status_code(), 201);

    let json = response.json::<Value>();
    let short_url = json["shortUrl"].as_str().unwrap();
    let code = code_of(short_url);
    assert_eq!(code.len(), 7);
    assert!(
        code.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );

    let fields = common::read_link_fields(&store, code).await;
    assert_eq!(fields["longUrl"], "https://example.com/a");
    assert_eq!(fields["clickCount"], "0");
    assert!(fields["createdAt"].ends_with('Z'));
    assert!(!fields.contains_key("expiresAt"));
}

#[tokio::test]
async fn test_shorten_with_alias() {
    let (server, _store) = common::create_test_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "https://example.com/b", "alias": "promo" }))
        .await;

    assert_eq!(response.status_code(), 201);

    let json = response.json::<Value>();
    assert_eq!(json["shortUrl"], "http://sho.rt/promo");
}

#[tokio::test]
async fn test_shorten_alias_taken() {
    let (server, store) = common::create_test_server();
    common::create_test_link(&store, "promo", "https://example.com/first").await;

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "https://example.com/c", "alias": "promo" }))
        .await;

    assert_eq!(response.status_code(), 409);

    let json = response.json::<Value>();
    assert_eq!(json["code"], "conflict");

    let fields = common::read_link_fields(&store, "promo").await;
    assert_eq!(fields["longUrl"], "https://example.com/first");
}

#[tokio::test]
async fn test_shorten_empty_alias_generates_code() {
    let (server, _store) = common::create_test_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "https://example.com/d", "alias": "" }))
        .await;

    assert_eq!(response.status_code(), 201);

    let json = response.json::<Value>();
    assert_eq!(code_of(json["shortUrl"].as_str().unwrap()).len(), 7);
}

#[tokio::test]
async fn test_shorten_with_expiry() {
    let (server, store) = common::create_test_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({
            "longUrl": "https://example.com/e",
            "alias": "soon",
            "expiresIn": 3600
        }))
        .await;

    assert_eq!(response.status_code(), 201);

    let fields = common::read_link_fields(&store, "soon").await;
    assert!(fields.contains_key("expiresAt"));
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let (server, _store) = common::create_test_server();

    for long_url in ["not a url", "ftp://example.com/file", "", "   "] {
        let response = server
            .post("/api/shorten")
            .json(&json!({ "longUrl": long_url }))
            .await;

        assert_eq!(response.status_code(), 400, "longUrl: {:?}", long_url);

        let json = response.json::<Value>();
        assert_eq!(json["code"], "validation_error");
    }
}

#[tokio::test]
async fn test_shorten_invalid_alias() {
    let (server, store) = common::create_test_server();

    for alias in ["go", "has space", "a/b", "this-alias-is-way-too-long"] {
        let response = server
            .post("/api/shorten")
            .json(&json!({ "longUrl": "https://example.com/f", "alias": alias }))
            .await;

        assert_eq!(response.status_code(), 400, "alias: {:?}", alias);
    }

    let fields = common::read_link_fields(&store, "go").await;
    assert!(fields.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_shorten_zero_expiry_never_expires() {
    let (server, store) = common::create_test_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "https://example.com/g", "alias": "forever", "expiresIn": 0 }))
        .await;

    assert_eq!(response.status_code(), 201);

    let fields = common::read_link_fields(&store, "forever").await;
    assert!(!fields.contains_key("expiresAt"));

    tokio::time::advance(Duration::from_secs(24 * 60 * 60)).await;

    let stats = server.get("/api/stats/forever").await;
    assert_eq!(stats.status_code(), 200);
    assert!(stats.json::<Value>().get("expiresAt").is_none());
}

#[tokio::test]
async fn test_shorten_same_alias_twice() {
    let (server, _store) = common::create_test_server();
    let body = json!({ "longUrl": "https://example.com/twice", "alias": "twice" });

    let first = server.post("/api/shorten").json(&body).await;
    assert_eq!(first.status_code(), 201);

    let second = server.post("/api/shorten").json(&body).await;
    assert_eq!(second.status_code(), 409);
    assert_eq!(second.json::<Value>()["details"]["alias"], "twice");
}

#[tokio::test]
async fn test_shorten_malformed_body() {
    let (server, _store) = common::create_test_server();

    let missing_url = server
        .post("/api/shorten")
        .json(&json!({ "alias": "promo" }))
        .await;
    assert_eq!(missing_url.status_code(), 400);

    let wrong_type = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": 42 }))
        .await;
    assert_eq!(wrong_type.status_code(), 400);

    let not_json = server.post("/api/shorten").text("longUrl=x").await;
    assert_eq!(not_json.status_code(), 400);
}

#[tokio::test]
async fn test_shorten_url_too_long() {
    let (server, _store) = common::create_test_server();
    let long_url = format!("https://example.com/{}", "a".repeat(2048));

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": long_url }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_shorten_cors_preflight() {
    let (server, _store) = common::create_test_server();

    let response = server
        .method(Method::OPTIONS, "/api/shorten")
        .add_header("Origin", "http://localhost:5173")
        .add_header("Access-Control-Request-Method", "POST")
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.header("access-control-allow-origin"),
        "http://localhost:5173"
    );
}

#[tokio::test]
async fn test_shorten_rate_limited() {
    let (state, _store) = common::create_test_state();
    let options = RouterOptions {
        rate_limit: true,
        ..RouterOptions::default()
    };
    let app = app_router(state, options).layer(common::MockConnectInfoLayer);
    let server = TestServer::new(app).unwrap();

    for _ in 0..100 {
        let response = server
            .post("/api/shorten")
            .json(&json!({ "longUrl": "https://example.com/h" }))
            .await;
        assert_eq!(response.status_code(), 201);
    }

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "https://example.com/h" }))
        .await;

    assert_eq!(response.status_code(), 429);
}
