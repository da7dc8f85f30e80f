#![allow(clippy::unwrap_used)]
// Integration tests for the shared transport using wiremock.

use std::error::Error as _;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ktalk_api::{Error, Query, SecretString, TalkClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, TalkClient) {
    let server = MockServer::start().await;
    let client = TalkClient::with_base_url(
        &format!("{}/api", server.uri()),
        &SecretString::from("test-api-key"),
        &TransportConfig::default(),
    )
    .unwrap();
    (server, client)
}

// ── Request construction ────────────────────────────────────────────

#[tokio::test]
async fn test_get_sends_fixed_headers_and_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/test-endpoint"))
        .and(query_param("param", "value"))
        .and(header("X-Auth-Token", "test-api-key"))
        .and(header("Content-Type", "application/json"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "key": "value" })))
        .expect(1)
        .mount(&server)
        .await;

    let query = Query::new().set("param", "value");
    let result = client
        .transport()
        .get("/test-endpoint", &query)
        .await
        .unwrap();

    assert_eq!(result, json!({ "key": "value" }));
}

#[tokio::test]
async fn test_array_query_repeats_bracketed_key() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("email[]", "a@example.com"))
        .and(query_param("email[]", "b@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let query = Query::new().extend("email", ["a@example.com", "b@example.com"]);
    let result = client.transport().get("search", &query).await.unwrap();

    assert_eq!(result, json!([]));

    let requests = server.received_requests().await.unwrap();
    let raw_query = requests[0].url.query().unwrap();
    assert_eq!(raw_query.matches("email%5B%5D=").count(), 2);
}

#[tokio::test]
async fn test_post_and_put_send_json_body_and_query() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/items"))
        .and(query_param("dryRun", "true"))
        .and(body_json(json!({ "data": "value" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/items/1"))
        .and(body_json(json!({ "data": "changed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "updated" })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = client.transport();
    let created = transport
        .post(
            "items",
            &json!({ "data": "value" }),
            &Query::new().flag("dryRun", true),
        )
        .await
        .unwrap();
    let updated = transport
        .put("items/1", &json!({ "data": "changed" }), &Query::new())
        .await
        .unwrap();

    assert_eq!(created, json!({ "status": "success" }));
    assert_eq!(updated, json!({ "status": "updated" }));
}

// ── Success bodies ──────────────────────────────────────────────────

#[tokio::test]
async fn test_empty_response_returns_empty_object() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/items/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let result = client
        .transport()
        .delete("items/1", &Query::new())
        .await
        .unwrap();

    assert_eq!(result, json!({}));
}

#[tokio::test]
async fn test_malformed_success_body_is_absorbed() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/whitespace"))
        .respond_with(ResponseTemplate::new(200).set_body_string("  \n"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"unterminated\": "))
        .mount(&server)
        .await;

    let transport = client.transport();
    assert_eq!(
        transport.get("whitespace", &Query::new()).await.unwrap(),
        json!({})
    );
    assert_eq!(transport.get("broken", &Query::new()).await.unwrap(), json!({}));
}

#[tokio::test]
async fn test_nested_body_round_trips_unchanged() {
    let (server, client) = setup().await;

    let body = json!({
        "users": [
            { "key": "u1", "firstname": "Anna", "disabled": false, "roles": ["admin"] },
            { "key": "u2", "firstname": "Oleg", "disabled": true, "roles": [] }
        ],
        "offset": null,
        "total": 2,
        "ratio": 0.5
    });

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let result = client.transport().get("users", &Query::new()).await.unwrap();
    assert_eq!(result, body);
}

// ── Error classification ────────────────────────────────────────────

#[tokio::test]
async fn test_error_429_rate_limited() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({ "errorMessage": "slow down" })),
        )
        .mount(&server)
        .await;

    let err = client
        .transport()
        .get("test-endpoint", &Query::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::RateLimited { status: 429, .. }), "got: {err:?}");
    assert_eq!(err.to_string(), "API rate limit exceeded");
    assert!(err.is_rate_limited());
    assert!(err.is_transient());
    assert!(err.source().is_some());
}

#[tokio::test]
async fn test_error_404_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "errorMessage": "no such user" })),
        )
        .mount(&server)
        .await;

    let err = client.users().get_by_key("ghost").await.unwrap_err();

    assert!(matches!(err, Error::NotFound { status: 404, .. }), "got: {err:?}");
    assert_eq!(err.to_string(), "Resource not found");
    assert!(err.is_not_found());
    assert_eq!(err.status(), Some(404));
    assert!(err.source().is_some());
}

#[tokio::test]
async fn test_error_400_uses_server_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "errorMessage": "Bad request" })),
        )
        .mount(&server)
        .await;

    let err = client
        .transport()
        .get("test-endpoint", &Query::new())
        .await
        .unwrap_err();

    match err {
        Error::Api {
            status,
            ref message,
            ..
        } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Bad request");
        }
        ref other => panic!("expected Api error, got: {other:?}"),
    }
    assert_eq!(err.to_string(), "Bad request");
    assert!(err.source().is_some());
}

#[tokio::test]
async fn test_error_400_without_message_falls_back() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/json"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": "nope" })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/html"))
        .respond_with(ResponseTemplate::new(400).set_body_string("<html>Bad</html>"))
        .mount(&server)
        .await;

    let transport = client.transport();
    for endpoint in ["json", "html"] {
        let err = transport.get(endpoint, &Query::new()).await.unwrap_err();
        match err {
            Error::Api {
                status,
                ref message,
                ..
            } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API error");
            }
            other => panic!("expected Api error for {endpoint}, got: {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_error_403_is_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({ "errorMessage": "Insufficient permissions" })),
        )
        .mount(&server)
        .await;

    let err = client.roles().delete("r1").await.unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert_eq!(err.to_string(), "Insufficient permissions");
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_error_500_is_transport_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "errorMessage": "ignored" })),
        )
        .mount(&server)
        .await;

    let err = client.statistics().online().await.unwrap_err();

    match err {
        Error::Transport {
            status,
            ref source,
            ..
        } => {
            assert_eq!(status, Some(500));
            assert!(source.is_some());
        }
        ref other => panic!("expected Transport error, got: {other:?}"),
    }
    assert!(err.to_string().starts_with("API request failed: "), "{err}");
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_connection_failure_has_no_status() {
    // Nothing listens on the discard port.
    let client = TalkClient::with_base_url(
        "http://127.0.0.1:9/api",
        &SecretString::from("test-api-key"),
        &TransportConfig::default(),
    )
    .unwrap();

    let err = client.roles().list().await.unwrap_err();

    match err {
        Error::Transport { status, .. } => assert_eq!(status, None),
        other => panic!("expected Transport error, got: {other:?}"),
    }
}
