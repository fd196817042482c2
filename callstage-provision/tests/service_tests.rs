//! Integration tests for the provisioning service: the upstream rooms-API
//! client against a mock server, and the HTTP routes end to end.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::util::ServiceExt;
use wiremock::matchers::{body_partial_json, header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use callstage_provision::{router, AppState, ProvisionConfig, ProvisionError, RoomsClient};

fn test_config(upstream: &MockServer) -> ProvisionConfig {
    ProvisionConfig {
        api_base: upstream.uri(),
        api_key: "test-key".to_string(),
        ..ProvisionConfig::default()
    }
}

fn room_body(name: &str, exp: i64) -> Value {
    json!({
        "name": name,
        "url": format!("https://calls.example.com/{}", name),
        "config": { "exp": exp }
    })
}

async fn send(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn test_get_room_returns_none_when_absent() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rooms/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "not-found" })))
        .mount(&upstream)
        .await;

    let client = RoomsClient::new(&test_config(&upstream)).unwrap();
    let room = client.get_room("missing").await.unwrap();
    assert!(room.is_none());
}

#[tokio::test]
async fn test_get_or_create_creates_missing_room() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rooms/demo"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "not-found" })))
        .expect(1)
        .mount(&upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/rooms"))
        .and(body_partial_json(json!({ "name": "demo" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(room_body("demo", 2_000_000_000)))
        .expect(1)
        .mount(&upstream)
        .await;

    let client = RoomsClient::new(&test_config(&upstream)).unwrap();
    let room = client.get_or_create_room("demo").await.unwrap();
    assert_eq!(room.name, "demo");
    assert_eq!(room.url, "https://calls.example.com/demo");
    assert_eq!(room.config.exp, Some(2_000_000_000));
}

#[tokio::test]
async fn test_get_or_create_reuses_existing_room() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rooms/demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(room_body("demo", 2_000_000_000)))
        .expect(1)
        .mount(&upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/rooms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(room_body("demo", 2_000_000_000)))
        .expect(0)
        .mount(&upstream)
        .await;

    let client = RoomsClient::new(&test_config(&upstream)).unwrap();
    let room = client.get_or_create_room("demo").await.unwrap();
    assert_eq!(room.name, "demo");
}

#[tokio::test]
async fn test_meeting_token_request_carries_owner_and_room() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/meeting-tokens"))
        .and(body_partial_json(json!({
            "properties": {
                "room_name": "demo",
                "user_name": "Ada Lovelace",
                "is_owner": true
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok-123" })))
        .expect(1)
        .mount(&upstream)
        .await;

    let client = RoomsClient::new(&test_config(&upstream)).unwrap();
    let token = client
        .create_meeting_token("demo", "Ada Lovelace")
        .await
        .unwrap();
    assert_eq!(token, "tok-123");
}

#[tokio::test]
async fn test_upstream_failure_propagates_as_error() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rooms/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&upstream)
        .await;

    let client = RoomsClient::new(&test_config(&upstream)).unwrap();
    let error = client.get_room("broken").await.unwrap_err();
    match error {
        ProvisionError::Upstream { status, .. } => assert_eq!(status, 500),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_token_endpoint_issues_credentials() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rooms/demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(room_body("demo", 2_000_000_000)))
        .mount(&upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/meeting-tokens"))
        .and(body_partial_json(json!({
            "properties": { "room_name": "demo", "user_name": "Ada" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok-1" })))
        .mount(&upstream)
        .await;

    let app = router(AppState::new(&test_config(&upstream)).unwrap());
    let (status, body) = send(&app, "/token?identity=Ada&roomName=demo").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token"], "tok-1");
    assert_eq!(body["roomURL"], "https://calls.example.com/demo");
    assert_eq!(body["roomName"], "demo");
}

#[tokio::test]
async fn test_token_endpoint_caches_room_until_expiry() {
    let upstream = MockServer::start().await;
    let exp = chrono::Utc::now().timestamp() + 3600;
    Mock::given(method("GET"))
        .and(path("/rooms/demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(room_body("demo", exp)))
        .expect(1)
        .mount(&upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/meeting-tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok" })))
        .expect(2)
        .mount(&upstream)
        .await;

    let app = router(AppState::new(&test_config(&upstream)).unwrap());
    let (first, _) = send(&app, "/token?identity=A&roomName=demo").await;
    let (second, _) = send(&app, "/token?identity=B&roomName=demo").await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
}

#[tokio::test]
async fn test_token_endpoint_generates_room_name_when_absent() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex("^/rooms/callstage-[0-9a-f]{12}$"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "not-found" })))
        .mount(&upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/rooms"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(room_body("callstage-0123456789ab", 0)),
        )
        .mount(&upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/meeting-tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok" })))
        .mount(&upstream)
        .await;

    let app = router(AppState::new(&test_config(&upstream)).unwrap());
    let (status, body) = send(&app, "/token?identity=Ada").await;

    assert_eq!(status, StatusCode::OK);
    let room_name = body["roomName"].as_str().unwrap();
    assert!(room_name.starts_with("callstage-"));
}

#[tokio::test]
async fn test_token_endpoint_maps_upstream_failure_to_bad_gateway() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rooms/demo"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&upstream)
        .await;

    let app = router(AppState::new(&test_config(&upstream)).unwrap());
    let (status, body) = send(&app, "/token?identity=Ada&roomName=demo").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("503"));
}

#[tokio::test]
async fn test_health_route() {
    let upstream = MockServer::start().await;
    let app = router(AppState::new(&test_config(&upstream)).unwrap());
    let (status, body) = send(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
