//! Integration tests for the credentials client against a mock
//! provisioning service.

use callstage::{CredentialsClient, CredentialsError};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials_body() -> serde_json::Value {
    json!({
        "token": "tok-1",
        "roomURL": "https://calls.example.com/demo",
        "roomName": "demo"
    })
}

#[tokio::test]
async fn test_fetch_parses_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/token"))
        .and(query_param("identity", "Ada"))
        .and(query_param("roomName", "demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(credentials_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = CredentialsClient::new(server.uri()).unwrap();
    let credentials = client.fetch(Some("Ada"), Some("demo")).await.unwrap();

    assert_eq!(credentials.token, "tok-1");
    assert_eq!(credentials.room_url, "https://calls.example.com/demo");
    assert_eq!(credentials.room_name, "demo");
}

#[tokio::test]
async fn test_omitted_parameters_are_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/token"))
        .and(query_param_is_missing("identity"))
        .and(query_param_is_missing("roomName"))
        .respond_with(ResponseTemplate::new(200).set_body_json(credentials_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = CredentialsClient::new(server.uri()).unwrap();
    let credentials = client.fetch(None, None).await.unwrap();
    assert_eq!(credentials.room_name, "demo");
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(502).set_body_json(json!({ "error": "upstream" })))
        .mount(&server)
        .await;

    let client = CredentialsClient::new(server.uri()).unwrap();
    let error = client.fetch(Some("Ada"), None).await.unwrap_err();
    match error {
        CredentialsError::Status { status } => assert_eq!(status, 502),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let client = CredentialsClient::new(server.uri()).unwrap();
    let error = client.fetch(Some("Ada"), None).await.unwrap_err();
    assert!(matches!(error, CredentialsError::Decode { .. }));
}
