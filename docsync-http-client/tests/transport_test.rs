//! Transport tests against a mock server

use docsync_http_client::{HttpClient, HttpClientConfig, HttpClientError, Transport};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn auth() -> Vec<(String, String)> {
    vec![
        ("Authorization".to_string(), "Bearer secret".to_string()),
        ("X-Apifox-Version".to_string(), "2024-01-20".to_string()),
    ]
}

#[tokio::test]
async fn test_get_returns_body_and_sends_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/folders"))
        .and(query_param("locale", "zh-CN"))
        .and(header("Authorization", "Bearer secret"))
        .and(header("X-Apifox-Version", "2024-01-20"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":true}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::default_client().unwrap();
    let url = format!("{}/folders?locale=zh-CN", server.uri());
    let body = Transport::get(&client, &url, &auth()).await.unwrap();

    assert_eq!(&body[..], br#"{"success":true}"#);
}

#[tokio::test]
async fn test_post_form_encodes_params() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api-folders"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("name=Users&parentId=12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::default_client().unwrap();
    let params = vec![
        ("name".to_string(), "Users".to_string()),
        ("parentId".to_string(), "12".to_string()),
    ];
    client
        .post_form(&format!("{}/api-folders", server.uri()), &params, &auth())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_post_json_sends_body() {
    let server = MockServer::start().await;
    let payload = json!({"importFormat": "openapi", "apiFolderId": 3});
    Mock::given(method("POST"))
        .and(path("/import-data"))
        .and(header("content-type", "application/json"))
        .and(body_json(payload.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::default_client().unwrap();
    client
        .post_json(&format!("{}/import-data", server.uri()), &payload, &auth())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::default_client().unwrap();
    let err = Transport::get(&client, &format!("{}/folders", server.uri()), &auth())
        .await
        .unwrap_err();

    match err {
        HttpClientError::Response { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "unauthorized");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let config = HttpClientConfig::builder()
        .timeout(Duration::from_millis(100))
        .build();
    let client = HttpClient::new(config).unwrap();
    let err = Transport::get(&client, &format!("{}/slow", server.uri()), &[])
        .await
        .unwrap_err();

    assert!(err.is_timeout());
}
