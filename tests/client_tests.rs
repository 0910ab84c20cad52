//! Request-pipeline tests: credential attachment and 401 teardown.

use std::sync::Arc;

use cloudpc::{ApiClient, ApiError, SessionStore};
use mockito::{Matcher, Server};
use serde_json::json;

fn test_client(server: &Server) -> (ApiClient, Arc<SessionStore>) {
    let session = Arc::new(SessionStore::in_memory());
    let client = ApiClient::new(server.url(), session.clone());
    (client, session)
}

fn user_json() -> serde_json::Value {
    json!({
        "id": "u1",
        "email": "a@example.com",
        "name": "Alice",
        "avatar": null,
        "createdAt": "2024-01-15T10:30:00Z"
    })
}

fn instance_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "dev-box",
        "status": status,
        "cpu": 4,
        "memory": 8,
        "storage": 100,
        "os": "Linux",
        "ip": "10.0.0.12",
        "port": 3389,
        "createdAt": "2024-01-15T10:30:00Z",
        "userId": "u1"
    })
}

#[tokio::test]
async fn test_unauthenticated_request_carries_no_authorization_header() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/cloudpc")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let (client, _session) = test_client(&server);
    let instances = client.list_instances().await.unwrap();
    assert!(instances.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_stored_token_is_sent_as_bearer() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/cloudpc")
        .match_header("authorization", "Bearer tok1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([instance_json("pc-1", "running")]).to_string())
        .create_async()
        .await;

    let (client, session) = test_client(&server);
    session.set("tok1").unwrap();

    let instances = client.list_instances().await.unwrap();
    assert_eq!(instances.len(), 1);
    assert_eq!(instances[0].id, "pc-1");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_401_clears_session_and_still_errors() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/cloudpc")
        .with_status(401)
        .with_body(r#"{"error":"invalid token"}"#)
        .create_async()
        .await;

    let (client, session) = test_client(&server);
    session.set("stale-token").unwrap();
    assert!(session.is_present());

    let err = client.list_instances().await.unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired));
    // The teardown happened, but the caller still observed the failure.
    assert!(!session.is_present());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_login_stores_token_for_subsequent_requests() {
    let mut server = Server::new_async().await;
    let login_mock = server
        .mock("POST", "/api/auth/login")
        .match_body(Matcher::Json(json!({
            "email": "a@example.com",
            "password": "pw"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "user": user_json(), "token": "tok1" }).to_string())
        .create_async()
        .await;
    let me_mock = server
        .mock("GET", "/api/auth/me")
        .match_header("authorization", "Bearer tok1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(user_json().to_string())
        .create_async()
        .await;

    let (client, session) = test_client(&server);
    let auth = client.login("a@example.com", "pw").await.unwrap();
    assert_eq!(auth.user.id, "u1");
    assert_eq!(auth.token, "tok1");
    assert!(session.is_present());

    let user = client.current_user().await.unwrap();
    assert_eq!(user.email, "a@example.com");

    login_mock.assert_async().await;
    me_mock.assert_async().await;
}

#[tokio::test]
async fn test_register_authenticates_the_session() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/register")
        .match_body(Matcher::Json(json!({
            "name": "Alice",
            "email": "a@example.com",
            "password": "pw"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "user": user_json(), "token": "fresh" }).to_string())
        .create_async()
        .await;

    let (client, session) = test_client(&server);
    client.register("Alice", "a@example.com", "pw").await.unwrap();
    assert_eq!(session.get(), Some("fresh".to_string()));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_logout_leaves_next_request_unauthenticated() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/cloudpc")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let (client, session) = test_client(&server);
    session.set("tok1").unwrap();
    client.logout().unwrap();
    assert!(!session.is_present());

    client.list_instances().await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_401_failure_propagates_without_touching_session() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/cloudpc/pc-1/start")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let (client, session) = test_client(&server);
    session.set("tok1").unwrap();

    let err = client.start_instance("pc-1").await.unwrap_err();
    match err {
        ApiError::Http { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected Http error, got {:?}", other),
    }
    // A 500 is not a session problem; the token stays.
    assert!(session.is_present());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_succeeds_on_empty_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/api/cloudpc/pc-1")
        .with_status(204)
        .create_async()
        .await;

    let (client, _session) = test_client(&server);
    client.delete_instance("pc-1").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/cloudpc/pc-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("not json")
        .create_async()
        .await;

    let (client, _session) = test_client(&server);
    let err = client.get_instance("pc-1").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_concurrent_start_and_stats_settle_independently() {
    let mut server = Server::new_async().await;
    let start_mock = server
        .mock("POST", "/api/cloudpc/pc-1/start")
        .with_status(500)
        .with_body("host is full")
        .create_async()
        .await;
    let stats_mock = server
        .mock("GET", "/api/cloudpc/pc-1/stats")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "cpuUsage": 10.0,
                "memoryUsage": 20.0,
                "diskUsage": 30.0,
                "networkIn": 1.0,
                "networkOut": 2.0,
                "uptime": "1h"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let (client, session) = test_client(&server);
    session.set("tok1").unwrap();

    // Both dispatched without serialization; one failing does not affect
    // the other's outcome.
    let (start, stats) = tokio::join!(
        client.start_instance("pc-1"),
        client.instance_stats("pc-1")
    );
    assert!(start.is_err());
    let stats = stats.unwrap();
    assert_eq!(stats.uptime, "1h");

    start_mock.assert_async().await;
    stats_mock.assert_async().await;
}

#[tokio::test]
async fn test_connect_returns_handle() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/cloudpc/pc-1/connect")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "connectionUrl": "wss://gw.example.com/session/abc",
                "token": "ticket-1"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let (client, _session) = test_client(&server);
    let conn = client.connect_instance("pc-1").await.unwrap();
    assert_eq!(conn.connection_url, "wss://gw.example.com/session/abc");
    assert_eq!(conn.token, "ticket-1");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_sends_spec_and_decodes_instance() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/cloudpc")
        .match_body(Matcher::Json(json!({
            "name": "dev-box",
            "cpu": 4,
            "memory": 8,
            "storage": 100,
            "os": "Linux"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(instance_json("pc-9", "starting").to_string())
        .create_async()
        .await;

    let (client, _session) = test_client(&server);
    let spec = cloudpc::models::CreateInstanceRequest {
        name: "dev-box".into(),
        cpu: 4,
        memory: 8,
        storage: 100,
        os: cloudpc::models::OsKind::Linux,
    };
    let created = client.create_instance(&spec).await.unwrap();
    assert_eq!(created.id, "pc-9");
    assert_eq!(created.status, cloudpc::models::InstanceStatus::Starting);
    mock.assert_async().await;
}
