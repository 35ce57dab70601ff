//! Integration tests for the session lifecycle against a mock server.

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use client::services::{
    auth::{AuthSession, Session, SessionState},
    hierarchy::{BoardDirectory, ViewError},
    http::{ApiClient, ApiError},
    notify::{NoticeLevel, NoticeSender},
};
use serde_json::json;
use tempfile::TempDir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

fn fake_jwt(user_id: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"{user_id}"}}"#));
    format!("{header}.{payload}.sig")
}

fn harness(server: &MockServer, dir: &TempDir) -> (Arc<Session>, AuthSession) {
    let session = Arc::new(Session::load(dir.path().join("token")));
    let client = ApiClient::new(&server.uri(), session.clone());
    let (notices, _rx) = NoticeSender::channel(16);
    (session, AuthSession::new(client, notices))
}

#[tokio::test]
async fn login_stores_token_in_memory_and_file() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let token = fake_jwt(7);

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"username": "alice", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": token})))
        .expect(1)
        .mount(&server)
        .await;

    let (session, auth) = harness(&server, &dir);
    assert!(auth.login("alice", "pw").await);

    assert!(session.is_authenticated().await);
    assert_eq!(session.user_id().await, Some(7));
    let stored = std::fs::read_to_string(dir.path().join("token")).unwrap();
    assert_eq!(stored, token);
}

#[tokio::test]
async fn failed_login_preserves_existing_session() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let stored = fake_jwt(7);
    std::fs::write(dir.path().join("token"), &stored).unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"msg": "Bad username or password"})),
        )
        .mount(&server)
        .await;

    let session = Arc::new(Session::load(dir.path().join("token")));
    let client = ApiClient::new(&server.uri(), session.clone());
    let (notices, mut rx) = NoticeSender::channel(16);
    let auth = AuthSession::new(client, notices);

    assert!(!auth.login("alice", "wrong").await);

    assert_eq!(session.state().await, SessionState::Authenticated);
    let on_disk = std::fs::read_to_string(dir.path().join("token")).unwrap();
    assert_eq!(on_disk, stored);

    let notice = rx.recv().await.unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Bad username or password");
}

#[tokio::test]
async fn logout_clears_token_from_any_state() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("token"), fake_jwt(7)).unwrap();

    let (session, auth) = harness(&server, &dir);
    assert!(session.is_authenticated().await);

    auth.logout().await;
    assert_eq!(session.state().await, SessionState::Anonymous);
    assert!(!dir.path().join("token").exists());

    // Logging out while already anonymous stays a no-op.
    auth.logout().await;
    assert_eq!(session.state().await, SessionState::Anonymous);
}

#[tokio::test]
async fn register_succeeds_without_authenticating() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "pw"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "msg": "User registered successfully",
            "user_id": 5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (session, auth) = harness(&server, &dir);
    assert!(auth.register("alice", "alice@example.com", "pw").await);

    assert_eq!(session.state().await, SessionState::Anonymous);
    assert!(!dir.path().join("token").exists());
}

#[tokio::test]
async fn register_validation_rejects_empty_fields_locally() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let (_session, auth) = harness(&server, &dir);
    assert!(!auth.register("", "alice@example.com", "pw").await);
    assert!(!auth.register("alice", "alice@example.com", "").await);
    assert!(!auth.login("   ", "pw").await);

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn protected_401_forces_session_anonymous() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("token"), fake_jwt(7)).unwrap();

    Mock::given(method("GET"))
        .and(path("/boards"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"msg": "Token has expired"})),
        )
        .mount(&server)
        .await;

    let session = Arc::new(Session::load(dir.path().join("token")));
    let client = ApiClient::new(&server.uri(), session.clone());
    let directory = BoardDirectory::new(client);

    let result = directory.load().await;
    assert!(matches!(result, Err(ViewError::NavigateUp(ApiError::Auth(_)))));

    assert_eq!(session.state().await, SessionState::Anonymous);
    assert!(!dir.path().join("token").exists());
}
