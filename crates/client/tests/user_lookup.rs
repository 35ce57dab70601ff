//! Integration tests for the incremental user lookup.

use std::collections::HashSet;
use std::sync::Arc;

use client::services::{auth::Session, http::ApiClient, user_lookup::UserLookupAssistant};
use serde_json::json;
use tempfile::TempDir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn assistant_for(server: &MockServer, dir: &TempDir) -> UserLookupAssistant {
    let session = Arc::new(Session::load(dir.path().join("token")));
    UserLookupAssistant::new(ApiClient::new(&server.uri(), session))
}

fn user_json(id: i64, username: &str) -> serde_json::Value {
    json!({"id": id, "username": username, "email": format!("{username}@example.com")})
}

#[tokio::test]
async fn short_query_is_hidden_and_never_hits_the_network() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let mut assistant = assistant_for(&server, &dir);

    assistant.input("a", &HashSet::new()).await.unwrap();
    assert!(assistant.suggestions().is_empty());
    assert!(!assistant.dropdown_open());

    // Trimming applies before the length check.
    assistant.input("  b  ", &HashSet::new()).await.unwrap();
    assert!(assistant.suggestions().is_empty());

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn already_assigned_users_never_surface() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/users/search"))
        .and(query_param("q", "al"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([user_json(1, "alice"), user_json(2, "albert")])),
        )
        .mount(&server)
        .await;

    let mut assistant = assistant_for(&server, &dir);
    let already = HashSet::from([1]);
    assistant.input("al", &already).await.unwrap();

    assert!(assistant.dropdown_open());
    assert_eq!(assistant.suggestions().len(), 1);
    assert_eq!(assistant.suggestions()[0].id, 2);
}

#[tokio::test]
async fn repeated_query_is_deduplicated() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/users/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([user_json(1, "alice")])))
        .expect(1)
        .mount(&server)
        .await;

    let mut assistant = assistant_for(&server, &dir);
    assistant.input("al", &HashSet::new()).await.unwrap();
    assistant.input("al ", &HashSet::new()).await.unwrap();

    assert!(assistant.dropdown_open());
    assert_eq!(assistant.suggestions().len(), 1);
}

#[tokio::test]
async fn pick_stages_candidate_and_confirm_hands_it_over() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/users/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([user_json(1, "alice"), user_json(2, "albert")])),
        )
        .mount(&server)
        .await;

    let mut assistant = assistant_for(&server, &dir);
    assistant.input("al", &HashSet::new()).await.unwrap();

    assert!(assistant.pick(2));
    assert_eq!(assistant.input_value(), "albert");
    assert_eq!(assistant.candidate().unwrap().id, 2);
    assert!(!assistant.dropdown_open());
    assert!(assistant.suggestions().is_empty());

    assert_eq!(assistant.confirm(), Some(2));
    assert!(assistant.input_value().is_empty());
    assert!(assistant.candidate().is_none());

    // A second confirm has nothing staged.
    assert_eq!(assistant.confirm(), None);
}

#[tokio::test]
async fn pick_of_unknown_id_is_rejected() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/users/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([user_json(1, "alice")])))
        .mount(&server)
        .await;

    let mut assistant = assistant_for(&server, &dir);
    assistant.input("al", &HashSet::new()).await.unwrap();
    assert!(!assistant.pick(99));
    assert!(assistant.candidate().is_none());
}

#[tokio::test]
async fn outside_click_closes_dropdown_but_keeps_candidate() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/users/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([user_json(1, "alice")])))
        .mount(&server)
        .await;

    let mut assistant = assistant_for(&server, &dir);
    assistant.input("al", &HashSet::new()).await.unwrap();
    assert!(assistant.dropdown_open());

    assistant.pick(1);
    assistant.click_outside().await;

    assert!(!assistant.dropdown_open());
    assert_eq!(assistant.candidate().unwrap().id, 1);
}

#[tokio::test]
async fn lookup_failure_clears_and_closes() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/users/search"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"msg": "boom"})))
        .mount(&server)
        .await;

    let mut assistant = assistant_for(&server, &dir);
    assert!(assistant.input("al", &HashSet::new()).await.is_err());
    assert!(assistant.suggestions().is_empty());
    assert!(!assistant.dropdown_open());
}
