use std::sync::Arc;

use juggle_core::model::{ModuleId, NewsId, PracticeSessionDraft, SessionId};
use juggle_core::time::fixed_now;
use serde_json::json;
use services::{
    ApiClient, ApiConfig, ApiError, ModuleCatalogService, NewsService, PracticeService,
    UserService,
};
use storage::Storage;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiConfig::with_base_url(server.uri()))
}

fn storage() -> Storage {
    Storage::with_fixtures().unwrap()
}

#[tokio::test]
async fn server_error_falls_back_to_local_modules() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/modules"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let storage = storage();
    let catalog = ModuleCatalogService::new(client(&server), Arc::clone(&storage.modules));
    let modules = catalog.all_modules().await.unwrap();
    assert_eq!(modules.len(), 6);
    assert_eq!(modules[0].id().as_str(), "module-1");
}

#[tokio::test]
async fn malformed_body_falls_back_to_local_news() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let storage = storage();
    let news = NewsService::new(client(&server), Arc::clone(&storage.news));
    assert_eq!(news.all_news().await.unwrap().len(), 6);
}

#[tokio::test]
async fn successful_response_replaces_local_news() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 42,
            "title": "Cascades at the Edge",
            "slug": "cascades-at-the-edge",
            "category": "Juggling & Technology",
            "author": "Sam Lee",
            "date": "2025-05-01",
            "summary": "Edge functions and three-ball rhythm.",
            "content": "Keep the **beat**.",
            "image": "https://example.com/edge.png"
        }])))
        .mount(&server)
        .await;

    let storage = storage();
    let news = NewsService::new(client(&server), Arc::clone(&storage.news));
    let articles = news.all_news().await.unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].id, NewsId::new(42));
    assert_eq!(articles[0].title, "Cascades at the Edge");
}

#[tokio::test]
async fn remote_user_wins_over_local_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "user-9",
            "name": "Remote Learner",
            "email": "remote@example.com",
            "learningStyle": "Activist",
            "level": 2
        })))
        .mount(&server)
        .await;

    let storage = storage();
    let users = UserService::new(client(&server), Arc::clone(&storage.users));
    let user = users.current_user().await.unwrap().unwrap();
    assert_eq!(user.name(), "Remote Learner");
}

#[tokio::test]
async fn publishing_a_session_propagates_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/practice-sessions"))
        .respond_with(ResponseTemplate::new(422))
        .expect(1)
        .mount(&server)
        .await;

    let storage = storage();
    let practice = PracticeService::new(client(&server), Arc::clone(&storage.sessions));
    assert!(practice.can_publish());

    let session = PracticeSessionDraft::new(ModuleId::new("module-1"), 10, 3)
        .validate(SessionId::new("session-99"), fixed_now())
        .unwrap();
    let err = practice.publish(&session).await.unwrap_err();
    assert!(matches!(err, ApiError::HttpStatus(status) if status.as_u16() == 422));
}

#[tokio::test]
async fn publishing_a_session_succeeds_on_2xx() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/practice-sessions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let storage = storage();
    let practice = PracticeService::new(client(&server), Arc::clone(&storage.sessions));
    let session = PracticeSessionDraft::new(ModuleId::new("module-1"), 10, 3)
        .validate(SessionId::new("session-99"), fixed_now())
        .unwrap();
    practice.publish(&session).await.unwrap();
}

#[tokio::test]
async fn health_reflects_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert!(client(&server).health().await);
    assert!(!ApiClient::offline().health().await);
}
