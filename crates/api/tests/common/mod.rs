//! Shared helpers for API integration tests.
//!
//! The app runs over in-memory repositories; each test builds its own
//! [`TestApp`] so state never leaks between tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use ideaboard_api::auth::jwt::{generate_identity_token, IdentityConfig};
use ideaboard_api::config::ServerConfig;
use ideaboard_api::router::build_app_router;
use ideaboard_api::state::AppState;
use ideaboard_core::identity::Identity;
use ideaboard_core::service::{MarketplaceService, ServiceConfig};
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

pub struct TestApp {
    pub router: Router,
    pub config: ServerConfig,
}

impl TestApp {
    /// Bearer token for `identity`, signed with the test secret.
    pub fn token_for(&self, identity: &Identity) -> String {
        generate_identity_token(identity, &self.config.identity).expect("token generation")
    }
}

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_timeout_ms: 5_000,
        database_url: None,
        db_max_connections: 1,
        identity: IdentityConfig {
            secret: TEST_SECRET.to_string(),
            token_expiry_mins: 15,
        },
    }
}

/// Build the full router (same middleware as production) over a given service.
pub fn build_test_app_with(service: MarketplaceService) -> TestApp {
    let config = test_config();
    let state = AppState {
        service: Arc::new(service),
        config: Arc::new(config.clone()),
    };
    let router = build_app_router(state, &config).expect("valid test config");
    TestApp { router, config }
}

pub fn build_test_app() -> TestApp {
    build_test_app_with(MarketplaceService::in_memory(ServiceConfig::default()))
}

pub fn john() -> Identity {
    Identity::new("user-1", "John Doe", "john@example.com")
}

pub fn jane() -> Identity {
    Identity::new("user-2", "Jane Smith", "jane@example.com")
}

pub fn idea_body(title: &str) -> Value {
    serde_json::json!({
        "title": title,
        "shortDescription": "Personalized recipes from the ingredients you have.",
        "longDescription": "An app that uses AI to generate custom recipes.",
        "category": "Technology",
        "timeRequired": "1-3 months",
        "isPaid": false,
        "membersNeeded": 3,
        "professions": ["Developer", "Designer"]
    })
}

pub fn application_body() -> Value {
    serde_json::json!({
        "coverLetter": "I have experience with AI development.",
        "cvLink": "https://example.com/resume_jane_smith.pdf"
    })
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: &TestApp,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

pub async fn get(app: &TestApp, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_as(app: &TestApp, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: &TestApp, uri: &str, token: Option<&str>, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn patch_json(app: &TestApp, uri: &str, token: Option<&str>, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, token, Some(body)).await
}

pub async fn delete(app: &TestApp, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, uri, token, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Submit an idea as `author` and return its id.
pub async fn create_idea(app: &TestApp, author: &Identity, title: &str) -> String {
    let token = app.token_for(author);
    let response = post_json(app, "/api/v1/ideas", Some(&token), idea_body(title)).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Apply to `idea_id` as `applicant` and return the application id.
pub async fn apply(app: &TestApp, applicant: &Identity, idea_id: &str) -> String {
    let token = app.token_for(applicant);
    let uri = format!("/api/v1/ideas/{idea_id}/applications");
    let response = post_json(app, &uri, Some(&token), application_body()).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}
