//! Integration tests for applying to ideas and deciding applications.

mod common;

use axum::http::StatusCode;
use common::{
    application_body, apply, body_json, create_idea, delete, get_as, jane, john, patch_json,
    post_json,
};
use ideaboard_core::identity::Identity;
use serde_json::json;

fn status_uri(application_id: &str) -> String {
    format!("/api/v1/applications/{application_id}/status")
}

#[tokio::test]
async fn full_lifecycle_accept_then_reject_conflicts() {
    let app = common::build_test_app();
    let idea_id = create_idea(&app, &john(), "AI-Powered Recipe Generator").await;

    let response = post_json(
        &app,
        &format!("/api/v1/ideas/{idea_id}/applications"),
        Some(&app.token_for(&jane())),
        application_body(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await["data"].clone();
    assert_eq!(created["status"], "pending");
    assert_eq!(created["ideaTitle"], "AI-Powered Recipe Generator");
    assert_eq!(created["name"], "Jane Smith");
    assert_eq!(created["email"], "jane@example.com");
    assert_eq!(created["userId"], "user-2");
    let app_id = created["id"].as_str().unwrap().to_string();

    let owner = app.token_for(&john());
    let response = patch_json(&app, &status_uri(&app_id), Some(&owner), json!({"decision": "accepted"})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "accepted");

    let response = patch_json(&app, &status_uri(&app_id), Some(&owner), json!({"decision": "rejected"})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "INVALID_TRANSITION");

    let mine = body_json(get_as(&app, "/api/v1/me/applications", &app.token_for(&jane())).await).await;
    assert_eq!(mine["data"][0]["status"], "accepted");
}

#[tokio::test]
async fn anonymous_apply_is_unauthorized() {
    let app = common::build_test_app();
    let idea_id = create_idea(&app, &john(), "Idea").await;

    let response = post_json(
        &app,
        &format!("/api/v1/ideas/{idea_id}/applications"),
        None,
        application_body(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let applicants = body_json(get_as(&app, "/api/v1/me/applicants", &app.token_for(&john())).await).await;
    assert_eq!(applicants["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn applying_to_a_missing_idea_is_not_found() {
    let app = common::build_test_app();
    let response = post_json(
        &app,
        &format!("/api/v1/ideas/{}/applications", uuid::Uuid::now_v7()),
        Some(&app.token_for(&jane())),
        application_body(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_application_fields_are_rejected() {
    let app = common::build_test_app();
    let idea_id = create_idea(&app, &john(), "Idea").await;
    let uri = format!("/api/v1/ideas/{idea_id}/applications");
    let token = app.token_for(&jane());

    let mut body = application_body();
    body["coverLetter"] = "   ".into();
    let response = post_json(&app, &uri, Some(&token), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let mut body = application_body();
    body["cvLink"] = "resume.pdf".into();
    let response = post_json(&app, &uri, Some(&token), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn supplied_contact_details_are_kept() {
    let app = common::build_test_app();
    let idea_id = create_idea(&app, &john(), "Idea").await;

    let mut body = application_body();
    body["name"] = "J. Smith".into();
    body["email"] = "work@jsmith.example".into();
    let response = post_json(
        &app,
        &format!("/api/v1/ideas/{idea_id}/applications"),
        Some(&app.token_for(&jane())),
        body,
    )
    .await;
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["name"], "J. Smith");
    assert_eq!(data["email"], "work@jsmith.example");
    assert_eq!(data["userId"], "user-2");
}

#[tokio::test]
async fn applicant_cannot_decide_their_own_application() {
    let app = common::build_test_app();
    let idea_id = create_idea(&app, &john(), "Idea").await;
    let app_id = apply(&app, &jane(), &idea_id).await;

    let response = patch_json(
        &app,
        &status_uri(&app_id),
        Some(&app.token_for(&jane())),
        json!({"decision": "accepted"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = patch_json(&app, &status_uri(&app_id), None, json!({"decision": "accepted"})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn pending_is_not_a_decision() {
    let app = common::build_test_app();
    let idea_id = create_idea(&app, &john(), "Idea").await;
    let app_id = apply(&app, &jane(), &idea_id).await;

    let response = patch_json(
        &app,
        &status_uri(&app_id),
        Some(&app.token_for(&john())),
        json!({"status": "pending"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn anonymous_decision_is_unauthorized_whatever_the_body() {
    let app = common::build_test_app();
    let idea_id = create_idea(&app, &john(), "Idea").await;
    let app_id = apply(&app, &jane(), &idea_id).await;

    for body in [json!({"status": "pending"}), json!({"decision": "accepted"})] {
        let response = patch_json(&app, &status_uri(&app_id), None, body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn deciding_a_missing_application_is_not_found() {
    let app = common::build_test_app();
    let response = patch_json(
        &app,
        &status_uri(&uuid::Uuid::now_v7().to_string()),
        Some(&app.token_for(&john())),
        json!({"decision": "accepted"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["error"].as_str().unwrap().starts_with("Application"));
}

#[tokio::test]
async fn deleted_idea_leaves_a_dangling_application_nobody_can_decide() {
    let app = common::build_test_app();
    let idea_id = create_idea(&app, &john(), "Doomed").await;
    let app_id = apply(&app, &jane(), &idea_id).await;
    let owner = app.token_for(&john());

    let response = delete(&app, &format!("/api/v1/ideas/{idea_id}"), Some(&owner)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let mine = body_json(get_as(&app, "/api/v1/me/applications", &app.token_for(&jane())).await).await;
    assert_eq!(mine["data"][0]["ideaId"], idea_id.as_str());
    assert_eq!(mine["data"][0]["ideaTitle"], "Doomed");

    let response = patch_json(&app, &status_uri(&app_id), Some(&owner), json!({"decision": "rejected"})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn applicants_are_visible_to_the_idea_author_only() {
    let app = common::build_test_app();
    let idea_id = create_idea(&app, &john(), "Idea").await;
    let sam = Identity::new("user-3", "Sam Wilson", "sam@example.com");
    apply(&app, &jane(), &idea_id).await;
    apply(&app, &sam, &idea_id).await;

    let uri = format!("/api/v1/ideas/{idea_id}/applications");
    let json = body_json(get_as(&app, &uri, &app.token_for(&john())).await).await;
    let applicants = json["data"].as_array().unwrap();
    assert_eq!(applicants.len(), 2);
    assert_eq!(applicants[0]["userId"], "user-3");

    let response = get_as(&app, &uri, &app.token_for(&jane())).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(get_as(&app, "/api/v1/me/applicants", &app.token_for(&john())).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    let json = body_json(get_as(&app, "/api/v1/me/applicants", &app.token_for(&jane())).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}
