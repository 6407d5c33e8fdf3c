//! "My" listings for the authenticated caller.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /me/ideas -- the caller's ideas with their application counts.
pub async fn my_ideas(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let identity = &auth.identity;
    let ideas = state
        .service
        .my_idea_summaries(&identity.id, Some(identity))
        .await?;
    Ok(Json(DataResponse { data: ideas }))
}

/// GET /me/applications -- applications the caller has submitted.
pub async fn my_applications(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let identity = &auth.identity;
    let applications = state
        .service
        .my_applications(&identity.id, Some(identity))
        .await?;
    Ok(Json(DataResponse { data: applications }))
}

/// GET /me/applicants -- applications to any idea the caller authors.
pub async fn my_applicants(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let identity = &auth.identity;
    let applications = state
        .service
        .applicants_for_my_ideas(&identity.id, Some(identity))
        .await?;
    Ok(Json(DataResponse { data: applications }))
}
