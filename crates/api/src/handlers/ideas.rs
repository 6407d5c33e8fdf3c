//! Handlers for ideas and the applications filed against them.
//!
//! Listing and reading ideas is public. The other handlers pass the caller's
//! identity, possibly none, to the service, which rejects anonymous callers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use ideaboard_core::application::CreateApplication;
use ideaboard_core::error::CoreError;
use ideaboard_core::idea::{CreateIdea, IdeaFilter};
use ideaboard_core::types::EntityId;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::MaybeAuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the public idea listing.
#[derive(Debug, Default, Deserialize)]
pub struct IdeaListParams {
    pub category: Option<String>,
    pub is_paid: Option<bool>,
    pub profession: Option<String>,
}

impl TryFrom<IdeaListParams> for IdeaFilter {
    type Error = CoreError;

    fn try_from(params: IdeaListParams) -> Result<Self, Self::Error> {
        Ok(IdeaFilter {
            category: params.category.map(|c| c.trim().parse()).transpose()?,
            is_paid: params.is_paid,
            profession: params.profession.map(|p| p.trim().parse()).transpose()?,
        })
    }
}

// ---------------------------------------------------------------------------
// GET /ideas
// ---------------------------------------------------------------------------

/// List ideas newest first, optionally filtered by category, paid flag, or
/// profession.
pub async fn list_ideas(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<IdeaListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = IdeaFilter::try_from(params)?;
    let ideas = state.service.list_ideas(&filter).await?;
    Ok(Json(DataResponse { data: ideas }))
}

// ---------------------------------------------------------------------------
// POST /ideas
// ---------------------------------------------------------------------------

pub async fn create_idea(
    auth: MaybeAuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateIdea>,
) -> AppResult<impl IntoResponse> {
    let idea = state.service.submit_idea(auth.identity.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: idea })))
}

// ---------------------------------------------------------------------------
// GET /ideas/{id}
// ---------------------------------------------------------------------------

pub async fn get_idea(
    State(state): State<AppState>,
    AppPath(id): AppPath<EntityId>,
) -> AppResult<impl IntoResponse> {
    let idea = state.service.get_idea(id).await?;
    Ok(Json(DataResponse { data: idea }))
}

// ---------------------------------------------------------------------------
// DELETE /ideas/{id}
// ---------------------------------------------------------------------------

/// Delete an idea. Author only. Applications to it are kept.
pub async fn delete_idea(
    auth: MaybeAuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<EntityId>,
) -> AppResult<StatusCode> {
    state.service.delete_idea(auth.identity.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// POST /ideas/{id}/applications
// ---------------------------------------------------------------------------

/// Apply to an idea. The idea id comes from the path; any `ideaId` in the
/// body is ignored.
pub async fn apply_to_idea(
    auth: MaybeAuthUser,
    State(state): State<AppState>,
    AppPath(idea_id): AppPath<EntityId>,
    AppJson(mut input): AppJson<CreateApplication>,
) -> AppResult<impl IntoResponse> {
    input.idea_id = idea_id;
    let application = state
        .service
        .apply_to_idea(auth.identity.as_ref(), input)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: application })))
}

// ---------------------------------------------------------------------------
// GET /ideas/{id}/applications
// ---------------------------------------------------------------------------

/// Applicants of one idea. Author only.
pub async fn list_idea_applications(
    auth: MaybeAuthUser,
    State(state): State<AppState>,
    AppPath(idea_id): AppPath<EntityId>,
) -> AppResult<impl IntoResponse> {
    let applications = state
        .service
        .applicants_for_idea(auth.identity.as_ref(), idea_id)
        .await?;
    Ok(Json(DataResponse { data: applications }))
}
