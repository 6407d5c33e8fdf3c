//! Handler for deciding an application.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use ideaboard_core::application::DecideApplication;
use ideaboard_core::policy;
use ideaboard_core::types::EntityId;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::MaybeAuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// PATCH /applications/{id}/status
// ---------------------------------------------------------------------------

/// Accept or reject a pending application. Only the author of the idea it
/// targets may decide, and only once; a second decision is a 409.
///
/// Anonymous callers are turned away before the body is interpreted.
pub async fn decide_application(
    auth: MaybeAuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<EntityId>,
    AppJson(input): AppJson<DecideApplication>,
) -> AppResult<impl IntoResponse> {
    let requester = auth.identity.as_ref();
    policy::is_authenticated(requester).enforce("decide application")?;
    let decision = input.parse()?;
    let application = state
        .service
        .decide_application(requester, id, decision)
        .await?;
    Ok(Json(DataResponse { data: application }))
}
