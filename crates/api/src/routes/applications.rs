//! Mounted at `/applications` by `api_routes()`.

use axum::routing::patch;
use axum::Router;

use crate::handlers::applications;
use crate::state::AppState;

/// ```text
/// PATCH  /{id}/status         -> decide_application
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/status", patch(applications::decide_application))
}
