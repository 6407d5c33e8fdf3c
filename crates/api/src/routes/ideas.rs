//! Mounted at `/ideas` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::ideas;
use crate::state::AppState;

/// ```text
/// GET    /                    -> list_ideas
/// POST   /                    -> create_idea
/// GET    /{id}                -> get_idea
/// DELETE /{id}                -> delete_idea
/// POST   /{id}/applications   -> apply_to_idea
/// GET    /{id}/applications   -> list_idea_applications
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(ideas::list_ideas).post(ideas::create_idea))
        .route("/{id}", get(ideas::get_idea).delete(ideas::delete_idea))
        .route(
            "/{id}/applications",
            get(ideas::list_idea_applications).post(ideas::apply_to_idea),
        )
}
