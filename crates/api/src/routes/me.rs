//! Mounted at `/me` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::me;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ideas", get(me::my_ideas))
        .route("/applications", get(me::my_applications))
        .route("/applicants", get(me::my_applicants))
}
