pub mod applications;
pub mod health;
pub mod ideas;
pub mod me;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /ideas                              list, submit
/// /ideas/{id}                         get, delete
/// /ideas/{id}/applications            apply, list applicants (author)
/// /applications/{id}/status           decide (author)
/// /me/ideas                           my ideas with counts
/// /me/applications                    my applications
/// /me/applicants                      applicants to my ideas
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/ideas", ideas::router())
        .nest("/applications", applications::router())
        .nest("/me", me::router())
}
