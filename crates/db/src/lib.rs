//! Postgres persistence for ideas and applications.
//!
//! [`repositories`] holds the query structs and the adapters implementing the
//! `ideaboard-core` repository ports.

pub mod models;
pub mod repositories;

use ideaboard_core::error::CoreError;
use sqlx::postgres::PgPoolOptions;

pub use repositories::{PgApplicationRepository, PgIdeaRepository};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to verify the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// Map a driver error onto the domain taxonomy. Connection-level failures
/// are retryable; everything else is internal.
pub fn map_sqlx_error(err: sqlx::Error) -> CoreError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            tracing::warn!(error = %err, "Database unavailable");
            CoreError::Transient(format!("database unavailable: {err}"))
        }
        other => {
            tracing::error!(error = %other, "Database error");
            CoreError::Internal(format!("database error: {other}"))
        }
    }
}
