//! Repository for the `applications` table.

use std::collections::HashMap;

use async_trait::async_trait;
use ideaboard_core::application::{Application, ApplicationStatus};
use ideaboard_core::error::CoreError;
use ideaboard_core::ports::ApplicationRepository;
use ideaboard_core::types::{EntityId, Timestamp};
use sqlx::PgPool;

use crate::map_sqlx_error;
use crate::models::application::ApplicationRow;

/// Column list for `applications` queries.
const COLUMNS: &str = "\
    id, idea_id, idea_title, user_id, name, email, cover_letter, cv_link, \
    status, created_at, updated_at";

/// Provides CRUD operations for applications.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Insert a fully-built application, returning the stored row.
    pub async fn insert(
        pool: &PgPool,
        application: &Application,
    ) -> Result<ApplicationRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO applications \
                (id, idea_id, idea_title, user_id, name, email, cover_letter, cv_link, \
                 status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(application.id)
            .bind(application.idea_id)
            .bind(&application.idea_title)
            .bind(&application.user_id)
            .bind(&application.name)
            .bind(&application.email)
            .bind(&application.cover_letter)
            .bind(&application.cv_link)
            .bind(application.status.as_str())
            .bind(application.created_at)
            .bind(application.updated_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: EntityId,
    ) -> Result<Option<ApplicationRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1");
        sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one applicant's applications, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<ApplicationRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM applications WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List applications to any of the given ideas, newest first.
    pub async fn list_by_ideas(
        pool: &PgPool,
        idea_ids: &[EntityId],
    ) -> Result<Vec<ApplicationRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM applications WHERE idea_id = ANY($1) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(idea_ids)
            .fetch_all(pool)
            .await
    }

    /// Count applications per idea. Ideas with no applications are omitted.
    pub async fn count_by_ideas(
        pool: &PgPool,
        idea_ids: &[EntityId],
    ) -> Result<Vec<(EntityId, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (EntityId, i64)>(
            "SELECT idea_id, COUNT(*) FROM applications \
             WHERE idea_id = ANY($1) GROUP BY idea_id",
        )
        .bind(idea_ids)
        .fetch_all(pool)
        .await
    }

    /// Set the status only if it still equals `expected`. Returns the updated
    /// row, or `None` if the row is missing or was changed by someone else.
    pub async fn compare_and_set_status(
        pool: &PgPool,
        id: EntityId,
        expected: &str,
        next: &str,
        at: Timestamp,
    ) -> Result<Option<ApplicationRow>, sqlx::Error> {
        let query = format!(
            "UPDATE applications SET status = $3, updated_at = $4 \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(id)
            .bind(expected)
            .bind(next)
            .bind(at)
            .fetch_optional(pool)
            .await
    }
}

/// [`ApplicationRepository`] over Postgres.
#[derive(Clone)]
pub struct PgApplicationRepository {
    pool: PgPool,
}

impl PgApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_applications(rows: Vec<ApplicationRow>) -> Result<Vec<Application>, CoreError> {
    rows.into_iter().map(Application::try_from).collect()
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    async fn insert(&self, application: &Application) -> Result<Application, CoreError> {
        let row = ApplicationRepo::insert(&self.pool, application)
            .await
            .map_err(map_sqlx_error)?;
        Application::try_from(row)
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Application>, CoreError> {
        ApplicationRepo::find_by_id(&self.pool, id)
            .await
            .map_err(map_sqlx_error)?
            .map(Application::try_from)
            .transpose()
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Application>, CoreError> {
        into_applications(
            ApplicationRepo::list_by_user(&self.pool, user_id)
                .await
                .map_err(map_sqlx_error)?,
        )
    }

    async fn list_by_ideas(&self, idea_ids: &[EntityId]) -> Result<Vec<Application>, CoreError> {
        into_applications(
            ApplicationRepo::list_by_ideas(&self.pool, idea_ids)
                .await
                .map_err(map_sqlx_error)?,
        )
    }

    async fn count_by_ideas(
        &self,
        idea_ids: &[EntityId],
    ) -> Result<HashMap<EntityId, i64>, CoreError> {
        let counts = ApplicationRepo::count_by_ideas(&self.pool, idea_ids)
            .await
            .map_err(map_sqlx_error)?;
        Ok(counts.into_iter().collect())
    }

    async fn compare_and_set_status(
        &self,
        id: EntityId,
        expected: ApplicationStatus,
        next: ApplicationStatus,
        at: Timestamp,
    ) -> Result<Option<Application>, CoreError> {
        ApplicationRepo::compare_and_set_status(
            &self.pool,
            id,
            expected.as_str(),
            next.as_str(),
            at,
        )
        .await
        .map_err(map_sqlx_error)?
        .map(Application::try_from)
        .transpose()
    }

    async fn ping(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool).await.map_err(map_sqlx_error)
    }
}
