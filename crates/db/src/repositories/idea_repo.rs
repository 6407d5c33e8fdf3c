//! Repository for the `ideas` table.

use async_trait::async_trait;
use ideaboard_core::error::CoreError;
use ideaboard_core::idea::Idea;
use ideaboard_core::ports::IdeaRepository;
use ideaboard_core::types::EntityId;
use sqlx::PgPool;

use crate::map_sqlx_error;
use crate::models::idea::IdeaRow;

/// Column list for `ideas` queries.
const COLUMNS: &str = "\
    id, title, short_description, long_description, category, time_required, \
    is_paid, members_needed, professions, author_id, author_name, author_email, \
    created_at, updated_at";

/// Provides CRUD operations for ideas.
pub struct IdeaRepo;

impl IdeaRepo {
    /// Insert a fully-built idea, returning the stored row.
    pub async fn insert(pool: &PgPool, idea: &Idea) -> Result<IdeaRow, sqlx::Error> {
        let professions: Vec<&str> = idea.professions.iter().map(|p| p.as_str()).collect();
        let query = format!(
            "INSERT INTO ideas \
                (id, title, short_description, long_description, category, time_required, \
                 is_paid, members_needed, professions, author_id, author_name, author_email, \
                 created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IdeaRow>(&query)
            .bind(idea.id)
            .bind(&idea.title)
            .bind(&idea.short_description)
            .bind(&idea.long_description)
            .bind(idea.category.as_str())
            .bind(idea.time_required.as_str())
            .bind(idea.is_paid)
            .bind(idea.members_needed)
            .bind(&professions)
            .bind(&idea.author.id)
            .bind(&idea.author.name)
            .bind(&idea.author.email)
            .bind(idea.created_at)
            .bind(idea.updated_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<IdeaRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ideas WHERE id = $1");
        sqlx::query_as::<_, IdeaRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all ideas, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<IdeaRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ideas ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, IdeaRow>(&query).fetch_all(pool).await
    }

    /// List one author's ideas, newest first.
    pub async fn list_by_author(pool: &PgPool, author_id: &str) -> Result<Vec<IdeaRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ideas WHERE author_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, IdeaRow>(&query)
            .bind(author_id)
            .fetch_all(pool)
            .await
    }

    /// Delete an idea. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ideas WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// [`IdeaRepository`] over Postgres.
#[derive(Clone)]
pub struct PgIdeaRepository {
    pool: PgPool,
}

impl PgIdeaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_ideas(rows: Vec<IdeaRow>) -> Result<Vec<Idea>, CoreError> {
    rows.into_iter().map(Idea::try_from).collect()
}

#[async_trait]
impl IdeaRepository for PgIdeaRepository {
    async fn insert(&self, idea: &Idea) -> Result<Idea, CoreError> {
        let row = IdeaRepo::insert(&self.pool, idea).await.map_err(map_sqlx_error)?;
        Idea::try_from(row)
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Idea>, CoreError> {
        IdeaRepo::find_by_id(&self.pool, id)
            .await
            .map_err(map_sqlx_error)?
            .map(Idea::try_from)
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<Idea>, CoreError> {
        into_ideas(IdeaRepo::list(&self.pool).await.map_err(map_sqlx_error)?)
    }

    async fn list_by_author(&self, author_id: &str) -> Result<Vec<Idea>, CoreError> {
        into_ideas(
            IdeaRepo::list_by_author(&self.pool, author_id)
                .await
                .map_err(map_sqlx_error)?,
        )
    }

    async fn delete(&self, id: EntityId) -> Result<bool, CoreError> {
        IdeaRepo::delete(&self.pool, id).await.map_err(map_sqlx_error)
    }

    async fn ping(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool).await.map_err(map_sqlx_error)
    }
}
