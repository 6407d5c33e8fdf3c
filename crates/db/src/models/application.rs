//! Application row model.

use ideaboard_core::application::Application;
use ideaboard_core::error::CoreError;
use ideaboard_core::types::{EntityId, Timestamp};
use sqlx::FromRow;

/// A row from the `applications` table.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationRow {
    pub id: EntityId,
    pub idea_id: EntityId,
    pub idea_title: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub cover_letter: String,
    pub cv_link: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = CoreError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let status = row.status.parse().map_err(|err| {
            CoreError::Internal(format!(
                "application {} has an invalid stored status: {err}",
                row.id
            ))
        })?;
        Ok(Application {
            id: row.id,
            idea_id: row.idea_id,
            idea_title: row.idea_title,
            user_id: row.user_id,
            name: row.name,
            email: row.email,
            cover_letter: row.cover_letter,
            cv_link: row.cv_link,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
