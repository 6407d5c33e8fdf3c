//! Idea row model.

use ideaboard_core::error::CoreError;
use ideaboard_core::idea::{Idea, IdeaAuthor, Profession};
use ideaboard_core::types::{EntityId, Timestamp};
use sqlx::FromRow;

/// A row from the `ideas` table. Catalogue values are stored as their
/// canonical strings.
#[derive(Debug, Clone, FromRow)]
pub struct IdeaRow {
    pub id: EntityId,
    pub title: String,
    pub short_description: String,
    pub long_description: String,
    pub category: String,
    pub time_required: String,
    pub is_paid: bool,
    pub members_needed: i32,
    pub professions: Vec<String>,
    pub author_id: String,
    pub author_name: String,
    pub author_email: String,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

impl TryFrom<IdeaRow> for Idea {
    type Error = CoreError;

    fn try_from(row: IdeaRow) -> Result<Self, Self::Error> {
        let professions = row
            .professions
            .iter()
            .map(|p| p.parse::<Profession>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(corrupt(row.id))?;

        Ok(Idea {
            id: row.id,
            category: row.category.parse().map_err(corrupt(row.id))?,
            time_required: row.time_required.parse().map_err(corrupt(row.id))?,
            title: row.title,
            short_description: row.short_description,
            long_description: row.long_description,
            is_paid: row.is_paid,
            members_needed: row.members_needed,
            professions,
            author: IdeaAuthor {
                id: row.author_id,
                name: row.author_name,
                email: row.author_email,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A stored value outside its catalogue is a storage fault, not bad input.
fn corrupt(id: EntityId) -> impl Fn(CoreError) -> CoreError {
    move |err| CoreError::Internal(format!("idea {id} has an invalid stored value: {err}"))
}
