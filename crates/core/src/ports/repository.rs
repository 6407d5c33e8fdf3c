//! Repository ports: persistence abstraction for ideas and applications.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::application::{Application, ApplicationStatus};
use crate::error::CoreError;
use crate::idea::Idea;
use crate::types::{EntityId, Timestamp};

/// Idea persistence.
///
/// Implementations perform no validation or authorization; that is the
/// store's job. Listings are returned newest first.
#[async_trait]
pub trait IdeaRepository: Send + Sync {
    /// Persist a fully-built idea and return the stored record.
    async fn insert(&self, idea: &Idea) -> Result<Idea, CoreError>;

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Idea>, CoreError>;

    /// Every idea, newest first.
    async fn list_all(&self) -> Result<Vec<Idea>, CoreError>;

    /// Ideas authored by `author_id`, newest first.
    async fn list_by_author(&self, author_id: &str) -> Result<Vec<Idea>, CoreError>;

    /// Remove an idea. Returns `false` when nothing was deleted.
    async fn delete(&self, id: EntityId) -> Result<bool, CoreError>;

    /// Cheap liveness check.
    async fn ping(&self) -> Result<(), CoreError>;
}

/// Application persistence.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn insert(&self, application: &Application) -> Result<Application, CoreError>;

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Application>, CoreError>;

    /// Applications submitted by `user_id`, newest first.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Application>, CoreError>;

    /// Applications targeting any of `idea_ids`, newest first.
    async fn list_by_ideas(&self, idea_ids: &[EntityId]) -> Result<Vec<Application>, CoreError>;

    /// Number of applications per idea. Ideas without applications may be
    /// absent from the map.
    async fn count_by_ideas(
        &self,
        idea_ids: &[EntityId],
    ) -> Result<HashMap<EntityId, i64>, CoreError>;

    /// Atomically set `status = next` and `updated_at = at` only if the
    /// current status is `expected`. Returns the updated record, or `None`
    /// when the record is missing or its status no longer matches.
    async fn compare_and_set_status(
        &self,
        id: EntityId,
        expected: ApplicationStatus,
        next: ApplicationStatus,
        at: Timestamp,
    ) -> Result<Option<Application>, CoreError>;

    async fn ping(&self) -> Result<(), CoreError>;
}
