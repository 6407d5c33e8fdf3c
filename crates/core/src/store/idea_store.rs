use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::error::CoreError;
use crate::idea::{CreateIdea, Idea, IdeaFilter};
use crate::identity::Identity;
use crate::policy;
use crate::ports::IdeaRepository;
use crate::types::EntityId;

use super::{authenticated, bounded, enforce};

/// Idea records behind validation and ownership checks.
#[derive(Clone)]
pub struct IdeaStore {
    repo: Arc<dyn IdeaRepository>,
    timeout: Duration,
}

impl IdeaStore {
    pub fn new(repo: Arc<dyn IdeaRepository>, timeout: Duration) -> Self {
        Self { repo, timeout }
    }

    /// Validate and persist a new idea authored by `requester`.
    pub async fn create(
        &self,
        requester: Option<&Identity>,
        input: CreateIdea,
    ) -> Result<Idea, CoreError> {
        let author = authenticated(policy::can_create_idea(requester), requester, "create idea")?;
        let new = input.into_new_idea()?;
        let idea = Idea::new(new, author, Utc::now());
        bounded(self.timeout, "insert idea", self.repo.insert(&idea)).await
    }

    /// Every idea, newest first.
    pub async fn list(&self) -> Result<Vec<Idea>, CoreError> {
        bounded(self.timeout, "list ideas", self.repo.list_all()).await
    }

    pub async fn list_filtered(&self, filter: &IdeaFilter) -> Result<Vec<Idea>, CoreError> {
        let ideas = self.list().await?;
        if filter.is_empty() {
            return Ok(ideas);
        }
        Ok(ideas.into_iter().filter(|idea| filter.matches(idea)).collect())
    }

    pub async fn list_by_author(&self, author_id: &str) -> Result<Vec<Idea>, CoreError> {
        bounded(
            self.timeout,
            "list ideas by author",
            self.repo.list_by_author(author_id),
        )
        .await
    }

    pub async fn get(&self, id: EntityId) -> Result<Idea, CoreError> {
        bounded(self.timeout, "find idea", self.repo.find_by_id(id))
            .await?
            .ok_or(CoreError::NotFound { entity: "Idea", id })
    }

    /// Hard-delete an idea. Applications that reference it are left in place.
    pub async fn delete(&self, requester: Option<&Identity>, id: EntityId) -> Result<(), CoreError> {
        // Anonymous callers learn nothing about existence.
        let requester = authenticated(policy::is_authenticated(requester), requester, "delete idea")?;
        let idea = self.get(id).await?;
        enforce(policy::can_delete_idea(Some(requester), &idea), "delete idea")?;

        let removed = bounded(self.timeout, "delete idea", self.repo.delete(id)).await?;
        if !removed {
            // Deleted concurrently between the read and the write.
            return Err(CoreError::NotFound { entity: "Idea", id });
        }
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), CoreError> {
        bounded(self.timeout, "ping ideas", self.repo.ping()).await
    }
}
