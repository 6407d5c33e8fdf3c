//! The marketplace service: every operation the HTTP layer calls.
//!
//! Writes go through the stores, which consult the policy before touching a
//! repository. Each operation writes at most one record, so a failed call has
//! mutated nothing.

use std::sync::Arc;
use std::time::Duration;

use crate::application::{Application, ApplicationDecision, CreateApplication};
use crate::error::CoreError;
use crate::idea::{CreateIdea, Idea, IdeaFilter, IdeaSummary};
use crate::identity::Identity;
use crate::memory::{InMemoryApplicationRepository, InMemoryIdeaRepository};
use crate::policy;
use crate::ports::{ApplicationRepository, IdeaRepository};
use crate::store::{enforce, ApplicationStore, IdeaStore};
use crate::types::EntityId;

/// Default bound on a single repository call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_millis(5_000);

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub store_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}

pub struct MarketplaceService {
    ideas: IdeaStore,
    applications: ApplicationStore,
}

impl MarketplaceService {
    pub fn new(
        idea_repo: Arc<dyn IdeaRepository>,
        application_repo: Arc<dyn ApplicationRepository>,
        config: ServiceConfig,
    ) -> Self {
        let ideas = IdeaStore::new(idea_repo, config.store_timeout);
        let applications =
            ApplicationStore::new(application_repo, ideas.clone(), config.store_timeout);
        Self {
            ideas,
            applications,
        }
    }

    /// A service over fresh in-memory repositories.
    pub fn in_memory(config: ServiceConfig) -> Self {
        Self::new(
            Arc::new(InMemoryIdeaRepository::new()),
            Arc::new(InMemoryApplicationRepository::new()),
            config,
        )
    }

    // ---- Ideas ----

    pub async fn submit_idea(
        &self,
        requester: Option<&Identity>,
        input: CreateIdea,
    ) -> Result<Idea, CoreError> {
        let idea = self.ideas.create(requester, input).await?;
        tracing::info!(idea_id = %idea.id, author_id = %idea.author.id, "Idea submitted");
        Ok(idea)
    }

    /// Public listing, newest first, optionally filtered.
    pub async fn list_ideas(&self, filter: &IdeaFilter) -> Result<Vec<Idea>, CoreError> {
        self.ideas.list_filtered(filter).await
    }

    pub async fn get_idea(&self, id: EntityId) -> Result<Idea, CoreError> {
        self.ideas.get(id).await
    }

    pub async fn delete_idea(
        &self,
        requester: Option<&Identity>,
        id: EntityId,
    ) -> Result<(), CoreError> {
        self.ideas.delete(requester, id).await?;
        tracing::info!(
            idea_id = %id,
            user_id = requester.map(|r| r.id.as_str()).unwrap_or_default(),
            "Idea deleted"
        );
        Ok(())
    }

    // ---- Applications ----

    pub async fn apply_to_idea(
        &self,
        requester: Option<&Identity>,
        input: CreateApplication,
    ) -> Result<Application, CoreError> {
        let application = self.applications.create(requester, input).await?;
        tracing::info!(
            application_id = %application.id,
            idea_id = %application.idea_id,
            user_id = %application.user_id,
            "Application submitted"
        );
        Ok(application)
    }

    /// Accept or reject an application. Only the author of the target idea
    /// may decide, and only once.
    pub async fn decide_application(
        &self,
        requester: Option<&Identity>,
        application_id: EntityId,
        decision: ApplicationDecision,
    ) -> Result<Application, CoreError> {
        let application = self
            .applications
            .update_status(requester, application_id, decision)
            .await?;
        tracing::info!(
            application_id = %application.id,
            status = %application.status,
            "Application decided"
        );
        Ok(application)
    }

    /// Applicants of one idea, for its author.
    pub async fn applicants_for_idea(
        &self,
        requester: Option<&Identity>,
        idea_id: EntityId,
    ) -> Result<Vec<Application>, CoreError> {
        self.applications.list_for_idea(requester, idea_id).await
    }

    // ---- "My" listings ----

    pub async fn my_ideas(
        &self,
        user_id: &str,
        requester: Option<&Identity>,
    ) -> Result<Vec<Idea>, CoreError> {
        enforce(policy::can_read_as(user_id, requester), "list ideas")?;
        self.ideas.list_by_author(user_id).await
    }

    /// The caller's ideas, each with its application count.
    pub async fn my_idea_summaries(
        &self,
        user_id: &str,
        requester: Option<&Identity>,
    ) -> Result<Vec<IdeaSummary>, CoreError> {
        let ideas = self.my_ideas(user_id, requester).await?;
        let ids: Vec<EntityId> = ideas.iter().map(|idea| idea.id).collect();
        let counts = self.applications.count_by_idea(&ids).await?;

        Ok(ideas
            .into_iter()
            .map(|idea| IdeaSummary {
                application_count: counts.get(&idea.id).copied().unwrap_or(0),
                idea,
            })
            .collect())
    }

    pub async fn my_applications(
        &self,
        user_id: &str,
        requester: Option<&Identity>,
    ) -> Result<Vec<Application>, CoreError> {
        enforce(policy::can_read_as(user_id, requester), "list applications")?;
        self.applications.list_by_applicant(user_id).await
    }

    /// Applications to every idea the caller currently authors.
    pub async fn applicants_for_my_ideas(
        &self,
        user_id: &str,
        requester: Option<&Identity>,
    ) -> Result<Vec<Application>, CoreError> {
        enforce(policy::can_read_as(user_id, requester), "list applicants")?;
        self.applications.list_by_idea_owner(user_id).await
    }

    /// Probe both repositories.
    pub async fn health_check(&self) -> Result<(), CoreError> {
        self.ideas.ping().await?;
        self.applications.ping().await
    }
}
