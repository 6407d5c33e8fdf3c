use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::application::{validate_transition, Application, ApplicationDecision, CreateApplication};
use crate::error::CoreError;
use crate::identity::Identity;
use crate::policy;
use crate::ports::ApplicationRepository;
use crate::types::EntityId;

use super::{authenticated, bounded, enforce, IdeaStore};

/// Application records behind validation, ownership checks, and the status
/// state machine. Idea lookups go through the [`IdeaStore`].
#[derive(Clone)]
pub struct ApplicationStore {
    repo: Arc<dyn ApplicationRepository>,
    ideas: IdeaStore,
    timeout: Duration,
}

impl ApplicationStore {
    pub fn new(repo: Arc<dyn ApplicationRepository>, ideas: IdeaStore, timeout: Duration) -> Self {
        Self {
            repo,
            ideas,
            timeout,
        }
    }

    /// Submit a pending application against an existing idea.
    ///
    /// Checks run in order: identity, idea existence, field validation.
    pub async fn create(
        &self,
        requester: Option<&Identity>,
        input: CreateApplication,
    ) -> Result<Application, CoreError> {
        let applicant = authenticated(
            policy::can_create_application(requester),
            requester,
            "apply to idea",
        )?;
        let idea = self.ideas.get(input.idea_id).await?;
        let new = input.into_new_application(applicant)?;

        let application = Application::new(new, &idea, applicant, Utc::now());
        bounded(self.timeout, "insert application", self.repo.insert(&application)).await
    }

    pub async fn get(&self, id: EntityId) -> Result<Application, CoreError> {
        bounded(self.timeout, "find application", self.repo.find_by_id(id))
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Application",
                id,
            })
    }

    /// Applications submitted by `user_id`, newest first.
    pub async fn list_by_applicant(&self, user_id: &str) -> Result<Vec<Application>, CoreError> {
        bounded(
            self.timeout,
            "list applications by user",
            self.repo.list_by_user(user_id),
        )
        .await
    }

    /// Applications to any idea `owner_id` currently authors, newest first.
    /// Applications whose idea has been deleted are not included.
    pub async fn list_by_idea_owner(&self, owner_id: &str) -> Result<Vec<Application>, CoreError> {
        let idea_ids: Vec<EntityId> = self
            .ideas
            .list_by_author(owner_id)
            .await?
            .iter()
            .map(|idea| idea.id)
            .collect();
        if idea_ids.is_empty() {
            return Ok(Vec::new());
        }
        bounded(
            self.timeout,
            "list applications by ideas",
            self.repo.list_by_ideas(&idea_ids),
        )
        .await
    }

    /// Applicants of a single idea; visible to its author only.
    pub async fn list_for_idea(
        &self,
        requester: Option<&Identity>,
        idea_id: EntityId,
    ) -> Result<Vec<Application>, CoreError> {
        let requester = authenticated(
            policy::is_authenticated(requester),
            requester,
            "view applicants",
        )?;
        let idea = self.ideas.get(idea_id).await?;
        enforce(
            policy::can_view_idea_applicants(Some(requester), &idea),
            "view applicants",
        )?;
        bounded(
            self.timeout,
            "list applications by ideas",
            self.repo.list_by_ideas(&[idea_id]),
        )
        .await
    }

    /// Number of applications per idea; every requested id is present.
    pub async fn count_by_idea(
        &self,
        idea_ids: &[EntityId],
    ) -> Result<HashMap<EntityId, i64>, CoreError> {
        if idea_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let mut counts = bounded(
            self.timeout,
            "count applications",
            self.repo.count_by_ideas(idea_ids),
        )
        .await?;
        for id in idea_ids {
            counts.entry(*id).or_insert(0);
        }
        Ok(counts)
    }

    /// Move a pending application to a terminal status on behalf of the idea's
    /// author.
    ///
    /// Checks run in order: identity, application existence, idea existence,
    /// ownership, state machine, then an atomic compare-and-set so that only
    /// one of several concurrent deciders wins.
    pub async fn update_status(
        &self,
        requester: Option<&Identity>,
        application_id: EntityId,
        decision: ApplicationDecision,
    ) -> Result<Application, CoreError> {
        let requester = authenticated(
            policy::is_authenticated(requester),
            requester,
            "decide application",
        )?;
        let application = self.get(application_id).await?;
        let idea = self.ideas.get(application.idea_id).await?;
        enforce(
            policy::can_decide_application(Some(requester), &application, &idea),
            "decide application",
        )?;

        let target = decision.target_status();
        validate_transition(application.status, target)?;

        let updated = bounded(
            self.timeout,
            "update application status",
            self.repo
                .compare_and_set_status(application_id, application.status, target, Utc::now()),
        )
        .await?;

        match updated {
            Some(application) => Ok(application),
            None => {
                // Lost the race: report what the winner left behind.
                let current = self.get(application_id).await?;
                tracing::warn!(
                    application_id = %application_id,
                    observed = %current.status,
                    attempted = %target,
                    "Status compare-and-set lost"
                );
                Err(CoreError::InvalidTransition {
                    from: current.status,
                    to: target,
                })
            }
        }
    }

    pub async fn ping(&self) -> Result<(), CoreError> {
        bounded(self.timeout, "ping applications", self.repo.ping()).await
    }
}
