//! In-memory repositories.
//!
//! Used by the test suites and for running the API without a database. Each
//! repository is a `RwLock<HashMap>`; the status compare-and-set happens under
//! the write lock, so concurrent deciders serialize on it. An optional latency
//! is slept before any lock is taken, which lets tests drive the store
//! timeout without leaving partial writes behind.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::{self, Application, ApplicationStatus};
use crate::error::CoreError;
use crate::idea::{self, Idea};
use crate::ports::{ApplicationRepository, IdeaRepository};
use crate::types::{EntityId, Timestamp};

async fn simulate_latency(latency: Option<Duration>) {
    if let Some(latency) = latency {
        tokio::time::sleep(latency).await;
    }
}

#[derive(Default)]
pub struct InMemoryIdeaRepository {
    ideas: RwLock<HashMap<EntityId, Idea>>,
    latency: Option<Duration>,
}

impl InMemoryIdeaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call by `latency`.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    fn sorted(mut ideas: Vec<Idea>) -> Vec<Idea> {
        ideas.sort_by(idea::newest_first);
        ideas
    }
}

#[async_trait]
impl IdeaRepository for InMemoryIdeaRepository {
    async fn insert(&self, idea: &Idea) -> Result<Idea, CoreError> {
        simulate_latency(self.latency).await;
        self.ideas.write().await.insert(idea.id, idea.clone());
        Ok(idea.clone())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Idea>, CoreError> {
        simulate_latency(self.latency).await;
        Ok(self.ideas.read().await.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Idea>, CoreError> {
        simulate_latency(self.latency).await;
        let ideas = self.ideas.read().await.values().cloned().collect();
        Ok(Self::sorted(ideas))
    }

    async fn list_by_author(&self, author_id: &str) -> Result<Vec<Idea>, CoreError> {
        simulate_latency(self.latency).await;
        let ideas = self
            .ideas
            .read()
            .await
            .values()
            .filter(|idea| idea.is_owned_by(author_id))
            .cloned()
            .collect();
        Ok(Self::sorted(ideas))
    }

    async fn delete(&self, id: EntityId) -> Result<bool, CoreError> {
        simulate_latency(self.latency).await;
        Ok(self.ideas.write().await.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), CoreError> {
        simulate_latency(self.latency).await;
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryApplicationRepository {
    applications: RwLock<HashMap<EntityId, Application>>,
    latency: Option<Duration>,
}

impl InMemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    async fn collect_where<F>(&self, predicate: F) -> Vec<Application>
    where
        F: Fn(&Application) -> bool,
    {
        let mut applications: Vec<Application> = self
            .applications
            .read()
            .await
            .values()
            .filter(|a| predicate(*a))
            .cloned()
            .collect();
        applications.sort_by(application::newest_first);
        applications
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn insert(&self, application: &Application) -> Result<Application, CoreError> {
        simulate_latency(self.latency).await;
        self.applications
            .write()
            .await
            .insert(application.id, application.clone());
        Ok(application.clone())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Application>, CoreError> {
        simulate_latency(self.latency).await;
        Ok(self.applications.read().await.get(&id).cloned())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Application>, CoreError> {
        simulate_latency(self.latency).await;
        Ok(self.collect_where(|a| a.user_id == user_id).await)
    }

    async fn list_by_ideas(&self, idea_ids: &[EntityId]) -> Result<Vec<Application>, CoreError> {
        simulate_latency(self.latency).await;
        Ok(self.collect_where(|a| idea_ids.contains(&a.idea_id)).await)
    }

    async fn count_by_ideas(
        &self,
        idea_ids: &[EntityId],
    ) -> Result<HashMap<EntityId, i64>, CoreError> {
        simulate_latency(self.latency).await;
        let mut counts = HashMap::new();
        for application in self.applications.read().await.values() {
            if idea_ids.contains(&application.idea_id) {
                *counts.entry(application.idea_id).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    async fn compare_and_set_status(
        &self,
        id: EntityId,
        expected: ApplicationStatus,
        next: ApplicationStatus,
        at: Timestamp,
    ) -> Result<Option<Application>, CoreError> {
        simulate_latency(self.latency).await;
        let mut applications = self.applications.write().await;
        match applications.get_mut(&id) {
            Some(application) if application.status == expected => {
                application.status = next;
                application.updated_at = at;
                Ok(Some(application.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn ping(&self) -> Result<(), CoreError> {
        simulate_latency(self.latency).await;
        Ok(())
    }
}
