//! Integration tests for the Postgres repository adapters.

use assert_matches::assert_matches;
use chrono::Utc;
use ideaboard_core::application::{Application, ApplicationStatus, CreateApplication};
use ideaboard_core::error::CoreError;
use ideaboard_core::idea::{CreateIdea, Idea, Profession};
use ideaboard_core::identity::Identity;
use ideaboard_core::ports::{ApplicationRepository, IdeaRepository};
use ideaboard_db::{PgApplicationRepository, PgIdeaRepository};
use sqlx::PgPool;

fn author() -> Identity {
    Identity::new("user-1", "John Doe", "john@example.com")
}

fn applicant() -> Identity {
    Identity::new("user-2", "Jane Smith", "jane@example.com")
}

fn new_idea(title: &str, owner: &Identity) -> Idea {
    let input = CreateIdea {
        title: title.to_string(),
        short_description: "Personalized recipes.".to_string(),
        long_description: "An app that generates custom recipes.".to_string(),
        category: "Technology".to_string(),
        time_required: "1-3 months".to_string(),
        is_paid: true,
        members_needed: 3,
        professions: vec!["Developer".to_string(), "Data Scientist".to_string()],
    };
    Idea::new(input.into_new_idea().unwrap(), owner, Utc::now())
}

fn new_application(idea: &Idea, by: &Identity) -> Application {
    let input = CreateApplication {
        idea_id: idea.id,
        name: None,
        email: None,
        cover_letter: "I have experience with AI development.".to_string(),
        cv_link: "https://example.com/cv.pdf".to_string(),
    };
    Application::new(input.into_new_application(by).unwrap(), idea, by, Utc::now())
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_check(pool: PgPool) {
    ideaboard_db::health_check(&pool).await.unwrap();
    PgIdeaRepository::new(pool).ping().await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_idea_insert_then_find(pool: PgPool) {
    let repo = PgIdeaRepository::new(pool);
    let stored = repo.insert(&new_idea("Recipes", &author())).await.unwrap();

    let found = repo.find_by_id(stored.id).await.unwrap().unwrap();
    assert_eq!(found, stored);
    assert_eq!(found.professions, vec![Profession::Developer, Profession::DataScientist]);
    assert_eq!(found.author.email, "john@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ideas_listed_newest_first_and_by_author(pool: PgPool) {
    let repo = PgIdeaRepository::new(pool);
    let mut older = new_idea("Older", &author());
    older.created_at = Utc::now() - chrono::Duration::hours(1);
    repo.insert(&older).await.unwrap();
    repo.insert(&new_idea("Newer", &author())).await.unwrap();
    repo.insert(&new_idea("Other", &applicant())).await.unwrap();

    let all = repo.list_all().await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all.last().unwrap().title, "Older");

    let mine: Vec<String> = repo
        .list_by_author("user-1")
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.title)
        .collect();
    assert_eq!(mine, vec!["Newer", "Older"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_leaves_applications_dangling(pool: PgPool) {
    let ideas = PgIdeaRepository::new(pool.clone());
    let applications = PgApplicationRepository::new(pool);

    let idea = ideas.insert(&new_idea("Doomed", &author())).await.unwrap();
    let app = applications
        .insert(&new_application(&idea, &applicant()))
        .await
        .unwrap();

    assert!(ideas.delete(idea.id).await.unwrap());
    assert!(!ideas.delete(idea.id).await.unwrap());
    assert!(ideas.find_by_id(idea.id).await.unwrap().is_none());

    let still_there = applications.find_by_id(app.id).await.unwrap().unwrap();
    assert_eq!(still_there.idea_id, idea.id);
    assert_eq!(still_there.idea_title, "Doomed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_compare_and_set_has_one_winner(pool: PgPool) {
    let ideas = PgIdeaRepository::new(pool.clone());
    let applications = PgApplicationRepository::new(pool);
    let idea = ideas.insert(&new_idea("Race", &author())).await.unwrap();
    let app = applications
        .insert(&new_application(&idea, &applicant()))
        .await
        .unwrap();

    let accept = applications.compare_and_set_status(
        app.id,
        ApplicationStatus::Pending,
        ApplicationStatus::Accepted,
        Utc::now(),
    );
    let reject = applications.compare_and_set_status(
        app.id,
        ApplicationStatus::Pending,
        ApplicationStatus::Rejected,
        Utc::now(),
    );
    let (accepted, rejected) = tokio::join!(accept, reject);
    let accepted = accepted.unwrap();
    let rejected = rejected.unwrap();
    assert!(accepted.is_some() ^ rejected.is_some());

    let winner = accepted.or(rejected).unwrap();
    let stored = applications.find_by_id(app.id).await.unwrap().unwrap();
    assert_eq!(stored.status, winner.status);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_listing_and_counting_by_idea(pool: PgPool) {
    let ideas = PgIdeaRepository::new(pool.clone());
    let applications = PgApplicationRepository::new(pool);
    let busy = ideas.insert(&new_idea("Busy", &author())).await.unwrap();
    let quiet = ideas.insert(&new_idea("Quiet", &author())).await.unwrap();

    applications
        .insert(&new_application(&busy, &applicant()))
        .await
        .unwrap();
    applications
        .insert(&new_application(&busy, &applicant()))
        .await
        .unwrap();

    let by_user = applications.list_by_user("user-2").await.unwrap();
    assert_eq!(by_user.len(), 2);

    let by_ideas = applications
        .list_by_ideas(&[busy.id, quiet.id])
        .await
        .unwrap();
    assert_eq!(by_ideas.len(), 2);

    let counts = applications
        .count_by_ideas(&[busy.id, quiet.id])
        .await
        .unwrap();
    assert_eq!(counts.get(&busy.id), Some(&2));
    assert_eq!(counts.get(&quiet.id), None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_check_constraint_violation_is_internal(pool: PgPool) {
    let repo = PgIdeaRepository::new(pool);
    let mut idea = new_idea("Bad", &author());
    idea.members_needed = 0;
    assert_matches!(repo.insert(&idea).await, Err(CoreError::Internal(_)));
}
