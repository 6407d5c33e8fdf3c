//! Query structs (`*Repo`) and the port adapters built on them.

mod application_repo;
mod idea_repo;

pub use application_repo::{ApplicationRepo, PgApplicationRepository};
pub use idea_repo::{IdeaRepo, PgIdeaRepository};
