//! Port definitions.
//!
//! The stores depend only on these traits. Adapters live in `memory` (this
//! crate) and in `ideaboard-db` (Postgres).

mod repository;

pub use repository::{ApplicationRepository, IdeaRepository};
