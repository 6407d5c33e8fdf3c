//! Ideaboard API server library.
//!
//! Exposes config, state, error handling, extractors, and routes so the
//! integration tests and the binary entrypoint build the same router.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
