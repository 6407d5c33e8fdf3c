//! Ideaboard core: the resource and authorization model for ideas and
//! applications.
//!
//! - [`idea`] / [`application`] -- domain records, create DTOs, catalogues,
//!   and the application status state machine.
//! - [`policy`] -- pure authorization decisions.
//! - [`ports`] -- repository traits implemented by storage adapters.
//! - [`store`] -- idea and application stores enforcing validation and policy
//!   at the storage boundary.
//! - [`service`] -- the orchestrator consumed by the HTTP layer.
//! - [`memory`] -- in-memory repositories for tests and local runs.
//!
//! This crate has no database or HTTP dependencies.

pub mod application;
pub mod error;
pub mod idea;
pub mod identity;
pub mod memory;
pub mod policy;
pub mod ports;
pub mod service;
pub mod store;
pub mod types;

mod catalogue;
