//! Request extractors for the caller's identity.
//!
//! - [`auth::AuthUser`] -- requires a valid identity token.
//! - [`auth::MaybeAuthUser`] -- anonymous when no token is sent.

pub mod auth;
