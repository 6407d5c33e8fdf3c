//! Identity-provider token handling.
//!
//! - [`jwt`] -- verification of HS256 identity tokens and a token issuer for
//!   tests and local tooling.

pub mod jwt;
