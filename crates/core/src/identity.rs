//! Caller identity as supplied by the external identity provider.
//!
//! The core trusts this value as ground truth and never creates, edits, or
//! deletes users. Anonymous callers are represented as `None` wherever an
//! `Option<&Identity>` requester is accepted.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl Identity {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}
