//! Authorization decisions.
//!
//! Every function here is pure: it inspects the requester and the records it
//! is given and returns a [`PolicyDecision`]. Stores call these before any
//! mutation and convert a denial into a [`CoreError`] with [`PolicyDecision::enforce`].
//!
//! | Action                       | Allowed when                               |
//! |------------------------------|--------------------------------------------|
//! | create idea / application    | requester is authenticated                 |
//! | delete idea                  | requester is the idea's author             |
//! | decide application           | requester is the author of the target idea |
//! | view an idea's applicants    | requester is the idea's author             |
//! | read "my" listings           | requester is the subject of the listing    |

use crate::application::Application;
use crate::error::CoreError;
use crate::idea::Idea;
use crate::identity::Identity;

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No identity was supplied.
    Anonymous,
    /// The requester does not own the resource.
    NotOwner,
    /// The requester asked for another user's listing.
    NotSubject,
    /// The application does not belong to the idea it was checked against.
    IdeaMismatch,
}

impl DenyReason {
    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            DenyReason::Anonymous => "anonymous",
            DenyReason::NotOwner => "not_owner",
            DenyReason::NotSubject => "not_subject",
            DenyReason::IdeaMismatch => "idea_mismatch",
        }
    }

    /// Anonymous callers are unauthorized; everything else is forbidden.
    pub fn into_error(self, action: &str) -> CoreError {
        match self {
            DenyReason::Anonymous => {
                CoreError::Unauthorized(format!("authentication required to {action}"))
            }
            reason => CoreError::Forbidden(format!(
                "not permitted to {action} ({})",
                reason.code()
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    Allow,
    Deny(DenyReason),
}

impl PolicyDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, PolicyDecision::Allow)
    }

    /// Convert a denial into the matching error. `action` names what was
    /// attempted, e.g. `"delete idea"`.
    pub fn enforce(self, action: &str) -> Result<(), CoreError> {
        match self {
            PolicyDecision::Allow => Ok(()),
            PolicyDecision::Deny(reason) => Err(reason.into_error(action)),
        }
    }
}

fn allow_if(condition: bool, reason: DenyReason) -> PolicyDecision {
    if condition {
        PolicyDecision::Allow
    } else {
        PolicyDecision::Deny(reason)
    }
}

pub fn is_authenticated(requester: Option<&Identity>) -> PolicyDecision {
    allow_if(requester.is_some(), DenyReason::Anonymous)
}

pub fn can_create_idea(requester: Option<&Identity>) -> PolicyDecision {
    is_authenticated(requester)
}

/// Any authenticated user may apply, including to their own idea.
pub fn can_create_application(requester: Option<&Identity>) -> PolicyDecision {
    is_authenticated(requester)
}

pub fn can_delete_idea(requester: Option<&Identity>, idea: &Idea) -> PolicyDecision {
    owns_idea(requester, idea)
}

/// Only the author of the idea the application targets may decide it. The
/// applicant has no say, even when the applicant is also the author of some
/// other idea.
pub fn can_decide_application(
    requester: Option<&Identity>,
    application: &Application,
    idea: &Idea,
) -> PolicyDecision {
    if application.idea_id != idea.id {
        return PolicyDecision::Deny(DenyReason::IdeaMismatch);
    }
    owns_idea(requester, idea)
}

pub fn can_view_idea_applicants(requester: Option<&Identity>, idea: &Idea) -> PolicyDecision {
    owns_idea(requester, idea)
}

/// A "my X" listing for `subject` may only be read by `subject`.
pub fn can_read_as(subject: &str, requester: Option<&Identity>) -> PolicyDecision {
    match requester {
        None => PolicyDecision::Deny(DenyReason::Anonymous),
        Some(identity) => allow_if(identity.id == subject, DenyReason::NotSubject),
    }
}

fn owns_idea(requester: Option<&Identity>, idea: &Idea) -> PolicyDecision {
    match requester {
        None => PolicyDecision::Deny(DenyReason::Anonymous),
        Some(identity) => allow_if(idea.is_owned_by(&identity.id), DenyReason::NotOwner),
    }
}
