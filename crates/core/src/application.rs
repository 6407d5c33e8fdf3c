//! Application records, create-time validation, and the status state machine.
//!
//! An application is owned by its applicant, but only the author of the idea
//! it refers to may change its status. Status moves at most once:
//!
//! ```text
//! pending -> accepted   (terminal)
//! pending -> rejected   (terminal)
//! ```

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::catalogue::define_catalogue;
use crate::error::CoreError;
use crate::idea::{require_non_blank, Idea};
use crate::identity::Identity;
use crate::types::{new_entity_id, EntityId, Timestamp, UserId};

/// Maximum length of a cover letter (characters).
pub const MAX_COVER_LETTER_LENGTH: usize = 5_000;

/// Maximum length of the applicant-supplied contact name (characters).
pub const MAX_CONTACT_NAME_LENGTH: usize = 200;

/// Maximum length of a CV link.
pub const MAX_CV_LINK_LENGTH: usize = 2_048;

/* --------------------------------------------------------------------------
Status state machine
-------------------------------------------------------------------------- */

define_catalogue! {
    /// Lifecycle status of an application.
    ApplicationStatus("application status") {
        /// Initial status; awaiting the idea author's decision.
        Pending = "pending",
        /// Accepted by the idea author. Terminal.
        Accepted = "accepted",
        /// Rejected by the idea author. Terminal.
        Rejected = "rejected",
    }
}

impl ApplicationStatus {
    pub fn is_terminal(self) -> bool {
        valid_transitions(self).is_empty()
    }
}

/// Returns the set of statuses reachable from `from`.
pub fn valid_transitions(from: ApplicationStatus) -> &'static [ApplicationStatus] {
    match from {
        ApplicationStatus::Pending => &[ApplicationStatus::Accepted, ApplicationStatus::Rejected],
        ApplicationStatus::Accepted | ApplicationStatus::Rejected => &[],
    }
}

pub fn can_transition(from: ApplicationStatus, to: ApplicationStatus) -> bool {
    valid_transitions(from).contains(&to)
}

/// Validate a status change. Same-state targets are transitions too and are
/// rejected.
pub fn validate_transition(from: ApplicationStatus, to: ApplicationStatus) -> Result<(), CoreError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition { from, to })
    }
}

/// The two outcomes an idea author may choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationDecision {
    Accept,
    Reject,
}

impl ApplicationDecision {
    pub fn target_status(self) -> ApplicationStatus {
        match self {
            ApplicationDecision::Accept => ApplicationStatus::Accepted,
            ApplicationDecision::Reject => ApplicationStatus::Rejected,
        }
    }
}

impl std::str::FromStr for ApplicationDecision {
    type Err = CoreError;

    /// Accepts the target status names. `pending` is not a decision.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<ApplicationStatus>()? {
            ApplicationStatus::Accepted => Ok(ApplicationDecision::Accept),
            ApplicationStatus::Rejected => Ok(ApplicationDecision::Reject),
            ApplicationStatus::Pending => Err(CoreError::Validation(
                "Invalid decision 'pending'. Must be one of: accepted, rejected".to_string(),
            )),
        }
    }
}

/// Decide-application request. `status` is accepted as an alias for
/// `decision`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DecideApplication {
    #[serde(alias = "status")]
    pub decision: String,
}

impl DecideApplication {
    pub fn parse(&self) -> Result<ApplicationDecision, CoreError> {
        self.decision.trim().parse()
    }
}

/* --------------------------------------------------------------------------
Records
-------------------------------------------------------------------------- */

/// A request by a user to join an idea's team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: EntityId,
    /// May dangle once the idea is deleted.
    pub idea_id: EntityId,
    /// Title of the idea when the application was submitted.
    pub idea_title: String,
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub cover_letter: String,
    pub cv_link: String,
    pub status: ApplicationStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Application {
    /// Build a pending application by `applicant` against `idea`, created at `now`.
    pub fn new(input: NewApplication, idea: &Idea, applicant: &Identity, now: Timestamp) -> Self {
        Self {
            id: new_entity_id(),
            idea_id: idea.id,
            idea_title: idea.title.clone(),
            user_id: applicant.id.clone(),
            name: input.name,
            email: input.email,
            cover_letter: input.cover_letter,
            cv_link: input.cv_link,
            status: ApplicationStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Ordering used by every application listing: newest first, ties broken by id.
pub fn newest_first(a: &Application, b: &Application) -> Ordering {
    b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id))
}

/* --------------------------------------------------------------------------
Create DTO
-------------------------------------------------------------------------- */

/// Apply-to-idea request. `name` and `email` default to the applicant's
/// identity when omitted; supplied values are authoritative for the
/// application even when they differ from the identity record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateApplication {
    pub idea_id: EntityId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub cover_letter: String,
    pub cv_link: String,
}

/// Contact and content fields after identity defaults are applied.
#[derive(Debug, Validate)]
#[validate(schema(function = "validate_cv_scheme", skip_on_field_errors = true))]
struct ApplicationContent {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    name: String,
    #[validate(email(message = "must be a valid email address"))]
    email: String,
    #[validate(length(min = 1, max = 5000, message = "must be 1-5000 characters"))]
    cover_letter: String,
    #[validate(
        url(message = "must be a valid URL"),
        length(max = 2048, message = "must be at most 2048 characters")
    )]
    cv_link: String,
}

fn validate_cv_scheme(content: &ApplicationContent) -> Result<(), validator::ValidationError> {
    let link = content.cv_link.to_ascii_lowercase();
    if link.starts_with("https://") || link.starts_with("http://") {
        Ok(())
    } else {
        Err(validator::ValidationError::new("cv_link_scheme")
            .with_message("cvLink: must be an http or https link".into()))
    }
}

/// An apply request that passed validation. Only obtainable through
/// [`CreateApplication::into_new_application`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) cover_letter: String,
    pub(crate) cv_link: String,
}

impl CreateApplication {
    /// Apply identity defaults and validate the contact and content fields.
    pub fn into_new_application(self, applicant: &Identity) -> Result<NewApplication, CoreError> {
        let content = ApplicationContent {
            name: self
                .name
                .unwrap_or_else(|| applicant.name.clone())
                .trim()
                .to_string(),
            email: self
                .email
                .unwrap_or_else(|| applicant.email.clone())
                .trim()
                .to_string(),
            cover_letter: self.cover_letter,
            cv_link: self.cv_link.trim().to_string(),
        };

        content.validate().map_err(schema_aware)?;
        require_non_blank("coverLetter", &content.cover_letter)?;

        Ok(NewApplication {
            name: content.name,
            email: content.email,
            cover_letter: content.cover_letter,
            cv_link: content.cv_link,
        })
    }
}

/// Surface struct-level errors (which carry a full message) alongside field errors.
fn schema_aware(errors: validator::ValidationErrors) -> CoreError {
    if let Some(validator::ValidationErrorsKind::Field(schema_errors)) =
        errors.errors().get("__all__")
    {
        if let Some(msg) = schema_errors.first().and_then(|e| e.message.as_ref()) {
            return CoreError::Validation(msg.to_string());
        }
    }
    CoreError::from(errors)
}
