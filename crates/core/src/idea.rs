//! Idea records, catalogues, and create-time validation.
//!
//! An idea is readable by everyone and exclusively owned by its author.
//! The author is embedded as an immutable snapshot taken at creation time,
//! not a live reference to the identity provider's record.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::catalogue::define_catalogue;
use crate::error::CoreError;
use crate::identity::Identity;
use crate::types::{new_entity_id, EntityId, Timestamp, UserId};

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Maximum length of an idea title (characters).
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of the short description shown on feed cards (characters).
pub const MAX_SHORT_DESCRIPTION_LENGTH: usize = 150;

/// Maximum length of the long description (characters).
pub const MAX_LONG_DESCRIPTION_LENGTH: usize = 10_000;

/// Smallest team an idea may ask for.
pub const MIN_MEMBERS_NEEDED: i32 = 1;

/// Largest team an idea may ask for.
pub const MAX_MEMBERS_NEEDED: i32 = 100;

/* --------------------------------------------------------------------------
Catalogues
-------------------------------------------------------------------------- */

define_catalogue! {
    /// Idea category.
    Category("category") {
        Technology = "Technology",
        Design = "Design",
        Business = "Business",
        Marketing = "Marketing",
        Education = "Education",
        Health = "Health",
        Entertainment = "Entertainment",
        Other = "Other",
    }
}

define_catalogue! {
    /// Expected time commitment, as a duration band. The Spanish labels the
    /// submit form offers are accepted and stored under the English label.
    TimeRequired("time required") {
        LessThanOneMonth = "Less than 1 month" | "Menos de 1 mes",
        OneToThreeMonths = "1-3 months" | "1-3 meses",
        ThreeToSixMonths = "3-6 months" | "3-6 meses",
        SixToTwelveMonths = "6-12 months" | "6-12 meses",
        MoreThanOneYear = "More than 1 year" | "Más de 1 año",
    }
}

define_catalogue! {
    /// A skill an idea is looking for.
    Profession("profession") {
        Developer = "Developer",
        Designer = "Designer",
        ProjectManager = "Project Manager",
        MarketingSpecialist = "Marketing Specialist",
        ContentCreator = "Content Creator",
        DataScientist = "Data Scientist",
        BusinessAnalyst = "Business Analyst",
        FinancialAdvisor = "Financial Advisor",
        LegalConsultant = "Legal Consultant",
        Other = "Other",
    }
}

/* --------------------------------------------------------------------------
Records
-------------------------------------------------------------------------- */

/// Snapshot of the creating user, copied once and never synchronized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaAuthor {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<&Identity> for IdeaAuthor {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.clone(),
            name: identity.name.clone(),
            email: identity.email.clone(),
        }
    }
}

/// A posted collaboration opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: EntityId,
    pub title: String,
    pub short_description: String,
    pub long_description: String,
    pub category: Category,
    pub time_required: TimeRequired,
    pub is_paid: bool,
    pub members_needed: i32,
    pub professions: Vec<Profession>,
    pub author: IdeaAuthor,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

impl Idea {
    /// Build a new idea owned by `author` with a fresh id, created at `now`.
    pub fn new(input: NewIdea, author: &Identity, now: Timestamp) -> Self {
        Self {
            id: new_entity_id(),
            title: input.title,
            short_description: input.short_description,
            long_description: input.long_description,
            category: input.category,
            time_required: input.time_required,
            is_paid: input.is_paid,
            members_needed: input.members_needed,
            professions: input.professions,
            author: IdeaAuthor::from(author),
            created_at: now,
            updated_at: None,
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.author.id == user_id
    }
}

/// Ordering used by every idea listing: newest first, ties broken by id.
pub fn newest_first(a: &Idea, b: &Idea) -> Ordering {
    b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id))
}

/// An idea together with how many applications it has received.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaSummary {
    #[serde(flatten)]
    pub idea: Idea,
    pub application_count: i64,
}

/* --------------------------------------------------------------------------
Create DTO
-------------------------------------------------------------------------- */

/// Create-idea request as received from the presentation layer.
///
/// Enumerated fields arrive as strings and missing fields default to empty,
/// so any malformed input surfaces as [`CoreError::Validation`] rather than a
/// decode failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateIdea {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 150, message = "must be 1-150 characters"))]
    pub short_description: String,
    #[validate(length(min = 1, max = 10000, message = "must be 1-10000 characters"))]
    pub long_description: String,
    pub category: String,
    pub time_required: String,
    pub is_paid: bool,
    #[validate(range(min = 1, max = 100, message = "must be between 1 and 100"))]
    pub members_needed: i64,
    #[validate(length(min = 1, message = "at least one profession is required"))]
    pub professions: Vec<String>,
}

/// A create-idea request that passed validation. Only obtainable through
/// [`CreateIdea::into_new_idea`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewIdea {
    pub(crate) title: String,
    pub(crate) short_description: String,
    pub(crate) long_description: String,
    pub(crate) category: Category,
    pub(crate) time_required: TimeRequired,
    pub(crate) is_paid: bool,
    pub(crate) members_needed: i32,
    pub(crate) professions: Vec<Profession>,
}

impl CreateIdea {
    /// Validate every field and parse the enumerated values.
    pub fn into_new_idea(self) -> Result<NewIdea, CoreError> {
        self.validate()?;
        require_non_blank("title", &self.title)?;
        require_non_blank("shortDescription", &self.short_description)?;
        require_non_blank("longDescription", &self.long_description)?;

        let category: Category = self.category.trim().parse()?;
        let time_required: TimeRequired = self.time_required.trim().parse()?;
        let professions = parse_professions(&self.professions)?;
        let members_needed = i32::try_from(self.members_needed).map_err(|_| {
            CoreError::Validation("membersNeeded: must be between 1 and 100".to_string())
        })?;

        Ok(NewIdea {
            title: self.title.trim().to_string(),
            short_description: self.short_description.trim().to_string(),
            long_description: self.long_description.trim().to_string(),
            category,
            time_required,
            is_paid: self.is_paid,
            members_needed,
            professions,
        })
    }
}

/// Reject strings that are empty once surrounding whitespace is removed.
pub(crate) fn require_non_blank(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field}: must not be blank")));
    }
    Ok(())
}

/// Parse professions as a set: duplicates collapse, first-seen order is kept.
fn parse_professions(raw: &[String]) -> Result<Vec<Profession>, CoreError> {
    let mut professions = Vec::with_capacity(raw.len());
    for value in raw {
        let profession: Profession = value.trim().parse()?;
        if !professions.contains(&profession) {
            professions.push(profession);
        }
    }
    if professions.is_empty() {
        return Err(CoreError::Validation(
            "professions: at least one profession is required".to_string(),
        ));
    }
    Ok(professions)
}

/* --------------------------------------------------------------------------
Listing filter
-------------------------------------------------------------------------- */

/// Optional server-side filter for the public idea listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdeaFilter {
    pub category: Option<Category>,
    pub is_paid: Option<bool>,
    pub profession: Option<Profession>,
}

impl IdeaFilter {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.is_paid.is_none() && self.profession.is_none()
    }

    pub fn matches(&self, idea: &Idea) -> bool {
        self.category.map_or(true, |c| idea.category == c)
            && self.is_paid.map_or(true, |p| idea.is_paid == p)
            && self
                .profession
                .map_or(true, |p| idea.professions.contains(&p))
    }
}
