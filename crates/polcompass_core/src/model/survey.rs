//! Survey and question records.
//!
//! # Invariants
//! - `axis_a_question_count`/`axis_b_question_count` are creation-time
//!   snapshots. Question edits that bypass the creation path (direct row
//!   updates, later merges) do not recompute them, so callers must not treat
//!   them as live totals.
//! - Every persisted `Question::axis` equals one of its survey's axis names
//!   at the time it was written.

use serde::{Deserialize, Serialize};

/// Storage-assigned survey identity.
pub type SurveyId = i64;

/// Storage-assigned question identity.
pub type QuestionId = i64;

/// Identity value carried by records that do not exist in storage.
pub const ZERO_ID: i64 = 0;

/// A persisted two-axis survey with its owned questions.
///
/// `Default` yields the zero-identity record returned by id lookups that
/// match nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    pub id: SurveyId,
    pub axis_a_name: String,
    pub axis_b_name: String,
    pub axis_a_question_count: u32,
    pub axis_b_question_count: u32,
    pub name: String,
    pub description: String,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds.
    pub updated_at: i64,
    /// Ordered by question id.
    pub questions: Vec<Question>,
}

impl Survey {
    /// Returns whether this record carries a storage-assigned identity.
    pub fn exists(&self) -> bool {
        self.id != ZERO_ID
    }

    /// Returns whether the survey is eligible for directory listing.
    pub fn is_published(&self) -> bool {
        !self.name.is_empty() && !self.description.is_empty()
    }
}

/// A persisted question row owned by exactly one survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    /// Name of the axis this question moves.
    pub axis: String,
    /// Signed pull along `axis`; zero is a legal neutral weight.
    pub direction: i64,
    pub survey_id: SurveyId,
}

/// Question as submitted by a client.
///
/// `id` is accepted for wire compatibility and always discarded before
/// persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    #[serde(default)]
    pub id: Option<QuestionId>,
    pub text: String,
    pub axis: String,
    pub direction: i64,
}

impl QuestionDraft {
    pub fn new(text: impl Into<String>, axis: impl Into<String>, direction: i64) -> Self {
        Self {
            id: None,
            text: text.into(),
            axis: axis.into(),
            direction,
        }
    }

    /// Drops client-supplied identity, leaving only the mergeable fields.
    pub fn into_new_question(self) -> NewQuestion {
        NewQuestion {
            text: self.text,
            axis: self.axis,
            direction: self.direction,
        }
    }
}

/// Survey creation input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSurveyRequest {
    pub axis_a_name: String,
    pub axis_b_name: String,
    pub name: String,
    pub description: String,
    pub questions: Vec<QuestionDraft>,
}

/// Survey row ready for insertion, with derived counts filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSurvey {
    pub axis_a_name: String,
    pub axis_b_name: String,
    pub axis_a_question_count: u32,
    pub axis_b_question_count: u32,
    pub name: String,
    pub description: String,
}

/// Question row ready for upsert; the owning survey id is stamped by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub text: String,
    pub axis: String,
    pub direction: i64,
}

/// Directory projection of a published survey. Never carries questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveySummary {
    pub id: SurveyId,
    pub name: String,
    pub description: String,
}
