//! Core domain logic for two-axis survey definitions.
//! This crate is the single source of truth for survey invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::ServiceConfig;
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::survey::{
    CreateSurveyRequest, NewQuestion, NewSurvey, Question, QuestionDraft, QuestionId, Survey,
    SurveyId, SurveySummary, ZERO_ID,
};
pub use model::validation::{classify_questions, AxisCounts, ValidationError};
pub use repo::survey_repo::{RepoError, RepoResult, SqliteSurveyRepository, SurveyRepository};
pub use service::directory_service::{DirectoryService, PageRequest, SummaryPage};
pub use service::error::{ServiceError, ServiceResult};
pub use service::survey_service::SurveyService;

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
