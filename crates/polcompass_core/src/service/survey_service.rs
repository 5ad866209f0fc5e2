//! Survey creation and lookup use-cases.
//!
//! # Invariants
//! - Validation runs before any write; a rejected request persists nothing.
//! - Survey row and question merge commit together or not at all.
//! - `get_survey_by_id` reports absence with a zero-identity record while
//!   `get_any_survey` reports it as `ServiceError::NotFound`. Both shapes are
//!   kept for existing clients; `find_survey` is the `Option` form of the
//!   id lookup.

use crate::model::survey::{CreateSurveyRequest, NewQuestion, NewSurvey, Survey, SurveyId};
use crate::model::validation::classify_questions;
use crate::repo::survey_repo::SurveyRepository;
use crate::service::error::{ServiceError, ServiceResult};
use log::{info, warn};
use std::time::Instant;

/// Use-case service for survey definitions.
pub struct SurveyService<R: SurveyRepository> {
    repo: R,
}

impl<R: SurveyRepository> SurveyService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates, inserts and merges one survey definition.
    ///
    /// # Contract
    /// - Fails with `Validation` on the first question whose axis is neither
    ///   `axis_a_name` nor `axis_b_name`.
    /// - Client-supplied question ids are discarded.
    /// - Returns the storage-assigned survey id.
    ///
    /// # Errors
    /// - `Storage` when the insert or the question merge fails; the survey row
    ///   is rolled back with it.
    pub fn create_survey(&mut self, request: CreateSurveyRequest) -> ServiceResult<SurveyId> {
        let started_at = Instant::now();
        let counts = match classify_questions(
            &request.axis_a_name,
            &request.axis_b_name,
            &request.questions,
        ) {
            Ok(counts) => counts,
            Err(err) => {
                warn!(
                    "event=survey_create module=service status=rejected error_code=unknown_axis questions={}",
                    request.questions.len()
                );
                return Err(err.into());
            }
        };

        let survey = NewSurvey {
            axis_a_name: request.axis_a_name,
            axis_b_name: request.axis_b_name,
            axis_a_question_count: counts.axis_a,
            axis_b_question_count: counts.axis_b,
            name: request.name,
            description: request.description,
        };
        let questions: Vec<NewQuestion> = request
            .questions
            .into_iter()
            .map(|draft| draft.into_new_question())
            .collect();

        match self.repo.create_survey(&survey, &questions) {
            Ok(survey_id) => {
                info!(
                    "event=survey_create module=service status=ok survey_id={} axis_a_count={} axis_b_count={} duration_ms={}",
                    survey_id,
                    counts.axis_a,
                    counts.axis_b,
                    started_at.elapsed().as_millis()
                );
                Ok(survey_id)
            }
            Err(err) => {
                warn!(
                    "event=survey_create module=service status=error error_code=storage_failed questions={} duration_ms={} error={}",
                    questions.len(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }

    /// Gets one survey by id, or the zero-identity record when none matches.
    pub fn get_survey_by_id(&self, id: SurveyId) -> ServiceResult<Survey> {
        Ok(self.find_survey(id)?.unwrap_or_default())
    }

    /// Gets one survey by id.
    pub fn find_survey(&self, id: SurveyId) -> ServiceResult<Option<Survey>> {
        Ok(self.repo.find_survey_by_id(id)?)
    }

    /// Gets the lowest-id survey.
    ///
    /// # Errors
    /// - `NotFound` when no survey exists.
    pub fn get_any_survey(&self) -> ServiceResult<Survey> {
        self.repo.find_any_survey()?.ok_or(ServiceError::NotFound)
    }
}
