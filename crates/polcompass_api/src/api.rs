//! Use-case request handlers.
//!
//! # Responsibility
//! - Decode raw bodies and query values into core requests.
//! - Map core results onto the legacy status codes and messages.
//!
//! # Invariants
//! - Handlers never panic; every outcome becomes an `ApiResponse`.
//! - A missing survey id lookup answers 200 with a zero-identity body, while
//!   the "first" lookup answers 404. Existing clients rely on both.

use crate::wire::{CreateSurveyBody, SummaryBody, SummaryResponseBody, SurveyBody};
use log::{debug, warn};
use polcompass_core::{
    ping as ping_inner, DirectoryService, PageRequest, RepoError, ServiceError,
    SqliteSurveyRepository, Survey, SurveyService,
};
use rusqlite::Connection;
use serde::Serialize;
use serde_json::{json, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CREATED_MESSAGE: &str = "Added sucessfully to the database";
const MALFORMED_CREATE_MESSAGE: &str =
    "Bad request for polcompass request field1_name string,field2_name string, questions [] ";
const MISSING_ID_MESSAGE: &str = "You need to specify an id";
const NOT_FOUND_MESSAGE: &str = "PolCompass not found";
const SAVE_FAILED_MESSAGE: &str = "Error while saving questions to the database";
const READ_FAILED_MESSAGE: &str = "Error while reading from the database";
const MISSING_PER_PAGE_MESSAGE: &str = "Please specify how many items you want to see per page";

/// Status code plus JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn message(status: u16, message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self {
            status,
            body: json!({ "message": message }),
        }
    }

    fn serialized(value: &impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(body) => Self::ok(body),
            Err(err) => {
                warn!("event=api_encode module=api status=error error={err}");
                Self::message(500, "Error while encoding the response")
            }
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the `message` field of message-only bodies.
    pub fn message_text(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }
}

/// Failure kinds surfaced by the handlers.
#[derive(Debug)]
pub enum ApiError {
    /// The body could not be decoded.
    MalformedRequest(String),
    /// A query parameter was absent or not a number.
    MissingParameter(String),
    Service(ServiceError),
    /// The connection does not hold a migrated survey schema.
    Storage(RepoError),
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            Self::MalformedRequest(_) | Self::MissingParameter(_) => 400,
            Self::Service(ServiceError::Validation(_))
            | Self::Service(ServiceError::MissingParameter(_)) => 400,
            Self::Service(ServiceError::NotFound) => 404,
            Self::Service(ServiceError::Storage(_)) | Self::Storage(_) => 500,
        }
    }

    fn into_response(self, route: &'static str, storage_message: &str) -> ApiResponse {
        let status = self.status();
        if status >= 500 {
            warn!("event=api_request module=api route={route} status={status} error={self}");
        } else {
            debug!("event=api_request module=api route={route} status={status}");
        }
        let message = match self {
            Self::MalformedRequest(message) | Self::MissingParameter(message) => message,
            Self::Service(ServiceError::NotFound) => NOT_FOUND_MESSAGE.to_string(),
            Self::Service(ServiceError::Storage(_)) | Self::Storage(_) => {
                storage_message.to_string()
            }
            Self::Service(err) => err.to_string(),
        };
        ApiResponse::message(status, message)
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedRequest(message) | Self::MissingParameter(message) => {
                write!(f, "{message}")
            }
            Self::Service(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::MalformedRequest(_) | Self::MissingParameter(_) => None,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

/// Health check.
pub fn ping() -> ApiResponse {
    ApiResponse::message(200, ping_inner())
}

/// Creates a survey from a JSON body.
///
/// Success carries only a generic acknowledgement, not the new id.
pub fn create_survey(conn: &mut Connection, body: &str) -> ApiResponse {
    match try_create_survey(conn, body) {
        Ok(survey_id) => {
            debug!("event=api_request module=api route=create status=200 survey_id={survey_id}");
            ApiResponse::message(200, CREATED_MESSAGE)
        }
        Err(err) => err.into_response("create", SAVE_FAILED_MESSAGE),
    }
}

/// Looks up one survey by the raw `id` query value.
pub fn get_survey(conn: &mut Connection, id: Option<&str>) -> ApiResponse {
    match try_get_survey(conn, id) {
        Ok(body) => ApiResponse::serialized(&body),
        Err(err) => err.into_response("get", READ_FAILED_MESSAGE),
    }
}

/// Returns the first survey, or 404 when none exists.
pub fn first_survey(conn: &mut Connection) -> ApiResponse {
    match try_first_survey(conn) {
        Ok(body) => ApiResponse::serialized(&body),
        Err(err) => err.into_response("first", READ_FAILED_MESSAGE),
    }
}

/// Lists published surveys from raw `page`/`perPage` query values.
pub fn list_summaries(
    conn: &mut Connection,
    page: Option<&str>,
    per_page: Option<&str>,
) -> ApiResponse {
    match try_list_summaries(conn, page, per_page) {
        Ok(body) => ApiResponse::serialized(&body),
        Err(err) => err.into_response("summary", READ_FAILED_MESSAGE),
    }
}

fn try_create_survey(conn: &mut Connection, body: &str) -> Result<i64, ApiError> {
    let decoded = CreateSurveyBody::from_json(body)
        .map_err(|_| ApiError::MalformedRequest(MALFORMED_CREATE_MESSAGE.to_string()))?;
    let repo = SqliteSurveyRepository::try_new(conn)?;
    Ok(SurveyService::new(repo).create_survey(decoded.into())?)
}

fn try_get_survey(conn: &mut Connection, id: Option<&str>) -> Result<SurveyBody, ApiError> {
    let id = id
        .and_then(parse_survey_id)
        .ok_or_else(|| ApiError::MissingParameter(MISSING_ID_MESSAGE.to_string()))?;
    let repo = SqliteSurveyRepository::try_new(conn)?;
    let service = SurveyService::new(repo);
    // Ids beyond the storage range cannot exist.
    let survey = match i64::try_from(id) {
        Ok(id) => service.get_survey_by_id(id)?,
        Err(_) => Survey::default(),
    };
    Ok(SurveyBody::from(survey))
}

/// Plain decimal digits only; `u64::from_str` alone would let `+7` through.
fn parse_survey_id(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn try_first_survey(conn: &mut Connection) -> Result<SurveyBody, ApiError> {
    let repo = SqliteSurveyRepository::try_new(conn)?;
    Ok(SurveyBody::from(SurveyService::new(repo).get_any_survey()?))
}

fn try_list_summaries(
    conn: &mut Connection,
    page: Option<&str>,
    per_page: Option<&str>,
) -> Result<SummaryResponseBody, ApiError> {
    let request = parse_page_request(page, per_page)?;
    let repo = SqliteSurveyRepository::try_new(conn)?;
    let page = DirectoryService::new(repo).list_published(request)?;
    Ok(SummaryResponseBody {
        number_of_pages: page.total_pages,
        summaries: page.items.into_iter().map(SummaryBody::from).collect(),
    })
}

fn parse_page_request(
    page: Option<&str>,
    per_page: Option<&str>,
) -> Result<PageRequest, ApiError> {
    let per_page = per_page
        .ok_or_else(|| ApiError::MissingParameter(MISSING_PER_PAGE_MESSAGE.to_string()))?;
    let per_page = per_page
        .parse::<i64>()
        .map_err(|_| ApiError::MissingParameter("perPage must be a number".to_string()))?;
    if per_page <= 0 {
        return Err(ApiError::MissingParameter(
            "perPage must be greater than 0".to_string(),
        ));
    }
    let page = page
        .map(|raw| {
            raw.parse::<i64>()
                .map_err(|_| ApiError::MissingParameter("page must be a number".to_string()))
        })
        .transpose()?;
    Ok(PageRequest::new(page, per_page)?)
}
