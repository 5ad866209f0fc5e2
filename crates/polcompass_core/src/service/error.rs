//! Use-case level error kinds.

use crate::model::validation::ValidationError;
use crate::repo::survey_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// A question named an axis the survey does not declare. Nothing was written.
    Validation(ValidationError),
    /// Pagination input was absent, non-numeric or non-positive.
    MissingParameter(String),
    /// Returned only by the "any survey" read path.
    NotFound,
    Storage(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::MissingParameter(message) => write!(f, "{message}"),
            Self::NotFound => write!(f, "survey not found"),
            Self::Storage(err) => write!(f, "survey storage failed: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::MissingParameter(_) | Self::NotFound => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}
