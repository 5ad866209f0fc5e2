//! Directory listing of published surveys with offset pagination.

use crate::model::survey::SurveySummary;
use crate::repo::survey_repo::SurveyRepository;
use crate::service::error::{ServiceError, ServiceResult};
use log::debug;

/// Validated pagination input. Both fields are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    per_page: i64,
}

impl PageRequest {
    /// Builds a page request; `page` defaults to 1.
    ///
    /// # Errors
    /// - `MissingParameter` when `per_page` or `page` is not positive.
    pub fn new(page: Option<i64>, per_page: i64) -> ServiceResult<Self> {
        if per_page <= 0 {
            return Err(ServiceError::MissingParameter(
                "perPage must be greater than 0".to_string(),
            ));
        }
        let page = page.unwrap_or(1);
        if page <= 0 {
            return Err(ServiceError::MissingParameter(
                "page must be greater than 0".to_string(),
            ));
        }
        Ok(Self { page, per_page })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn per_page(&self) -> i64 {
        self.per_page
    }

    /// Number of published rows skipped before this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// One page of the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPage {
    pub items: Vec<SurveySummary>,
    pub total_pages: i64,
}

/// Returns `ceil(count / per_page)`; zero rows yield zero pages.
pub fn total_pages(count: i64, per_page: i64) -> i64 {
    if count <= 0 {
        return 0;
    }
    count / per_page + i64::from(count % per_page != 0)
}

pub struct DirectoryService<R: SurveyRepository> {
    repo: R,
}

impl<R: SurveyRepository> DirectoryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists one page of published surveys.
    ///
    /// A page past the end yields no items and the real `total_pages`.
    pub fn list_published(&self, request: PageRequest) -> ServiceResult<SummaryPage> {
        let items = self
            .repo
            .list_published(request.per_page(), request.offset())?;
        let count = self.repo.count_published()?;
        let total_pages = total_pages(count, request.per_page());
        debug!(
            "event=directory_list module=service status=ok page={} per_page={} items={} total_pages={}",
            request.page(),
            request.per_page(),
            items.len(),
            total_pages
        );
        Ok(SummaryPage { items, total_pages })
    }
}
