//! Driving port for read-only application listings.

use async_trait::async_trait;

use crate::domain::{AppliedJob, Error, Page};

/// Request for one page of a user's applications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListUserApplicationsRequest {
    pub user_id: String,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Driving port listing a user's applications with job summaries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationQuery: Send + Sync {
    /// Return one page of the user's applications. No side effects.
    async fn list_for_user(
        &self,
        request: ListUserApplicationsRequest,
    ) -> Result<Page<AppliedJob>, Error>;
}
