//! Port for application persistence.
//!
//! Adapters must provide three atomic guarantees the lifecycle relies on:
//! inserts fail with [`ApplicationRepositoryError::Duplicate`] when the
//! `(user_id, job_id)` pair already exists, status updates only apply when
//! the stored status still matches the expected one, and deletes return the
//! removed row so exactly one caller observes it.

use async_trait::async_trait;

use crate::domain::{
    Application, ApplicationId, ApplicationStatus, AppliedJob, Page, PageRequest, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by application repository adapters.
    pub enum ApplicationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "application repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "application repository query failed: {message}",
        /// The user already has an application for the job.
        Duplicate { message: String } =>
            "duplicate application: {message}",
    }
}

/// Port for reading and writing applications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Insert a new application, enforcing the `(user_id, job_id)` uniqueness
    /// constraint atomically.
    async fn insert(&self, application: &Application) -> Result<(), ApplicationRepositoryError>;

    /// Find an application by id.
    async fn find_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, ApplicationRepositoryError>;

    /// Set the status to `next` if it is still `expected`.
    ///
    /// Returns `None` when no row matched, either because the application is
    /// gone or because its status changed in the meantime.
    async fn update_status(
        &self,
        id: &ApplicationId,
        expected: ApplicationStatus,
        next: ApplicationStatus,
    ) -> Result<Option<Application>, ApplicationRepositoryError>;

    /// Delete an application and return the removed record.
    async fn delete(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, ApplicationRepositoryError>;

    /// Page through a user's applications joined with their jobs.
    ///
    /// Applications whose job no longer exists are skipped and not counted.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Page<AppliedJob>, ApplicationRepositoryError>;
}
