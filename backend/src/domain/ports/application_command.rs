//! Driving port for application lifecycle mutations.
//!
//! Requests carry raw identifiers as received from the caller; the service
//! validates them before touching storage.

use async_trait::async_trait;

use crate::domain::{Application, ApplicationId, Error};

/// Request to apply for a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyRequest {
    pub user_id: String,
    pub job_id: String,
}

/// Request to move an application to another status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatusRequest {
    pub application_id: String,
    pub status: String,
}

/// Request to withdraw an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevokeRequest {
    pub application_id: String,
}

/// Outcome of a successful revocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevokeResponse {
    pub application_id: ApplicationId,
}

/// Driving port for apply, status update, and revoke.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationCommand: Send + Sync {
    /// Record a new application with status `Applied` and bump the job's
    /// applicant count.
    ///
    /// Fails with `invalid_request` for missing or malformed ids,
    /// `not_found` when the user or job is unknown, and `conflict` when the
    /// user already applied for the job.
    async fn apply(&self, request: ApplyRequest) -> Result<Application, Error>;

    /// Move an application to a new status, applying the vacancy side effect
    /// of the transition and notifying the applicant.
    ///
    /// Fails with `invalid_request`, `not_found`, or `capacity_exhausted`
    /// when accepting into a job with no vacancy left.
    async fn update_status(&self, request: UpdateStatusRequest) -> Result<Application, Error>;

    /// Delete an application and reverse its counter effects.
    ///
    /// A second revoke of the same id fails with `not_found`.
    async fn revoke(&self, request: RevokeRequest) -> Result<RevokeResponse, Error>;
}
