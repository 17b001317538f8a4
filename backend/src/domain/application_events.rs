//! Domain events emitted by the application lifecycle.
//!
//! Events are published only after the state change they describe has been
//! stored, so consumers never observe a change that was later rolled back.

use super::{ApplicationId, ApplicationStatus, JobId, UserId, status_change_message};

/// An application moved from one status to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationStatusChanged {
    pub application_id: ApplicationId,
    pub user_id: UserId,
    pub job_id: JobId,
    pub job_title: String,
    pub from: ApplicationStatus,
    pub to: ApplicationStatus,
}

impl ApplicationStatusChanged {
    /// Message shown to the applicant.
    #[must_use]
    pub fn applicant_message(&self) -> String {
        status_change_message(&self.job_title, self.to)
    }
}
