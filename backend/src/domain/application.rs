//! Job application aggregate and its status enumeration.
//!
//! An [`Application`] is created by applying, changed only through a status
//! update, and removed by revocation. The `(user_id, job_id)` pair is unique
//! across stored applications; the storage adapters enforce that constraint.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ApplicationId, EmployerId, Job, JobId, UserId};

/// Status of an application.
///
/// Any status may move to any other. Only entering and leaving
/// [`ApplicationStatus::Accepted`] carries side effects; see
/// [`crate::domain::TransitionEffect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    /// Initial status assigned on apply.
    Applied,
    /// The employer is reviewing the application.
    #[serde(alias = "In Progress")]
    InProgress,
    /// The applicant holds one of the job's vacancies.
    Accepted,
    /// The application was turned down.
    Rejected,
}

impl ApplicationStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [Self::Applied, Self::InProgress, Self::Accepted, Self::Rejected];

    /// Identifier used on the wire, e.g. `InProgress`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::InProgress => "InProgress",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
        }
    }

    /// Human-facing label, also the persisted representation, e.g.
    /// `In Progress`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InProgress => "In Progress",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a status string matches none of the known statuses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application status: {0}")]
pub struct UnknownStatusError(pub String);

impl FromStr for ApplicationStatus {
    type Err = UnknownStatusError;

    /// Accepts both the wire identifier and the label.
    ///
    /// # Examples
    /// ```
    /// use jobs_backend::domain::ApplicationStatus;
    ///
    /// assert_eq!("In Progress".parse(), Ok(ApplicationStatus::InProgress));
    /// assert_eq!("InProgress".parse(), Ok(ApplicationStatus::InProgress));
    /// assert!("Hired".parse::<ApplicationStatus>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s || status.label() == s)
            .ok_or_else(|| UnknownStatusError(s.to_owned()))
    }
}

/// Field bundle used to construct an [`Application`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationDraft {
    pub id: ApplicationId,
    pub user_id: UserId,
    pub job_id: JobId,
    pub employer_id: EmployerId,
    pub employer_name: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

/// A user's request to be considered for a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    id: ApplicationId,
    user_id: UserId,
    job_id: JobId,
    employer_id: EmployerId,
    employer_name: String,
    status: ApplicationStatus,
    applied_at: DateTime<Utc>,
}

impl Application {
    /// Build an application from its fields.
    #[must_use]
    pub fn new(draft: ApplicationDraft) -> Self {
        let ApplicationDraft {
            id,
            user_id,
            job_id,
            employer_id,
            employer_name,
            status,
            applied_at,
        } = draft;
        Self {
            id,
            user_id,
            job_id,
            employer_id,
            employer_name,
            status,
            applied_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> ApplicationId {
        self.id
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    #[must_use]
    pub fn employer_id(&self) -> EmployerId {
        self.employer_id
    }

    #[must_use]
    pub fn employer_name(&self) -> &str {
        self.employer_name.as_str()
    }

    #[must_use]
    pub fn status(&self) -> ApplicationStatus {
        self.status
    }

    /// Creation timestamp; never changes after apply.
    #[must_use]
    pub fn applied_at(&self) -> DateTime<Utc> {
        self.applied_at
    }

    /// Copy of this application carrying `status`.
    #[must_use]
    pub fn with_status(mut self, status: ApplicationStatus) -> Self {
        self.status = status;
        self
    }
}

/// An application joined with the job it targets, as listed for a user.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedJob {
    pub application: Application,
    pub job: Job,
}
