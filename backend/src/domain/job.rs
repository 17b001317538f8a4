//! Job posting read model and counter primitives.
//!
//! Jobs belong to the catalogue; this service only reads them and nudges the
//! two counters through [`crate::domain::CounterAdjuster`].

use chrono::{DateTime, Utc};

use super::{EmployerId, JobId};

/// Job fields the lifecycle reads, plus the summary returned when listing a
/// user's applications.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub salary: f64,
    pub job_type: String,
    pub experience: i32,
    pub employer_id: EmployerId,
    pub employer_name: String,
    /// Remaining open headcount. Never negative.
    pub vacancies: i32,
    /// Number of applications currently on file.
    pub applicant_count: i32,
    pub created_at: DateTime<Utc>,
}

impl Job {
    /// Whether another application can be accepted.
    #[must_use]
    pub fn has_vacancy(&self) -> bool {
        self.vacancies > 0
    }
}

/// Job counter that lifecycle operations may adjust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterField {
    /// Number of applications on file.
    ApplicantCount,
    /// Remaining open headcount.
    Vacancies,
}

impl CounterField {
    /// Name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApplicantCount => "applicant_count",
            Self::Vacancies => "vacancies",
        }
    }
}

/// Signed unit change applied to a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterDelta {
    Increment,
    Decrement,
}

impl CounterDelta {
    /// Numeric value of the delta.
    #[must_use]
    pub const fn value(self) -> i32 {
        match self {
            Self::Increment => 1,
            Self::Decrement => -1,
        }
    }

    /// The delta that undoes this one.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Increment => Self::Decrement,
            Self::Decrement => Self::Increment,
        }
    }
}

/// Result of asking the store to adjust a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterOutcome {
    /// The delta was applied.
    Adjusted,
    /// No job with that identifier exists any more.
    JobMissing,
    /// A decrement would have taken the counter below zero; nothing changed.
    Exhausted,
}
