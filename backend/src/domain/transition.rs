//! Side effects attached to application status transitions.
//!
//! The lifecycle permits any status to move to any other. The table below is
//! the single place that decides which transitions touch the job's vacancy
//! counter: entering `Accepted` consumes a vacancy and must pass a capacity
//! check, leaving `Accepted` releases one. Every other pair has no effect.

use super::{ApplicationStatus, CounterDelta};

/// Counter consequence of moving an application between two statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionEffect {
    /// Change applied to the job's vacancies, if any.
    pub vacancy_delta: Option<CounterDelta>,
    /// Whether the job must have a free vacancy before the transition.
    pub requires_capacity_check: bool,
}

impl TransitionEffect {
    const NONE: Self = Self {
        vacancy_delta: None,
        requires_capacity_check: false,
    };

    const HOLD_VACANCY: Self = Self {
        vacancy_delta: Some(CounterDelta::Decrement),
        requires_capacity_check: true,
    };

    const RELEASE_VACANCY: Self = Self {
        vacancy_delta: Some(CounterDelta::Increment),
        requires_capacity_check: false,
    };

    /// Look up the effect of moving from `from` to `to`.
    ///
    /// # Examples
    /// ```
    /// use jobs_backend::domain::{ApplicationStatus, CounterDelta, TransitionEffect};
    ///
    /// let effect =
    ///     TransitionEffect::between(ApplicationStatus::InProgress, ApplicationStatus::Accepted);
    /// assert_eq!(effect.vacancy_delta, Some(CounterDelta::Decrement));
    /// assert!(effect.requires_capacity_check);
    /// ```
    #[must_use]
    pub const fn between(from: ApplicationStatus, to: ApplicationStatus) -> Self {
        use crate::domain::ApplicationStatus::Accepted;

        match (from, to) {
            (Accepted, Accepted) => Self::NONE,
            (_, Accepted) => Self::HOLD_VACANCY,
            (Accepted, _) => Self::RELEASE_VACANCY,
            _ => Self::NONE,
        }
    }

    /// Effect that undoes this one's counter change.
    #[must_use]
    pub const fn compensation(self) -> Option<CounterDelta> {
        match self.vacancy_delta {
            Some(delta) => Some(delta.inverse()),
            None => None,
        }
    }
}
