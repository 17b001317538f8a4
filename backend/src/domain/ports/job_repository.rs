//! Port onto the job catalogue.
//!
//! The lifecycle only needs to read a job and to nudge its counters. Counter
//! changes are relative deltas evaluated by the store itself, so concurrent
//! adjustments for the same job never lose updates.

use async_trait::async_trait;

use crate::domain::{CounterDelta, CounterField, CounterOutcome, Job, JobId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by job repository adapters.
    pub enum JobRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "job repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "job repository query failed: {message}",
    }
}

/// Port for job lookup and counter adjustment.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Find a job by id.
    async fn find_by_id(&self, id: &JobId) -> Result<Option<Job>, JobRepositoryError>;

    /// Apply `delta` to `field` atomically.
    ///
    /// Decrements never take a counter below zero: when the counter is
    /// already zero the store leaves it untouched and reports
    /// [`CounterOutcome::Exhausted`].
    async fn adjust_counter(
        &self,
        id: &JobId,
        field: CounterField,
        delta: CounterDelta,
    ) -> Result<CounterOutcome, JobRepositoryError>;
}
