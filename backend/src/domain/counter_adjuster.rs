//! Relative adjustments of a job's counters.
//!
//! All counter writes go through [`CounterAdjuster`]. The store applies each
//! delta itself (`SET field = field + delta`), so concurrent adjustments of
//! the same job compose instead of overwriting each other.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::domain::ports::{JobRepository, JobRepositoryError};
use crate::domain::{CounterDelta, CounterField, CounterOutcome, JobId};

/// Applies counter deltas to jobs and logs their outcome.
#[derive(Clone)]
pub struct CounterAdjuster<J> {
    jobs: Arc<J>,
}

impl<J> CounterAdjuster<J> {
    pub fn new(jobs: Arc<J>) -> Self {
        Self { jobs }
    }
}

impl<J> CounterAdjuster<J>
where
    J: JobRepository,
{
    /// Apply `delta` to `field` of the job.
    ///
    /// A missing job is logged and reported as [`CounterOutcome::JobMissing`]
    /// rather than as an error. Infrastructure failures are returned.
    pub async fn adjust(
        &self,
        job_id: &JobId,
        field: CounterField,
        delta: CounterDelta,
    ) -> Result<CounterOutcome, JobRepositoryError> {
        let outcome = self.jobs.adjust_counter(job_id, field, delta).await?;
        match outcome {
            CounterOutcome::Adjusted => debug!(
                job_id = %job_id,
                field = field.as_str(),
                delta = delta.value(),
                "job counter adjusted"
            ),
            CounterOutcome::JobMissing => warn!(
                job_id = %job_id,
                field = field.as_str(),
                delta = delta.value(),
                "job not found while adjusting counter"
            ),
            CounterOutcome::Exhausted => warn!(
                job_id = %job_id,
                field = field.as_str(),
                "counter already at zero; decrement skipped"
            ),
        }
        Ok(outcome)
    }

    /// Apply `delta` and swallow any failure after logging it.
    ///
    /// Used for adjustments that follow a committed write, where failing the
    /// request would misreport the state the caller already changed.
    pub async fn adjust_best_effort(
        &self,
        job_id: &JobId,
        field: CounterField,
        delta: CounterDelta,
    ) {
        if let Err(err) = self.adjust(job_id, field, delta).await {
            error!(
                job_id = %job_id,
                field = field.as_str(),
                delta = delta.value(),
                error = %err,
                "job counter adjustment failed"
            );
        }
    }
}
