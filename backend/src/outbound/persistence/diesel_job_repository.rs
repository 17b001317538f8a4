//! PostgreSQL-backed `JobRepository` implementation using Diesel ORM.
//!
//! Counter adjustments are single relative `UPDATE` statements. Decrements
//! carry a `> 0` guard so they can never drive a counter negative; a guarded
//! update that matches nothing is disambiguated with an existence check.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{JobRepository, JobRepositoryError};
use crate::domain::{CounterDelta, CounterField, CounterOutcome, EmployerId, Job, JobId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::JobRow;
use super::pool::{DbPool, PoolError};
use super::schema::jobs;

/// Diesel-backed implementation of the job repository port.
#[derive(Clone)]
pub struct DieselJobRepository {
    pool: DbPool,
}

impl DieselJobRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> JobRepositoryError {
    map_basic_pool_error(error, JobRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> JobRepositoryError {
    map_basic_diesel_error(
        error,
        JobRepositoryError::query,
        JobRepositoryError::connection,
    )
}

/// Convert a jobs row into the domain read model.
pub(super) fn row_to_job(row: JobRow) -> Job {
    let JobRow {
        id,
        title,
        description,
        company,
        location,
        salary,
        job_type,
        experience,
        employer_id,
        employer_name,
        vacancies,
        applicant_count,
        created_at,
    } = row;

    Job {
        id: JobId::from_uuid(id),
        title,
        description,
        company,
        location,
        salary,
        job_type,
        experience,
        employer_id: EmployerId::from_uuid(employer_id),
        employer_name,
        vacancies,
        applicant_count,
        created_at,
    }
}

#[async_trait]
impl JobRepository for DieselJobRepository {
    async fn find_by_id(&self, id: &JobId) -> Result<Option<Job>, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = jobs::table
            .filter(jobs::id.eq(id.as_uuid()))
            .select(JobRow::as_select())
            .first::<JobRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_job))
    }

    async fn adjust_counter(
        &self,
        id: &JobId,
        field: CounterField,
        delta: CounterDelta,
    ) -> Result<CounterOutcome, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = jobs::table.filter(jobs::id.eq(*id.as_uuid()));

        let updated = match (field, delta) {
            (CounterField::Vacancies, CounterDelta::Increment) => {
                diesel::update(target)
                    .set(jobs::vacancies.eq(jobs::vacancies + 1))
                    .execute(&mut conn)
                    .await
            }
            (CounterField::Vacancies, CounterDelta::Decrement) => {
                diesel::update(target.filter(jobs::vacancies.gt(0)))
                    .set(jobs::vacancies.eq(jobs::vacancies - 1))
                    .execute(&mut conn)
                    .await
            }
            (CounterField::ApplicantCount, CounterDelta::Increment) => {
                diesel::update(target)
                    .set(jobs::applicant_count.eq(jobs::applicant_count + 1))
                    .execute(&mut conn)
                    .await
            }
            (CounterField::ApplicantCount, CounterDelta::Decrement) => {
                diesel::update(target.filter(jobs::applicant_count.gt(0)))
                    .set(jobs::applicant_count.eq(jobs::applicant_count - 1))
                    .execute(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;

        if updated > 0 {
            return Ok(CounterOutcome::Adjusted);
        }

        let job_exists: bool = diesel::select(exists(jobs::table.filter(jobs::id.eq(id.as_uuid()))))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(if job_exists {
            CounterOutcome::Exhausted
        } else {
            CounterOutcome::JobMissing
        })
    }
}
