//! PostgreSQL-backed `ApplicationRepository` implementation using Diesel ORM.
//!
//! The three consistency guarantees of the port map onto single statements:
//! `INSERT` against the `applications_user_job_key` unique constraint, a
//! status `UPDATE` filtered on the expected status, and `DELETE ... RETURNING`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ApplicationRepository, ApplicationRepositoryError};
use crate::domain::{
    Application, ApplicationDraft, ApplicationId, ApplicationStatus, AppliedJob, EmployerId,
    JobId, Page, PageRequest, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_pool_error, map_diesel_error_with_duplicate};
use super::diesel_job_repository::row_to_job;
use super::models::{ApplicationRow, JobRow, NewApplicationRow};
use super::pool::{DbPool, PoolError};
use super::schema::{applications, jobs};

/// Diesel-backed implementation of the application repository port.
#[derive(Clone)]
pub struct DieselApplicationRepository {
    pool: DbPool,
}

impl DieselApplicationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ApplicationRepositoryError {
    map_basic_pool_error(error, ApplicationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ApplicationRepositoryError {
    map_diesel_error_with_duplicate(
        error,
        ApplicationRepositoryError::query,
        ApplicationRepositoryError::connection,
        ApplicationRepositoryError::duplicate,
    )
}

fn row_to_application(row: ApplicationRow) -> Result<Application, ApplicationRepositoryError> {
    let ApplicationRow {
        id,
        user_id,
        job_id,
        employer_id,
        employer_name,
        status,
        applied_at,
    } = row;

    let status = status
        .parse::<ApplicationStatus>()
        .map_err(|err| ApplicationRepositoryError::query(err.to_string()))?;

    Ok(Application::new(ApplicationDraft {
        id: ApplicationId::from_uuid(id),
        user_id: UserId::from_uuid(user_id),
        job_id: JobId::from_uuid(job_id),
        employer_id: EmployerId::from_uuid(employer_id),
        employer_name,
        status,
        applied_at,
    }))
}

fn to_count(value: i64) -> Result<u64, ApplicationRepositoryError> {
    u64::try_from(value)
        .map_err(|_| ApplicationRepositoryError::query("negative application count"))
}

fn to_sql_int(value: u64) -> Result<i64, ApplicationRepositoryError> {
    i64::try_from(value).map_err(|_| ApplicationRepositoryError::query("page offset overflow"))
}

#[async_trait]
impl ApplicationRepository for DieselApplicationRepository {
    async fn insert(&self, application: &Application) -> Result<(), ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewApplicationRow {
            id: *application.id().as_uuid(),
            user_id: *application.user_id().as_uuid(),
            job_id: *application.job_id().as_uuid(),
            employer_id: *application.employer_id().as_uuid(),
            employer_name: application.employer_name(),
            status: application.status().label(),
            applied_at: application.applied_at(),
        };

        diesel::insert_into(applications::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = applications::table
            .filter(applications::id.eq(id.as_uuid()))
            .select(ApplicationRow::as_select())
            .first::<ApplicationRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_application).transpose()
    }

    async fn update_status(
        &self,
        id: &ApplicationId,
        expected: ApplicationStatus,
        next: ApplicationStatus,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(
            applications::table
                .filter(applications::id.eq(id.as_uuid()))
                .filter(applications::status.eq(expected.label())),
        )
        .set(applications::status.eq(next.label()))
        .returning(ApplicationRow::as_returning())
        .get_result::<ApplicationRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_application).transpose()
    }

    async fn delete(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::delete(applications::table.filter(applications::id.eq(id.as_uuid())))
            .returning(ApplicationRow::as_returning())
            .get_result::<ApplicationRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_application).transpose()
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Page<AppliedJob>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = applications::table
            .inner_join(jobs::table.on(jobs::id.eq(applications::job_id)))
            .filter(applications::user_id.eq(user_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let rows: Vec<(ApplicationRow, JobRow)> = applications::table
            .inner_join(jobs::table.on(jobs::id.eq(applications::job_id)))
            .filter(applications::user_id.eq(user_id.as_uuid()))
            .order((applications::applied_at.desc(), applications::id.desc()))
            .limit(i64::from(page.page_size()))
            .offset(to_sql_int(page.offset())?)
            .select((ApplicationRow::as_select(), JobRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let items = rows
            .into_iter()
            .map(|(application, job)| {
                Ok(AppliedJob {
                    application: row_to_application(application)?,
                    job: row_to_job(job),
                })
            })
            .collect::<Result<Vec<_>, ApplicationRepositoryError>>()?;

        Ok(Page {
            items,
            total: to_count(total)?,
            request: page,
        })
    }
}
