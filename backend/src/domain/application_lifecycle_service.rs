//! Application lifecycle service.
//!
//! Implements [`ApplicationCommand`]: apply, status update, and revoke. The
//! service coordinates three stores and keeps the job counters consistent
//! with the stored applications:
//!
//! - `applicant_count` tracks the number of applications on file;
//! - `vacancies` drops by one while an application is `Accepted`.
//!
//! Counter changes that must happen before a write (holding a vacancy) fail
//! the request; changes that follow a committed write are best effort.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{
    ApplicationCommand, ApplicationEventSink, ApplicationRepository, ApplicationRepositoryError,
    ApplyRequest, JobRepository, JobRepositoryError, RevokeRequest, RevokeResponse,
    UpdateStatusRequest, UserRepository, UserRepositoryError,
};
use crate::domain::{
    Application, ApplicationDraft, ApplicationId, ApplicationStatus, ApplicationStatusChanged,
    CounterAdjuster, CounterDelta, CounterField, CounterOutcome, Error, Job, JobId,
    TransitionEffect, UserId, parse_id_field,
};

pub(crate) fn map_application_error(error: ApplicationRepositoryError) -> Error {
    match error {
        ApplicationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("application repository unavailable: {message}"))
        }
        ApplicationRepositoryError::Query { message } => {
            Error::internal(format!("application repository error: {message}"))
        }
        ApplicationRepositoryError::Duplicate { message } => Error::conflict(message),
    }
}

pub(crate) fn map_job_error(error: JobRepositoryError) -> Error {
    match error {
        JobRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("job repository unavailable: {message}"))
        }
        JobRepositoryError::Query { message } => {
            Error::internal(format!("job repository error: {message}"))
        }
    }
}

fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn application_not_found(id: ApplicationId) -> Error {
    Error::not_found("Application not found.")
        .with_details(json!({ "applicationId": id.to_string() }))
}

fn job_not_found(id: JobId) -> Error {
    Error::not_found("Job not found.").with_details(json!({ "jobId": id.to_string() }))
}

fn no_vacancies(job: &Job) -> Error {
    Error::capacity_exhausted("No vacancies available for this job.").with_details(json!({
        "jobId": job.id.to_string(),
        "vacancies": job.vacancies,
    }))
}

fn parse_status(raw: &str) -> Result<ApplicationStatus, Error> {
    raw.parse().map_err(|_| {
        let allowed: Vec<&str> = ApplicationStatus::ALL
            .iter()
            .map(|status| status.as_str())
            .collect();
        Error::invalid_request("Invalid status value.").with_details(json!({
            "field": "status",
            "value": raw,
            "allowed": allowed,
        }))
    })
}

/// Domain service implementing the application command port.
#[derive(Clone)]
pub struct ApplicationLifecycleService<A, J, U> {
    applications: Arc<A>,
    jobs: Arc<J>,
    users: Arc<U>,
    counters: CounterAdjuster<J>,
    events: Arc<dyn ApplicationEventSink>,
    clock: Arc<dyn Clock>,
}

impl<A, J, U> ApplicationLifecycleService<A, J, U> {
    /// Create a lifecycle service over the three stores.
    ///
    /// Status changes are published to `events` after they are stored.
    pub fn new(
        applications: Arc<A>,
        jobs: Arc<J>,
        users: Arc<U>,
        events: Arc<dyn ApplicationEventSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let counters = CounterAdjuster::new(Arc::clone(&jobs));
        Self {
            applications,
            jobs,
            users,
            counters,
            events,
            clock,
        }
    }
}

impl<A, J, U> ApplicationLifecycleService<A, J, U>
where
    A: ApplicationRepository,
    J: JobRepository,
    U: UserRepository,
{
    async fn load_job(&self, id: JobId) -> Result<Job, Error> {
        self.jobs
            .find_by_id(&id)
            .await
            .map_err(map_job_error)?
            .ok_or_else(|| job_not_found(id))
    }

    /// Take the vacancy an incoming `Accepted` status needs, or give one back
    /// when leaving `Accepted`.
    async fn apply_vacancy_effect(&self, job: &Job, effect: TransitionEffect) -> Result<(), Error> {
        if effect.requires_capacity_check && !job.has_vacancy() {
            return Err(no_vacancies(job));
        }
        let Some(delta) = effect.vacancy_delta else {
            return Ok(());
        };
        let outcome = self
            .counters
            .adjust(&job.id, CounterField::Vacancies, delta)
            .await
            .map_err(map_job_error)?;
        if outcome == CounterOutcome::Exhausted {
            return Err(no_vacancies(job));
        }
        Ok(())
    }

    /// Explain why a compare-and-set status write matched nothing.
    async fn stale_write_error(&self, id: ApplicationId) -> Error {
        match self.applications.find_by_id(&id).await {
            Ok(None) => application_not_found(id),
            Ok(Some(_)) => Error::conflict("Application status changed concurrently; retry.")
                .with_details(json!({ "applicationId": id.to_string() })),
            Err(err) => map_application_error(err),
        }
    }

    async fn publish(&self, event: ApplicationStatusChanged) {
        if let Err(err) = self.events.status_changed(&event).await {
            warn!(
                application_id = %event.application_id,
                user_id = %event.user_id,
                error = %err,
                "status change published but not delivered"
            );
        }
    }
}

#[async_trait]
impl<A, J, U> ApplicationCommand for ApplicationLifecycleService<A, J, U>
where
    A: ApplicationRepository,
    J: JobRepository,
    U: UserRepository,
{
    async fn apply(&self, request: ApplyRequest) -> Result<Application, Error> {
        let user_id: UserId = parse_id_field(&request.user_id, "userId")?;
        let job_id: JobId = parse_id_field(&request.job_id, "jobId")?;

        let user_exists = self
            .users
            .exists(&user_id)
            .await
            .map_err(map_user_error)?;
        if !user_exists {
            return Err(Error::not_found("User not found.")
                .with_details(json!({ "userId": user_id.to_string() })));
        }
        let job = self.load_job(job_id).await?;

        let application = Application::new(ApplicationDraft {
            id: ApplicationId::random(),
            user_id,
            job_id,
            employer_id: job.employer_id,
            employer_name: job.employer_name,
            status: ApplicationStatus::Applied,
            applied_at: self.clock.utc(),
        });

        self.applications
            .insert(&application)
            .await
            .map_err(|err| match err {
                ApplicationRepositoryError::Duplicate { .. } => {
                    Error::conflict("You have already applied for this job.").with_details(json!({
                        "userId": user_id.to_string(),
                        "jobId": job_id.to_string(),
                    }))
                }
                other => map_application_error(other),
            })?;

        self.counters
            .adjust_best_effort(&job_id, CounterField::ApplicantCount, CounterDelta::Increment)
            .await;

        info!(
            operation = "apply",
            application_id = %application.id(),
            user_id = %user_id,
            job_id = %job_id,
            "application submitted"
        );
        Ok(application)
    }

    async fn update_status(&self, request: UpdateStatusRequest) -> Result<Application, Error> {
        let id: ApplicationId = parse_id_field(&request.application_id, "applicationId")?;
        let next = parse_status(&request.status)?;

        let current = self
            .applications
            .find_by_id(&id)
            .await
            .map_err(map_application_error)?
            .ok_or_else(|| application_not_found(id))?;
        let job = self.load_job(current.job_id()).await?;

        let from = current.status();
        if from == next {
            debug!(
                operation = "update_status",
                application_id = %id,
                status = %next,
                "status already up to date"
            );
            return Ok(current);
        }

        let effect = TransitionEffect::between(from, next);
        self.apply_vacancy_effect(&job, effect).await?;

        let written = self.applications.update_status(&id, from, next).await;
        let updated = match written {
            Ok(Some(updated)) => updated,
            Ok(None) => {
                self.compensate(&job.id, effect).await;
                return Err(self.stale_write_error(id).await);
            }
            Err(err) => {
                self.compensate(&job.id, effect).await;
                error!(
                    operation = "update_status",
                    application_id = %id,
                    error = %err,
                    "status write failed"
                );
                return Err(map_application_error(err));
            }
        };

        info!(
            operation = "update_status",
            application_id = %id,
            job_id = %job.id,
            from = %from,
            to = %next,
            "application status updated"
        );

        self.publish(ApplicationStatusChanged {
            application_id: id,
            user_id: updated.user_id(),
            job_id: job.id,
            job_title: job.title,
            from,
            to: next,
        })
        .await;

        Ok(updated)
    }

    async fn revoke(&self, request: RevokeRequest) -> Result<RevokeResponse, Error> {
        let id: ApplicationId = parse_id_field(&request.application_id, "applicationId")?;

        let removed = self
            .applications
            .delete(&id)
            .await
            .map_err(map_application_error)?
            .ok_or_else(|| application_not_found(id))?;

        let job_id = removed.job_id();
        self.counters
            .adjust_best_effort(&job_id, CounterField::ApplicantCount, CounterDelta::Decrement)
            .await;
        if removed.status() == ApplicationStatus::Accepted {
            self.counters
                .adjust_best_effort(&job_id, CounterField::Vacancies, CounterDelta::Increment)
                .await;
        }

        info!(
            operation = "revoke",
            application_id = %id,
            job_id = %job_id,
            status = %removed.status(),
            "application revoked"
        );
        Ok(RevokeResponse { application_id: id })
    }
}

impl<A, J, U> ApplicationLifecycleService<A, J, U>
where
    J: JobRepository,
{
    /// Undo a vacancy change whose status write did not land.
    async fn compensate(&self, job_id: &JobId, effect: TransitionEffect) {
        if let Some(delta) = effect.compensation() {
            self.counters
                .adjust_best_effort(job_id, CounterField::Vacancies, delta)
                .await;
        }
    }
}

#[cfg(test)]
#[path = "application_lifecycle_service_tests.rs"]
mod tests;
