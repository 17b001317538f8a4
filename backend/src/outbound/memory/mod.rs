//! In-process store implementing every driven port.
//!
//! Backs the server when no database URL is configured and drives the
//! lifecycle scenario tests. A single mutex guards all tables, which gives
//! the same atomicity the PostgreSQL adapters get from single statements:
//! the `(user_id, job_id)` pair is unique, decrements never go below zero,
//! and status writes are compare-and-set. A [`MemorySeed`] preloads users
//! and jobs.

mod seed;

pub use seed::{MemorySeed, SeedError, SeedJob};

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{
    ApplicationRepository, ApplicationRepositoryError, JobRepository, JobRepositoryError,
    NotificationRepository, NotificationRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    Application, ApplicationId, ApplicationStatus, AppliedJob, CounterDelta, CounterField,
    CounterOutcome, Job, JobId, Notification, Page, PageRequest, UserId,
};

#[derive(Default)]
struct Tables {
    users: HashSet<UserId>,
    jobs: HashMap<JobId, Job>,
    applications: HashMap<ApplicationId, Application>,
    notifications: Vec<Notification>,
}

/// Shared in-memory tables. Clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

fn page_of<T>(items: Vec<T>, page: PageRequest) -> Page<T> {
    let total = items.len() as u64;
    let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(page.page_size()).unwrap_or(usize::MAX);
    Page {
        items: items.into_iter().skip(skip).take(take).collect(),
        total,
        request: page,
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        // Every mutation completes before the guard drops, so a poisoned
        // lock still holds consistent tables.
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a user id.
    pub fn seed_user(&self, id: UserId) {
        self.tables().users.insert(id);
    }

    /// Insert or replace a job.
    pub fn seed_job(&self, job: Job) {
        self.tables().jobs.insert(job.id, job);
    }

    /// Remove a job, leaving its applications in place.
    pub fn remove_job(&self, id: &JobId) -> Option<Job> {
        self.tables().jobs.remove(id)
    }

    /// Current state of a job.
    pub fn job(&self, id: &JobId) -> Option<Job> {
        self.tables().jobs.get(id).cloned()
    }

    /// Number of stored applications.
    pub fn application_count(&self) -> usize {
        self.tables().applications.len()
    }

    /// Notifications stored for a user, oldest first.
    pub fn notifications_for(&self, user_id: &UserId) -> Vec<Notification> {
        self.tables()
            .notifications
            .iter()
            .filter(|notification| notification.user_id == *user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn exists(&self, id: &UserId) -> Result<bool, UserRepositoryError> {
        Ok(self.tables().users.contains(id))
    }
}

#[async_trait]
impl JobRepository for InMemoryStore {
    async fn find_by_id(&self, id: &JobId) -> Result<Option<Job>, JobRepositoryError> {
        Ok(self.job(id))
    }

    async fn adjust_counter(
        &self,
        id: &JobId,
        field: CounterField,
        delta: CounterDelta,
    ) -> Result<CounterOutcome, JobRepositoryError> {
        let mut tables = self.tables();
        let Some(job) = tables.jobs.get_mut(id) else {
            return Ok(CounterOutcome::JobMissing);
        };
        let counter = match field {
            CounterField::Vacancies => &mut job.vacancies,
            CounterField::ApplicantCount => &mut job.applicant_count,
        };
        if delta == CounterDelta::Decrement && *counter <= 0 {
            return Ok(CounterOutcome::Exhausted);
        }
        *counter += delta.value();
        Ok(CounterOutcome::Adjusted)
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryStore {
    async fn insert(&self, application: &Application) -> Result<(), ApplicationRepositoryError> {
        let mut tables = self.tables();
        let duplicate = tables.applications.values().any(|existing| {
            existing.user_id() == application.user_id() && existing.job_id() == application.job_id()
        });
        if duplicate {
            return Err(ApplicationRepositoryError::duplicate(
                "applications_user_job_key",
            ));
        }
        tables
            .applications
            .insert(application.id(), application.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        Ok(self.tables().applications.get(id).cloned())
    }

    async fn update_status(
        &self,
        id: &ApplicationId,
        expected: ApplicationStatus,
        next: ApplicationStatus,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let mut tables = self.tables();
        let Some(stored) = tables.applications.get_mut(id) else {
            return Ok(None);
        };
        if stored.status() != expected {
            return Ok(None);
        }
        let updated = stored.clone().with_status(next);
        *stored = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        Ok(self.tables().applications.remove(id))
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Page<AppliedJob>, ApplicationRepositoryError> {
        let tables = self.tables();
        let mut joined: Vec<AppliedJob> = tables
            .applications
            .values()
            .filter(|application| application.user_id() == *user_id)
            .filter_map(|application| {
                tables.jobs.get(&application.job_id()).map(|job| AppliedJob {
                    application: application.clone(),
                    job: job.clone(),
                })
            })
            .collect();
        joined.sort_by(|left, right| {
            right
                .application
                .applied_at()
                .cmp(&left.application.applied_at())
                .then_with(|| right.application.id().cmp(&left.application.id()))
        });
        Ok(page_of(joined, page))
    }
}

#[async_trait]
impl NotificationRepository for InMemoryStore {
    async fn insert(&self, notification: &Notification) -> Result<(), NotificationRepositoryError> {
        self.tables().notifications.push(notification.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Page<Notification>, NotificationRepositoryError> {
        let mut mine = self.notifications_for(user_id);
        mine.sort_by(|left, right| {
            right
                .created_at
                .cmp(&left.created_at)
                .then_with(|| right.id.cmp(&left.id))
        });
        Ok(page_of(mine, page))
    }

    async fn delete_for_user(&self, user_id: &UserId) -> Result<u64, NotificationRepositoryError> {
        let mut tables = self.tables();
        let before = tables.notifications.len();
        tables
            .notifications
            .retain(|notification| notification.user_id != *user_id);
        Ok((before - tables.notifications.len()) as u64)
    }
}
