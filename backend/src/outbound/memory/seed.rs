//! Seed data for the in-memory store.
//!
//! Without a database the store starts empty, so nothing can be applied for.
//! A seed document lists the users and jobs to preload:
//!
//! ```json
//! {
//!   "users": ["6b1f8a1e-9d0c-4f5e-8f37-3c1b7f6f2a10"],
//!   "jobs": [{
//!     "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
//!     "title": "Backend Engineer",
//!     "company": "Acme",
//!     "location": "Lisbon",
//!     "type": "Full-time",
//!     "employerId": "0b7e2f4c-1a9d-4c3e-9f11-5d2a8e6b7c40",
//!     "employerName": "Acme Hiring",
//!     "vacancies": 2
//!   }]
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{EmployerId, Job, JobId, UserId};

use super::InMemoryStore;

/// Errors raised while reading a seed document.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("seed document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("job {job_id} has negative vacancies ({vacancies})")]
    NegativeVacancies { job_id: JobId, vacancies: i32 },
}

/// A job posting to preload. Applicant counts always start at zero.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedJob {
    pub id: JobId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub company: String,
    pub location: String,
    #[serde(default)]
    pub salary: f64,
    #[serde(rename = "type")]
    pub job_type: String,
    #[serde(default)]
    pub experience: i32,
    pub employer_id: EmployerId,
    pub employer_name: String,
    pub vacancies: i32,
    /// Defaults to the load time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl SeedJob {
    fn into_job(self, now: DateTime<Utc>) -> Job {
        Job {
            id: self.id,
            title: self.title,
            description: self.description,
            company: self.company,
            location: self.location,
            salary: self.salary,
            job_type: self.job_type,
            experience: self.experience,
            employer_id: self.employer_id,
            employer_name: self.employer_name,
            vacancies: self.vacancies,
            applicant_count: 0,
            created_at: self.created_at.unwrap_or(now),
        }
    }
}

/// Users and jobs the in-memory store starts with.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemorySeed {
    #[serde(default)]
    pub users: Vec<UserId>,
    #[serde(default)]
    pub jobs: Vec<SeedJob>,
}

impl MemorySeed {
    /// Parse and validate a seed document.
    ///
    /// # Errors
    /// Returns [`SeedError::Parse`] for malformed JSON and
    /// [`SeedError::NegativeVacancies`] when a job breaks the counter
    /// invariant.
    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        let seed: Self = serde_json::from_str(raw)?;
        if let Some(job) = seed.jobs.iter().find(|job| job.vacancies < 0) {
            return Err(SeedError::NegativeVacancies {
                job_id: job.id,
                vacancies: job.vacancies,
            });
        }
        Ok(seed)
    }
}

impl InMemoryStore {
    /// Register the seed's users and jobs, replacing jobs with the same id.
    pub fn load_seed(&self, seed: &MemorySeed, now: DateTime<Utc>) {
        for user_id in &seed.users {
            self.seed_user(*user_id);
        }
        for job in &seed.jobs {
            self.seed_job(job.clone().into_job(now));
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::UserRepository;

    const USER: &str = "6b1f8a1e-9d0c-4f5e-8f37-3c1b7f6f2a10";
    const JOB: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn document(vacancies: i32) -> String {
        serde_json::json!({
            "users": [USER],
            "jobs": [{
                "id": JOB,
                "title": "Backend Engineer",
                "company": "Acme",
                "location": "Lisbon",
                "type": "Full-time",
                "employerId": "0b7e2f4c-1a9d-4c3e-9f11-5d2a8e6b7c40",
                "employerName": "Acme Hiring",
                "vacancies": vacancies
            }]
        })
        .to_string()
    }

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    #[tokio::test]
    async fn loading_registers_users_and_jobs(now: DateTime<Utc>) {
        let seed = MemorySeed::from_json(&document(2)).expect("seed parses");
        let store = InMemoryStore::new();

        store.load_seed(&seed, now);

        let user_id = UserId::parse(USER).expect("valid user id");
        assert!(store.exists(&user_id).await.expect("lookup succeeds"));
        let job = store
            .job(&JobId::parse(JOB).expect("valid job id"))
            .expect("job seeded");
        assert_eq!(job.job_type, "Full-time");
        assert_eq!((job.vacancies, job.applicant_count), (2, 0));
        assert_eq!(job.created_at, now);
        assert!(job.description.is_empty());
    }

    #[rstest]
    fn negative_vacancies_are_rejected() {
        let err = MemorySeed::from_json(&document(-1)).expect_err("invalid seed");

        assert!(matches!(err, SeedError::NegativeVacancies { vacancies: -1, .. }));
    }

    #[rstest]
    #[case("not json")]
    #[case(r#"{"users": ["not-a-uuid"]}"#)]
    fn malformed_documents_are_rejected(#[case] raw: &str) {
        assert!(matches!(
            MemorySeed::from_json(raw),
            Err(SeedError::Parse(_))
        ));
    }

    #[rstest]
    fn empty_document_seeds_nothing() {
        let seed = MemorySeed::from_json("{}").expect("seed parses");

        assert!(seed.users.is_empty());
        assert!(seed.jobs.is_empty());
    }
}
