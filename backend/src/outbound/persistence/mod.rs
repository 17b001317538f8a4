//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories implement the domain's driven ports over a shared
//! [`DbPool`]. Row structs (`models.rs`) and table definitions (`schema.rs`)
//! stay private to this module; adapters only hand domain types across the
//! boundary.
//!
//! # Example
//!
//! ```no_run
//! use jobs_backend::outbound::persistence::{
//!     DbPool, DieselApplicationRepository, PoolConfig, run_pending_migrations,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://jobs@localhost/jobs";
//! run_pending_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let applications = DieselApplicationRepository::new(pool);
//! # let _ = applications;
//! # Ok(())
//! # }
//! ```

mod diesel_application_repository;
mod diesel_basic_error_mapping;
mod diesel_job_repository;
mod diesel_notification_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_application_repository::DieselApplicationRepository;
pub use diesel_job_repository::DieselJobRepository;
pub use diesel_notification_repository::DieselNotificationRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
