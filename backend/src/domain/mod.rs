//! Domain primitives, aggregates, and services.
//!
//! Purpose: model the job application lifecycle independently of HTTP and
//! storage. Inbound adapters call the driving ports in [`ports`]; services in
//! this module implement them on top of the driven ports.
//!
//! Public surface:
//! - `Application`, `ApplicationStatus`: the aggregate and its state machine.
//! - `TransitionEffect`: counter consequences of each status change.
//! - `Job`, `CounterField`, `CounterDelta`: the job read model and counters.
//! - `Notification`: messages produced by status changes.
//! - `ApplicationLifecycleService`, `ApplicationQueryService`,
//!   `NotificationInboxService`: driving port implementations.
//! - `Error`, `ErrorCode`: transport-agnostic failures.

mod application;
mod application_events;
mod application_lifecycle_service;
mod application_query_service;
mod counter_adjuster;
pub mod error;
mod ids;
mod job;
mod notification;
mod notification_dispatcher;
mod notification_inbox_service;
mod pagination;
pub mod ports;
mod trace_id;
mod transition;

pub use self::application::{
    Application, ApplicationDraft, ApplicationStatus, AppliedJob, UnknownStatusError,
};
pub use self::application_events::ApplicationStatusChanged;
pub use self::application_lifecycle_service::ApplicationLifecycleService;
pub use self::application_query_service::{
    ApplicationQueryService, DEFAULT_APPLICATIONS_PAGE_SIZE,
};
pub use self::counter_adjuster::CounterAdjuster;
pub use self::error::{Error, ErrorCode};
pub use self::ids::{
    ApplicationId, EmployerId, IdValidationError, JobId, NotificationId, UserId, parse_id_field,
};
pub use self::job::{CounterDelta, CounterField, CounterOutcome, Job};
pub use self::notification::{Notification, status_change_message};
pub use self::notification_dispatcher::NotificationDispatcher;
pub use self::notification_inbox_service::{NOTIFICATIONS_PAGE_SIZE, NotificationInboxService};
pub use self::pagination::{MAX_PAGE_SIZE, Page, PageRequest};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::transition::TransitionEffect;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use jobs_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("Application not found."))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
