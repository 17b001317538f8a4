//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, event sinks) describe what the domain needs
//! from storage. Driving ports (commands, queries) describe what inbound
//! adapters may ask of the domain. Each driven port exposes a typed error
//! enum so adapters map their failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod application_command;
mod application_event_sink;
mod application_query;
mod application_repository;
mod job_repository;
mod notification_inbox;
mod notification_repository;
mod user_repository;

#[cfg(test)]
pub use application_command::MockApplicationCommand;
pub use application_command::{
    ApplicationCommand, ApplyRequest, RevokeRequest, RevokeResponse, UpdateStatusRequest,
};
#[cfg(test)]
pub use application_event_sink::MockApplicationEventSink;
pub use application_event_sink::{ApplicationEventSink, ApplicationEventSinkError};
#[cfg(test)]
pub use application_query::MockApplicationQuery;
pub use application_query::{ApplicationQuery, ListUserApplicationsRequest};
#[cfg(test)]
pub use application_repository::MockApplicationRepository;
pub use application_repository::{ApplicationRepository, ApplicationRepositoryError};
#[cfg(test)]
pub use job_repository::MockJobRepository;
pub use job_repository::{JobRepository, JobRepositoryError};
#[cfg(test)]
pub use notification_inbox::MockNotificationInbox;
pub use notification_inbox::{
    EnqueueNotificationRequest, ListNotificationsRequest, NotificationInbox,
};
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
pub use notification_repository::{NotificationRepository, NotificationRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
