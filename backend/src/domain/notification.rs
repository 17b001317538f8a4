//! User-facing notification records.
//!
//! Notifications are produced only as a side effect of application status
//! changes and are read by polling. They never feed back into application or
//! job state.

use chrono::{DateTime, Utc};

use super::{ApplicationStatus, NotificationId, UserId};

/// A stored message for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
}

impl Notification {
    /// New unread notification.
    #[must_use]
    pub fn unread(user_id: UserId, message: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: NotificationId::random(),
            user_id,
            message: message.into(),
            created_at,
            is_read: false,
        }
    }
}

/// Message sent when an application moves to `status`.
///
/// # Examples
/// ```
/// use jobs_backend::domain::{ApplicationStatus, status_change_message};
///
/// assert_eq!(
///     status_change_message("Rust Engineer", ApplicationStatus::InProgress),
///     "Your application for the job \"Rust Engineer\" has been updated to 'In Progress'."
/// );
/// ```
#[must_use]
pub fn status_change_message(job_title: &str, status: ApplicationStatus) -> String {
    format!(
        "Your application for the job \"{job_title}\" has been updated to '{}'.",
        status.label()
    )
}
