//! Port onto the append-only notification log.

use async_trait::async_trait;

use crate::domain::{Notification, Page, PageRequest, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by notification repository adapters.
    pub enum NotificationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "notification repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "notification repository query failed: {message}",
    }
}

/// Port for storing and reading user notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Append a notification.
    async fn insert(&self, notification: &Notification) -> Result<(), NotificationRepositoryError>;

    /// Page through a user's notifications, newest first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Page<Notification>, NotificationRepositoryError>;

    /// Remove every notification for a user, returning how many were removed.
    async fn delete_for_user(&self, user_id: &UserId) -> Result<u64, NotificationRepositoryError>;
}
