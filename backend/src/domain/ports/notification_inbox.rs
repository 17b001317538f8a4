//! Driving port for the pull-based notification inbox.

use async_trait::async_trait;

use crate::domain::{Error, Notification, Page};

/// Request for one page of a user's notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNotificationsRequest {
    pub user_id: String,
    pub page: Option<u32>,
}

/// Request to post a message into a user's inbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnqueueNotificationRequest {
    pub user_id: String,
    pub message: String,
}

/// Driving port for posting, reading, and clearing notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationInbox: Send + Sync {
    /// Store an unread notification for the user.
    async fn enqueue(&self, request: EnqueueNotificationRequest) -> Result<(), Error>;

    /// Newest-first page of the user's notifications.
    async fn list(&self, request: ListNotificationsRequest) -> Result<Page<Notification>, Error>;

    /// Remove all of the user's notifications, returning how many were removed.
    async fn clear(&self, user_id: String) -> Result<u64, Error>;
}
