//! Best-effort delivery of user notifications.
//!
//! The dispatcher never fails its caller: a malformed recipient or a storage
//! failure is logged and reported as `false`.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, warn};

use crate::domain::ports::{ApplicationEventSink, ApplicationEventSinkError, NotificationRepository};
use crate::domain::{ApplicationStatusChanged, Notification, UserId};

/// Writes notifications to the notification store.
#[derive(Clone)]
pub struct NotificationDispatcher<N> {
    notifications: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<N> NotificationDispatcher<N> {
    pub fn new(notifications: Arc<N>, clock: Arc<dyn Clock>) -> Self {
        Self {
            notifications,
            clock,
        }
    }
}

impl<N> NotificationDispatcher<N>
where
    N: NotificationRepository,
{
    /// Store an unread notification for `user_id`.
    ///
    /// Returns `false` when the id is not a UUID or the store rejects the
    /// write.
    pub async fn enqueue(&self, user_id: &str, message: &str) -> bool {
        let Ok(recipient) = UserId::parse(user_id) else {
            warn!(user_id, "notification recipient is not a valid user id");
            return false;
        };

        let notification = Notification::unread(recipient, message, self.clock.utc());
        match self.notifications.insert(&notification).await {
            Ok(()) => {
                debug!(
                    user_id = %recipient,
                    notification_id = %notification.id,
                    "notification stored"
                );
                true
            }
            Err(err) => {
                warn!(user_id = %recipient, error = %err, "failed to store notification");
                false
            }
        }
    }
}

#[async_trait]
impl<N> ApplicationEventSink for NotificationDispatcher<N>
where
    N: NotificationRepository,
{
    async fn status_changed(
        &self,
        event: &ApplicationStatusChanged,
    ) -> Result<(), ApplicationEventSinkError> {
        let message = event.applicant_message();
        if self.enqueue(&event.user_id.to_string(), &message).await {
            debug!(
                application_id = %event.application_id,
                job_id = %event.job_id,
                to = %event.to,
                "applicant notified of status change"
            );
            Ok(())
        } else {
            Err(ApplicationEventSinkError::delivery(format!(
                "notification for application {} on job {} not stored",
                event.application_id, event.job_id
            )))
        }
    }
}
