//! Pull-based notification inbox.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    EnqueueNotificationRequest, ListNotificationsRequest, NotificationInbox,
    NotificationRepository, NotificationRepositoryError,
};
use crate::domain::{
    Error, Notification, NotificationDispatcher, Page, PageRequest, UserId, parse_id_field,
};

/// Notifications returned per page.
pub const NOTIFICATIONS_PAGE_SIZE: u32 = 5;

fn map_repository_error(error: NotificationRepositoryError) -> Error {
    match error {
        NotificationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("notification repository unavailable: {message}"))
        }
        NotificationRepositoryError::Query { message } => {
            Error::internal(format!("notification repository error: {message}"))
        }
    }
}

/// Domain service implementing the notification inbox port.
#[derive(Clone)]
pub struct NotificationInboxService<N> {
    notifications: Arc<N>,
    dispatcher: NotificationDispatcher<N>,
}

impl<N> NotificationInboxService<N> {
    /// Posted notifications are stamped with `clock`.
    pub fn new(notifications: Arc<N>, clock: Arc<dyn Clock>) -> Self {
        let dispatcher = NotificationDispatcher::new(Arc::clone(&notifications), clock);
        Self {
            notifications,
            dispatcher,
        }
    }
}

#[async_trait]
impl<N> NotificationInbox for NotificationInboxService<N>
where
    N: NotificationRepository,
{
    async fn enqueue(&self, request: EnqueueNotificationRequest) -> Result<(), Error> {
        let user_id: UserId = parse_id_field(&request.user_id, "userId")?;
        if request.message.trim().is_empty() {
            return Err(Error::invalid_request("message must not be empty")
                .with_details(json!({ "field": "message" })));
        }

        if self
            .dispatcher
            .enqueue(&user_id.to_string(), &request.message)
            .await
        {
            Ok(())
        } else {
            Err(Error::internal(format!("notification for user {user_id} was not stored")))
        }
    }

    async fn list(&self, request: ListNotificationsRequest) -> Result<Page<Notification>, Error> {
        let user_id: UserId = parse_id_field(&request.user_id, "userId")?;
        let page = PageRequest::new(request.page, None, NOTIFICATIONS_PAGE_SIZE)?;

        self.notifications
            .list_for_user(&user_id, page)
            .await
            .map_err(map_repository_error)
    }

    async fn clear(&self, user_id: String) -> Result<u64, Error> {
        let user_id: UserId = parse_id_field(&user_id, "userId")?;
        let removed = self
            .notifications
            .delete_for_user(&user_id)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %user_id, removed, "notifications cleared");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use mockable::MockClock;
    use mockall::predicate::eq;
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockNotificationRepository;

    fn inbox(
        repo: MockNotificationRepository,
    ) -> NotificationInboxService<MockNotificationRepository> {
        let mut clock = MockClock::new();
        clock.expect_utc().return_const(chrono::Utc::now());
        NotificationInboxService::new(Arc::new(repo), Arc::new(clock))
    }

    fn post(user_id: &str, message: &str) -> EnqueueNotificationRequest {
        EnqueueNotificationRequest {
            user_id: user_id.to_owned(),
            message: message.to_owned(),
        }
    }

    #[tokio::test]
    async fn enqueue_stores_posted_message() {
        let user_id = UserId::random();
        let mut repo = MockNotificationRepository::new();
        repo.expect_insert()
            .withf(move |notification| {
                notification.user_id == user_id && notification.message == "Interview on Monday"
            })
            .times(1)
            .return_once(|_| Ok(()));

        inbox(repo)
            .enqueue(post(&user_id.to_string(), "Interview on Monday"))
            .await
            .expect("enqueue succeeds");
    }

    #[rstest]
    #[case("not-a-uuid", "hello")]
    #[case("6b1f8a1e-9d0c-4f5e-8f37-3c1b7f6f2a10", "   ")]
    #[tokio::test]
    async fn enqueue_rejects_invalid_input(#[case] user_id: &str, #[case] message: &str) {
        let mut repo = MockNotificationRepository::new();
        repo.expect_insert().times(0);

        let err = inbox(repo)
            .enqueue(post(user_id, message))
            .await
            .expect_err("invalid input");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn enqueue_reports_store_failure_as_internal() {
        let mut repo = MockNotificationRepository::new();
        repo.expect_insert()
            .times(1)
            .return_once(|_| Err(NotificationRepositoryError::connection("refused")));

        let err = inbox(repo)
            .enqueue(post(&UserId::random().to_string(), "hello"))
            .await
            .expect_err("store failure");

        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn list_uses_fixed_page_size() {
        let user_id = UserId::random();
        let expected = PageRequest::new(Some(2), None, 5).expect("valid page");
        let mut repo = MockNotificationRepository::new();
        repo.expect_list_for_user()
            .with(eq(user_id), eq(expected))
            .times(1)
            .return_once(move |_, request| {
                Ok(Page {
                    items: Vec::new(),
                    total: 6,
                    request,
                })
            });

        let page = inbox(repo)
            .list(ListNotificationsRequest {
                user_id: user_id.to_string(),
                page: Some(2),
            })
            .await
            .expect("listing succeeds");

        assert_eq!(page.total_pages(), 2);
    }

    #[tokio::test]
    async fn clear_returns_removed_count() {
        let user_id = UserId::random();
        let mut repo = MockNotificationRepository::new();
        repo.expect_delete_for_user()
            .with(eq(user_id))
            .times(1)
            .return_once(|_| Ok(3));

        let removed = inbox(repo)
            .clear(user_id.to_string())
            .await
            .expect("clear succeeds");

        assert_eq!(removed, 3);
    }

    #[tokio::test]
    async fn clear_rejects_malformed_user_id() {
        let mut repo = MockNotificationRepository::new();
        repo.expect_delete_for_user().times(0);

        let err = inbox(repo)
            .clear("abc".to_owned())
            .await
            .expect_err("invalid id");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn list_maps_query_failure_to_internal_error() {
        let mut repo = MockNotificationRepository::new();
        repo.expect_list_for_user()
            .return_once(|_, _| Err(NotificationRepositoryError::query("bad column")));

        let err = inbox(repo)
            .list(ListNotificationsRequest {
                user_id: UserId::random().to_string(),
                page: None,
            })
            .await
            .expect_err("query failure");

        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
