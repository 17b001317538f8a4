//! Notification inbox HTTP handlers.
//!
//! ```text
//! POST   /api/v1/notifications/{user_id}
//! GET    /api/v1/notifications/{user_id}?page
//! DELETE /api/v1/notifications/{user_id}
//! ```

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{EnqueueNotificationRequest, ListNotificationsRequest};
use crate::domain::{Notification, Page};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// A stored notification.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub user_id: String,
    pub message: String,
    #[schema(format = "date-time")]
    pub created_at: String,
    pub is_read: bool,
}

impl From<Notification> for NotificationBody {
    fn from(value: Notification) -> Self {
        Self {
            id: value.id.to_string(),
            user_id: value.user_id.to_string(),
            message: value.message,
            created_at: value.created_at.to_rfc3339(),
            is_read: value.is_read,
        }
    }
}

/// Paging metadata for a notification listing.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPaginationBody {
    pub total: u64,
    pub page: u32,
    pub total_pages: u64,
}

/// One page of notifications, newest first.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsResponseBody {
    pub notifications: Vec<NotificationBody>,
    pub pagination: NotificationPaginationBody,
}

impl From<Page<Notification>> for NotificationsResponseBody {
    fn from(value: Page<Notification>) -> Self {
        let pagination = NotificationPaginationBody {
            total: value.total,
            page: value.request.page(),
            total_pages: value.total_pages(),
        };
        Self {
            notifications: value.items.into_iter().map(NotificationBody::from).collect(),
            pagination,
        }
    }
}

/// Confirmation of a cleared inbox.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClearNotificationsResponseBody {
    pub deleted: u64,
}

/// Message posted to a user's inbox.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PostNotificationRequestBody {
    pub message: String,
}

/// Confirmation of a posted notification.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostNotificationResponseBody {
    pub message: String,
}

/// Query parameters for listing notifications.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ListNotificationsQuery {
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct UserPath {
    user_id: String,
}

/// Post a notification to a user's inbox.
#[utoipa::path(
    post,
    path = "/api/v1/notifications/{user_id}",
    params(
        ("user_id" = String, Path, description = "Recipient identifier")
    ),
    request_body = PostNotificationRequestBody,
    responses(
        (status = 200, description = "Notification stored", body = PostNotificationResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Notification not stored", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "postNotification"
)]
#[post("/notifications/{user_id}")]
pub async fn post_notification(
    state: web::Data<HttpState>,
    path: web::Path<UserPath>,
    payload: web::Json<PostNotificationRequestBody>,
) -> ApiResult<web::Json<PostNotificationResponseBody>> {
    state
        .notifications
        .enqueue(EnqueueNotificationRequest {
            user_id: path.into_inner().user_id,
            message: payload.into_inner().message,
        })
        .await?;

    Ok(web::Json(PostNotificationResponseBody {
        message: "Notification added successfully.".to_owned(),
    }))
}

/// List a user's notifications, five per page.
#[utoipa::path(
    get,
    path = "/api/v1/notifications/{user_id}",
    params(
        ("user_id" = String, Path, description = "Recipient identifier"),
        ("page" = Option<u32>, Query, description = "One-based page number, default 1")
    ),
    responses(
        (status = 200, description = "Notifications page", body = NotificationsResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "listNotifications"
)]
#[get("/notifications/{user_id}")]
pub async fn list_notifications(
    state: web::Data<HttpState>,
    path: web::Path<UserPath>,
    query: web::Query<ListNotificationsQuery>,
) -> ApiResult<web::Json<NotificationsResponseBody>> {
    let page = state
        .notifications
        .list(ListNotificationsRequest {
            user_id: path.into_inner().user_id,
            page: query.into_inner().page,
        })
        .await?;

    Ok(web::Json(NotificationsResponseBody::from(page)))
}

/// Delete every notification for a user.
#[utoipa::path(
    delete,
    path = "/api/v1/notifications/{user_id}",
    params(
        ("user_id" = String, Path, description = "Recipient identifier")
    ),
    responses(
        (
            status = 200,
            description = "Notifications cleared",
            body = ClearNotificationsResponseBody
        ),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "clearNotifications"
)]
#[delete("/notifications/{user_id}")]
pub async fn clear_notifications(
    state: web::Data<HttpState>,
    path: web::Path<UserPath>,
) -> ApiResult<web::Json<ClearNotificationsResponseBody>> {
    let deleted = state
        .notifications
        .clear(path.into_inner().user_id)
        .await?;

    Ok(web::Json(ClearNotificationsResponseBody { deleted }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use chrono::{Duration, TimeZone, Utc};
    use mockable::DefaultClock;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{
        MockApplicationCommand, MockApplicationQuery, MockNotificationRepository,
        NotificationInbox, NotificationRepository, NotificationRepositoryError,
    };
    use crate::domain::{NotificationInboxService, UserId};
    use crate::inbound::http::error::json_config;
    use crate::outbound::memory::InMemoryStore;

    fn test_app(
        store: &InMemoryStore,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        app_with_inbox(Arc::new(NotificationInboxService::new(
            Arc::new(store.clone()),
            Arc::new(DefaultClock),
        )))
    }

    fn app_with_inbox(
        inbox: Arc<dyn NotificationInbox>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = HttpState::new(
            Arc::new(MockApplicationCommand::new()),
            Arc::new(MockApplicationQuery::new()),
            inbox,
        );
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .service(
                web::scope("/api/v1")
                    .service(post_notification)
                    .service(list_notifications)
                    .service(clear_notifications),
            )
    }

    async fn seed(store: &InMemoryStore, user_id: UserId, count: i64) {
        let base = Utc
            .with_ymd_and_hms(2026, 3, 14, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        for minute in 0..count {
            let notification = Notification::unread(
                user_id,
                format!("update {minute}"),
                base + Duration::minutes(minute),
            );
            NotificationRepository::insert(store, &notification)
                .await
                .expect("insert succeeds");
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn lists_newest_first_in_pages_of_five() {
        let store = InMemoryStore::new();
        let user_id = UserId::random();
        seed(&store, user_id, 6).await;
        let app = actix_test::init_service(test_app(&store)).await;

        let request = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/notifications/{user_id}"))
            .to_request();
        let body: NotificationsResponseBody =
            actix_test::call_and_read_body_json(&app, request).await;

        assert_eq!(body.notifications.len(), 5);
        assert_eq!(
            body.notifications.first().map(|n| n.message.as_str()),
            Some("update 5")
        );
        assert_eq!(body.pagination.total, 6);
        assert_eq!(body.pagination.page, 1);
        assert_eq!(body.pagination.total_pages, 2);
    }

    #[rstest]
    #[actix_web::test]
    async fn clear_removes_every_notification() {
        let store = InMemoryStore::new();
        let user_id = UserId::random();
        seed(&store, user_id, 3).await;
        let app = actix_test::init_service(test_app(&store)).await;

        let request = actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/notifications/{user_id}"))
            .to_request();
        let body: ClearNotificationsResponseBody =
            actix_test::call_and_read_body_json(&app, request).await;

        assert_eq!(body.deleted, 3);
        assert!(store.notifications_for(&user_id).is_empty());
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_user_id_is_rejected() {
        let store = InMemoryStore::new();
        let app = actix_test::init_service(test_app(&store)).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/v1/notifications/not-a-uuid")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn posted_notification_is_listed_unread() {
        let store = InMemoryStore::new();
        let user_id = UserId::random();
        let app = actix_test::init_service(test_app(&store)).await;

        let request = actix_test::TestRequest::post()
            .uri(&format!("/api/v1/notifications/{user_id}"))
            .set_json(serde_json::json!({ "message": "Interview on Monday" }))
            .to_request();
        let body: PostNotificationResponseBody =
            actix_test::call_and_read_body_json(&app, request).await;

        assert_eq!(body.message, "Notification added successfully.");
        let stored = store.notifications_for(&user_id);
        assert_eq!(stored.len(), 1);
        assert!(
            stored
                .first()
                .is_some_and(|n| n.message == "Interview on Monday" && !n.is_read)
        );
    }

    #[rstest]
    #[case("/api/v1/notifications/not-a-uuid", serde_json::json!({ "message": "hi" }))]
    #[case(
        "/api/v1/notifications/6b1f8a1e-9d0c-4f5e-8f37-3c1b7f6f2a10",
        serde_json::json!({ "message": "" })
    )]
    #[case(
        "/api/v1/notifications/6b1f8a1e-9d0c-4f5e-8f37-3c1b7f6f2a10",
        serde_json::json!(["not", "an", "object"])
    )]
    #[actix_web::test]
    async fn invalid_post_is_rejected(#[case] uri: &str, #[case] payload: serde_json::Value) {
        let store = InMemoryStore::new();
        let app = actix_test::init_service(test_app(&store)).await;

        let request = actix_test::TestRequest::post()
            .uri(uri)
            .set_json(payload)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn failed_store_write_is_redacted_server_error() {
        let mut repo = MockNotificationRepository::new();
        repo.expect_insert()
            .times(1)
            .return_once(|_| Err(NotificationRepositoryError::query("disk full")));
        let inbox = NotificationInboxService::new(Arc::new(repo), Arc::new(DefaultClock));
        let app = actix_test::init_service(app_with_inbox(Arc::new(inbox))).await;

        let request = actix_test::TestRequest::post()
            .uri(&format!("/api/v1/notifications/{}", UserId::random()))
            .set_json(serde_json::json!({ "message": "hi" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = actix_test::read_body_json(response).await;
        assert_eq!(body["message"], "Internal server error");
    }
}
