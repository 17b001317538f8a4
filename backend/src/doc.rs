//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST endpoint of the inbound HTTP adapter
//! (applications, notifications, health) plus the schema wrappers for the
//! domain error payload. The document backs Swagger UI in debug builds and is
//! exported by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::applications::{
    AppliedJobBody, ApplicationResponseBody, ApplyRequestBody, RevokeResponseBody,
    UpdateStatusRequestBody, UserApplicationsResponseBody,
};
use crate::inbound::http::notifications::{
    ClearNotificationsResponseBody, NotificationBody, NotificationPaginationBody,
    NotificationsResponseBody, PostNotificationRequestBody, PostNotificationResponseBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Job portal backend API",
        description = "Job application lifecycle, vacancy counters, and notification inbox.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::applications::apply_for_job,
        crate::inbound::http::applications::update_application_status,
        crate::inbound::http::applications::revoke_application,
        crate::inbound::http::applications::list_user_applications,
        crate::inbound::http::notifications::post_notification,
        crate::inbound::http::notifications::list_notifications,
        crate::inbound::http::notifications::clear_notifications,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ApplyRequestBody,
        UpdateStatusRequestBody,
        ApplicationResponseBody,
        RevokeResponseBody,
        AppliedJobBody,
        UserApplicationsResponseBody,
        PostNotificationRequestBody,
        PostNotificationResponseBody,
        NotificationBody,
        NotificationPaginationBody,
        NotificationsResponseBody,
        ClearNotificationsResponseBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (
            name = "applications",
            description = "Apply, update status, revoke, and list applications"
        ),
        (name = "notifications", description = "Pull-based notification inbox"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
