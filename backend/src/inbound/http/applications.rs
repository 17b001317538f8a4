//! Application lifecycle HTTP handlers.
//!
//! ```text
//! POST   /api/v1/applications/apply
//! PATCH  /api/v1/applications/{application_id}/status
//! DELETE /api/v1/applications/revoke/{application_id}
//! GET    /api/v1/applications/user/{user_id}?page&limit
//! ```
//!
//! Identifiers arrive as raw strings and are validated by the domain
//! services, so a malformed id yields the same `invalid_request` payload
//! whether it came from the path or the body.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    ApplyRequest, ListUserApplicationsRequest, RevokeRequest, RevokeResponse, UpdateStatusRequest,
};
use crate::domain::{Application, AppliedJob, Page};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request payload for applying to a job.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequestBody {
    #[serde(default)]
    #[schema(format = "uuid")]
    pub user_id: String,
    #[serde(default)]
    #[schema(format = "uuid")]
    pub job_id: String,
}

/// Request payload for a status change.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequestBody {
    /// One of `Applied`, `InProgress` (or `In Progress`), `Accepted`,
    /// `Rejected`.
    #[serde(default)]
    #[schema(example = "Accepted")]
    pub status: String,
}

/// A stored application.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub user_id: String,
    #[schema(format = "uuid")]
    pub job_id: String,
    #[schema(format = "uuid")]
    pub employer_id: String,
    pub employer_name: String,
    #[schema(example = "Applied")]
    pub status: String,
    #[schema(format = "date-time")]
    pub applied_at: String,
}

impl From<Application> for ApplicationResponseBody {
    fn from(value: Application) -> Self {
        Self {
            id: value.id().to_string(),
            user_id: value.user_id().to_string(),
            job_id: value.job_id().to_string(),
            employer_id: value.employer_id().to_string(),
            employer_name: value.employer_name().to_owned(),
            status: value.status().as_str().to_owned(),
            applied_at: value.applied_at().to_rfc3339(),
        }
    }
}

/// Confirmation of a revoked application.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevokeResponseBody {
    pub deleted: bool,
    #[schema(format = "uuid")]
    pub application_id: String,
}

impl From<RevokeResponse> for RevokeResponseBody {
    fn from(value: RevokeResponse) -> Self {
        Self {
            deleted: true,
            application_id: value.application_id.to_string(),
        }
    }
}

/// Job summary joined with the user's application for it.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppliedJobBody {
    #[schema(format = "uuid")]
    pub application_id: String,
    /// Job identifier.
    #[schema(format = "uuid")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub salary: f64,
    #[serde(rename = "type")]
    pub job_type: String,
    pub experience: i32,
    pub employer_name: String,
    pub vacancies: i32,
    pub applicant_count: i32,
    #[schema(format = "date-time")]
    pub created_at: String,
    pub status: String,
    #[schema(format = "date-time")]
    pub applied_at: String,
}

impl From<AppliedJob> for AppliedJobBody {
    fn from(value: AppliedJob) -> Self {
        let AppliedJob { application, job } = value;
        Self {
            application_id: application.id().to_string(),
            id: job.id.to_string(),
            title: job.title,
            description: job.description,
            company: job.company,
            location: job.location,
            salary: job.salary,
            job_type: job.job_type,
            experience: job.experience,
            employer_name: job.employer_name,
            vacancies: job.vacancies,
            applicant_count: job.applicant_count,
            created_at: job.created_at.to_rfc3339(),
            status: application.status().as_str().to_owned(),
            applied_at: application.applied_at().to_rfc3339(),
        }
    }
}

/// One page of a user's applications.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserApplicationsResponseBody {
    pub current_page: u32,
    pub total_pages: u64,
    pub total_applications: u64,
    pub jobs: Vec<AppliedJobBody>,
}

impl From<Page<AppliedJob>> for UserApplicationsResponseBody {
    fn from(value: Page<AppliedJob>) -> Self {
        Self {
            current_page: value.request.page(),
            total_pages: value.total_pages(),
            total_applications: value.total,
            jobs: value.items.into_iter().map(AppliedJobBody::from).collect(),
        }
    }
}

/// Query parameters for listing a user's applications.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListApplicationsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ApplicationPath {
    application_id: String,
}

#[derive(Debug, Deserialize)]
struct UserPath {
    user_id: String,
}

/// Apply for a job.
#[utoipa::path(
    post,
    path = "/api/v1/applications/apply",
    request_body = ApplyRequestBody,
    responses(
        (status = 201, description = "Application created", body = ApplicationResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "User or job not found", body = ErrorSchema),
        (status = 409, description = "Already applied", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "applyForJob"
)]
#[post("/applications/apply")]
pub async fn apply_for_job(
    state: web::Data<HttpState>,
    payload: web::Json<ApplyRequestBody>,
) -> ApiResult<HttpResponse> {
    let ApplyRequestBody { user_id, job_id } = payload.into_inner();
    let application = state
        .applications
        .apply(ApplyRequest { user_id, job_id })
        .await?;

    Ok(HttpResponse::Created().json(ApplicationResponseBody::from(application)))
}

/// Move an application to another status.
#[utoipa::path(
    patch,
    path = "/api/v1/applications/{application_id}/status",
    params(
        ("application_id" = String, Path, description = "Application identifier")
    ),
    request_body = UpdateStatusRequestBody,
    responses(
        (status = 200, description = "Updated application", body = ApplicationResponseBody),
        (status = 400, description = "Invalid request or no vacancy left", body = ErrorSchema),
        (status = 404, description = "Application or job not found", body = ErrorSchema),
        (status = 409, description = "Concurrent status change", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "updateApplicationStatus"
)]
#[patch("/applications/{application_id}/status")]
pub async fn update_application_status(
    state: web::Data<HttpState>,
    path: web::Path<ApplicationPath>,
    payload: web::Json<UpdateStatusRequestBody>,
) -> ApiResult<web::Json<ApplicationResponseBody>> {
    let application = state
        .applications
        .update_status(UpdateStatusRequest {
            application_id: path.into_inner().application_id,
            status: payload.into_inner().status,
        })
        .await?;

    Ok(web::Json(ApplicationResponseBody::from(application)))
}

/// Withdraw an application.
#[utoipa::path(
    delete,
    path = "/api/v1/applications/revoke/{application_id}",
    params(
        ("application_id" = String, Path, description = "Application identifier")
    ),
    responses(
        (status = 200, description = "Application revoked", body = RevokeResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Application not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "revokeApplication"
)]
#[delete("/applications/revoke/{application_id}")]
pub async fn revoke_application(
    state: web::Data<HttpState>,
    path: web::Path<ApplicationPath>,
) -> ApiResult<web::Json<RevokeResponseBody>> {
    let response = state
        .applications
        .revoke(RevokeRequest {
            application_id: path.into_inner().application_id,
        })
        .await?;

    Ok(web::Json(RevokeResponseBody::from(response)))
}

/// List the jobs a user applied for, newest application first.
#[utoipa::path(
    get,
    path = "/api/v1/applications/user/{user_id}",
    params(
        ("user_id" = String, Path, description = "Applicant identifier"),
        ("page" = Option<u32>, Query, description = "One-based page number, default 1"),
        ("limit" = Option<u32>, Query, description = "Page size, default 5, at most 100")
    ),
    responses(
        (status = 200, description = "Applications page", body = UserApplicationsResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "listUserApplications"
)]
#[get("/applications/user/{user_id}")]
pub async fn list_user_applications(
    state: web::Data<HttpState>,
    path: web::Path<UserPath>,
    query: web::Query<ListApplicationsQuery>,
) -> ApiResult<web::Json<UserApplicationsResponseBody>> {
    let ListApplicationsQuery { page, limit } = query.into_inner();
    let listed = state
        .application_queries
        .list_for_user(ListUserApplicationsRequest {
            user_id: path.into_inner().user_id,
            page,
            page_size: limit,
        })
        .await?;

    Ok(web::Json(UserApplicationsResponseBody::from(listed)))
}

#[cfg(test)]
#[path = "applications_tests.rs"]
mod tests;
