//! Tests for application lifecycle HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::Utc;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::{
    ApplicationLifecycleService, ApplicationQueryService, EmployerId, Error, ErrorCode, Job,
    JobId, NotificationDispatcher, NotificationInboxService, UserId,
};
use crate::inbound::http::error::{json_config, path_config, query_config};
use crate::outbound::memory::InMemoryStore;

struct Portal {
    store: InMemoryStore,
    user_id: UserId,
    job_id: JobId,
}

fn job(id: JobId, title: &str, vacancies: i32) -> Job {
    Job {
        id,
        title: title.to_owned(),
        description: "Own the hiring pipeline".to_owned(),
        company: "Acme".to_owned(),
        location: "Remote".to_owned(),
        salary: 85_000.0,
        job_type: "Full-time".to_owned(),
        experience: 3,
        employer_id: EmployerId::random(),
        employer_name: "Ada Employer".to_owned(),
        vacancies,
        applicant_count: 0,
        created_at: Utc::now(),
    }
}

#[fixture]
fn portal() -> Portal {
    let store = InMemoryStore::new();
    let user_id = UserId::random();
    let job_id = JobId::random();
    store.seed_user(user_id);
    store.seed_job(job(job_id, "Platform Engineer", 1));
    Portal {
        store,
        user_id,
        job_id,
    }
}

fn http_state(store: &InMemoryStore) -> HttpState {
    let store = Arc::new(store.clone());
    let events = Arc::new(NotificationDispatcher::new(
        Arc::clone(&store),
        Arc::new(DefaultClock),
    ));
    HttpState::new(
        Arc::new(ApplicationLifecycleService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&store),
            events,
            Arc::new(DefaultClock),
        )),
        Arc::new(ApplicationQueryService::new(Arc::clone(&store))),
        Arc::new(NotificationInboxService::new(store, Arc::new(DefaultClock))),
    )
}

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
    App::new()
        .app_data(web::Data::new(http_state(store)))
        .app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .service(
            web::scope("/api/v1")
                .service(apply_for_job)
                .service(update_application_status)
                .service(revoke_application)
                .service(list_user_applications),
        )
}

fn apply_request(user_id: &str, job_id: &str) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri("/api/v1/applications/apply")
        .set_json(json!({ "userId": user_id, "jobId": job_id }))
        .to_request()
}

fn status_request(application_id: &str, status: &str) -> actix_http::Request {
    actix_test::TestRequest::patch()
        .uri(&format!("/api/v1/applications/{application_id}/status"))
        .set_json(json!({ "status": status }))
        .to_request()
}

fn revoke_request(application_id: &str) -> actix_http::Request {
    actix_test::TestRequest::delete()
        .uri(&format!("/api/v1/applications/revoke/{application_id}"))
        .to_request()
}

#[rstest]
#[actix_web::test]
async fn apply_returns_created_application(portal: Portal) {
    let app = actix_test::init_service(test_app(&portal.store)).await;

    let response = actix_test::call_service(
        &app,
        apply_request(&portal.user_id.to_string(), &portal.job_id.to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: ApplicationResponseBody = actix_test::read_body_json(response).await;
    assert_eq!(body.status, "Applied");
    assert_eq!(body.job_id, portal.job_id.to_string());
    assert_eq!(body.employer_name, "Ada Employer");
    let stored = portal.store.job(&portal.job_id).expect("job exists");
    assert_eq!(stored.applicant_count, 1);
}

#[rstest]
#[actix_web::test]
async fn applying_twice_is_a_conflict(portal: Portal) {
    let app = actix_test::init_service(test_app(&portal.store)).await;
    let user_id = portal.user_id.to_string();
    let job_id = portal.job_id.to_string();

    let first = actix_test::call_service(&app, apply_request(&user_id, &job_id)).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let second = actix_test::call_service(&app, apply_request(&user_id, &job_id)).await;

    assert_eq!(second.status(), StatusCode::CONFLICT);
    let error: Error = actix_test::read_body_json(second).await;
    assert_eq!(error.message(), "You have already applied for this job.");
    assert_eq!(portal.store.application_count(), 1);
}

#[rstest]
#[case(json!({ "jobId": "6b1f8a1e-9d0c-4f5e-8f37-3c1b7f6f2a10" }))]
#[case(json!({ "userId": "nope", "jobId": "6b1f8a1e-9d0c-4f5e-8f37-3c1b7f6f2a10" }))]
#[case(json!({ "userId": 42 }))]
#[actix_web::test]
async fn apply_rejects_invalid_bodies(portal: Portal, #[case] body: Value) {
    let app = actix_test::init_service(test_app(&portal.store)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/applications/apply")
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Error = actix_test::read_body_json(response).await;
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(portal.store.application_count(), 0);
}

#[rstest]
#[actix_web::test]
async fn apply_for_unknown_job_is_not_found(portal: Portal) {
    let app = actix_test::init_service(test_app(&portal.store)).await;

    let response = actix_test::call_service(
        &app,
        apply_request(&portal.user_id.to_string(), &JobId::random().to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: Error = actix_test::read_body_json(response).await;
    assert_eq!(error.message(), "Job not found.");
}

async fn applied_id(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    portal: &Portal,
) -> String {
    let response = actix_test::call_service(
        app,
        apply_request(&portal.user_id.to_string(), &portal.job_id.to_string()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: ApplicationResponseBody = actix_test::read_body_json(response).await;
    body.id
}

#[rstest]
#[actix_web::test]
async fn accepting_takes_a_vacancy_and_notifies(portal: Portal) {
    let app = actix_test::init_service(test_app(&portal.store)).await;
    let id = applied_id(&app, &portal).await;

    let response = actix_test::call_service(&app, status_request(&id, "Accepted")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: ApplicationResponseBody = actix_test::read_body_json(response).await;
    assert_eq!(body.status, "Accepted");
    let job = portal.store.job(&portal.job_id).expect("job exists");
    assert_eq!(job.vacancies, 0);
    let notifications = portal.store.notifications_for(&portal.user_id);
    assert_eq!(notifications.len(), 1);
}

#[rstest]
#[actix_web::test]
async fn in_progress_label_is_accepted(portal: Portal) {
    let app = actix_test::init_service(test_app(&portal.store)).await;
    let id = applied_id(&app, &portal).await;

    let response = actix_test::call_service(&app, status_request(&id, "In Progress")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: ApplicationResponseBody = actix_test::read_body_json(response).await;
    assert_eq!(body.status, "InProgress");
}

#[rstest]
#[actix_web::test]
async fn accepting_without_vacancy_is_a_bad_request(portal: Portal) {
    let full = JobId::random();
    portal.store.seed_job(job(full, "Staff Engineer", 0));
    let app = actix_test::init_service(test_app(&portal.store)).await;
    let created = actix_test::call_service(
        &app,
        apply_request(&portal.user_id.to_string(), &full.to_string()),
    )
    .await;
    let created: ApplicationResponseBody = actix_test::read_body_json(created).await;

    let response = actix_test::call_service(&app, status_request(&created.id, "Accepted")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Error = actix_test::read_body_json(response).await;
    assert_eq!(error.code(), ErrorCode::CapacityExhausted);
    assert_eq!(error.message(), "No vacancies available for this job.");
    assert_eq!(portal.store.job(&full).expect("job exists").vacancies, 0);
}

#[rstest]
#[actix_web::test]
async fn unknown_status_lists_allowed_values(portal: Portal) {
    let app = actix_test::init_service(test_app(&portal.store)).await;
    let id = applied_id(&app, &portal).await;

    let response = actix_test::call_service(&app, status_request(&id, "Hired")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Error = actix_test::read_body_json(response).await;
    assert_eq!(error.message(), "Invalid status value.");
    let allowed = error
        .details()
        .and_then(|details| details.get("allowed"))
        .expect("allowed values");
    assert_eq!(
        allowed,
        &json!(["Applied", "InProgress", "Accepted", "Rejected"])
    );
}

#[rstest]
#[actix_web::test]
async fn revoke_twice_is_not_found(portal: Portal) {
    let app = actix_test::init_service(test_app(&portal.store)).await;
    let id = applied_id(&app, &portal).await;

    let first = actix_test::call_service(&app, revoke_request(&id)).await;
    assert_eq!(first.status(), StatusCode::OK);
    let body: RevokeResponseBody = actix_test::read_body_json(first).await;
    assert!(body.deleted);
    assert_eq!(body.application_id, id);

    let second = actix_test::call_service(&app, revoke_request(&id)).await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
    let job = portal.store.job(&portal.job_id).expect("job exists");
    assert_eq!(job.applicant_count, 0);
}

#[rstest]
#[actix_web::test]
async fn revoke_rejects_malformed_id(portal: Portal) {
    let app = actix_test::init_service(test_app(&portal.store)).await;

    let response = actix_test::call_service(&app, revoke_request("not-a-uuid")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn lists_user_applications_with_job_summaries(portal: Portal) {
    let second_job = JobId::random();
    portal.store.seed_job(job(second_job, "Data Engineer", 2));
    let app = actix_test::init_service(test_app(&portal.store)).await;
    let user_id = portal.user_id.to_string();
    for job_id in [portal.job_id, second_job] {
        let response =
            actix_test::call_service(&app, apply_request(&user_id, &job_id.to_string())).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/applications/user/{user_id}?page=1&limit=1"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["totalApplications"], 2);
    let jobs = body["jobs"].as_array().expect("jobs array");
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["type"], "Full-time");
    assert_eq!(jobs[0]["status"], "Applied");
    assert!(jobs[0]["applicationId"].is_string());
}

#[rstest]
#[case("page=0")]
#[case("limit=0")]
#[case("page=abc")]
#[actix_web::test]
async fn listing_rejects_bad_paging(portal: Portal, #[case] query: &str) {
    let app = actix_test::init_service(test_app(&portal.store)).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!(
            "/api/v1/applications/user/{}?{query}",
            portal.user_id
        ))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Error = actix_test::read_body_json(response).await;
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}
