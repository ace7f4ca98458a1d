//! Integration tests for the status aggregator, launch, and control flows.

mod common;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::Path,
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::{any, get, post},
};
use portico_core::dto::control::ControlOperation;
use portico_core::dto::job::LaunchJob;
use portico_gateway::service::{control, launch, status};
use portico_gateway::state::AppState;
use serde_json::{Value, json};
use uuid::Uuid;

use common::{Counter, TestServer, test_config};

fn jobs_router(job: Value) -> Router {
    Router::new().route(
        "/jobs/{id}",
        get(move || {
            let job = job.clone();
            async move { Json(job) }
        }),
    )
}

fn jobs_router_with_status(status: StatusCode) -> Router {
    Router::new().route(
        "/jobs/{id}",
        get(move || async move { (status, "error").into_response() }),
    )
}

/// Exposure stub for the happy path: external id resolves, async metadata
/// publishes the given subdomain starting from `publish_on_call`.
fn exposure_router(subdomain: String, publish_on_call: usize, async_calls: Counter) -> Router {
    Router::new()
        .route(
            "/external-id/{id}",
            get(|| async { Json(json!({ "external_id": "ext-1" })) }),
        )
        .route(
            "/async-data",
            get(move || {
                let counter = async_calls.clone();
                let subdomain = subdomain.clone();
                async move {
                    if counter.record() < publish_on_call {
                        (StatusCode::NOT_FOUND, "not published").into_response()
                    } else {
                        Json(json!({ "subdomain": subdomain })).into_response()
                    }
                }
            }),
        )
}

fn probe_router(heads: Counter) -> Router {
    Router::new().route(
        "/",
        any(move |method: Method| {
            let heads = heads.clone();
            async move {
                if method == Method::HEAD {
                    heads.record();
                }
                StatusCode::OK
            }
        }),
    )
}

#[tokio::test]
async fn resolver_and_prober_failures_never_fail_the_status_request() {
    let job_id = Uuid::new_v4();
    let jobs = TestServer::spawn(jobs_router(json!({ "id": job_id, "status": "Running" }))).await;

    // Exposure backend is down for everything
    let exposure = TestServer::spawn(
        Router::new().fallback(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    )
    .await;

    let state = AppState::new(test_config(&jobs.url(), &exposure.url()));
    let result = status::get_status(&state, job_id, "alice").await.expect("status");

    assert_eq!(result.job_id, job_id);
    assert_eq!(result.status, "Running");
    assert!(!result.url_ready);
    assert!(result.url.is_none());
    assert!(result.url_check_details.is_none());
}

#[tokio::test]
async fn job_not_found_is_the_only_propagated_failure() {
    let jobs = TestServer::spawn(jobs_router_with_status(StatusCode::NOT_FOUND)).await;
    let exposure = TestServer::spawn(Router::new()).await;

    let state = AppState::new(test_config(&jobs.url(), &exposure.url()));
    let err = status::get_status(&state, Uuid::new_v4(), "alice")
        .await
        .unwrap_err();

    assert!(matches!(err, status::StatusError::NotFound(_)));
}

#[tokio::test]
async fn job_service_failure_propagates_as_upstream() {
    let jobs = TestServer::spawn(jobs_router_with_status(StatusCode::BAD_GATEWAY)).await;
    let exposure = TestServer::spawn(Router::new()).await;

    let state = AppState::new(test_config(&jobs.url(), &exposure.url()));
    let err = status::get_status(&state, Uuid::new_v4(), "alice")
        .await
        .unwrap_err();

    assert!(matches!(err, status::StatusError::Upstream(_)));
}

#[tokio::test]
async fn end_to_end_resolution_and_probe() {
    let job_id = Uuid::new_v4();
    let heads = Counter::new();
    let async_calls = Counter::new();

    let probe = TestServer::spawn(probe_router(heads.clone())).await;
    let jobs = TestServer::spawn(jobs_router(json!({ "id": job_id, "status": "Running" }))).await;
    // Subdomain publishes on the 2nd async-metadata attempt; the stand-in
    // "subdomain" is the probe stub's authority so the composed URL lands
    // on it
    let exposure =
        TestServer::spawn(exposure_router(probe.authority(), 2, async_calls.clone())).await;

    let mut config = test_config(&jobs.url(), &exposure.url());
    config.app_domain = String::new();
    let state = AppState::new(config);

    let result = status::get_status(&state, job_id, "alice").await.expect("status");

    assert_eq!(result.job_id, job_id);
    assert_eq!(result.status, "Running");
    assert!(result.url_ready);
    assert_eq!(result.url.as_deref(), Some(probe.url().as_str()));

    let details = result.url_check_details.expect("probe details");
    assert_eq!(details.status_code, Some(200));
    assert_eq!(details.attempt, 1);

    assert_eq!(async_calls.count(), 2);
    assert_eq!(heads.count(), 1);
}

#[tokio::test]
async fn record_carried_subdomain_skips_the_resolver() {
    let job_id = Uuid::new_v4();
    let heads = Counter::new();
    let async_calls = Counter::new();

    let probe = TestServer::spawn(probe_router(heads.clone())).await;
    let jobs = TestServer::spawn(jobs_router(
        json!({ "id": job_id, "status": "Running", "subdomain": probe.authority() }),
    ))
    .await;
    let exposure =
        TestServer::spawn(exposure_router(probe.authority(), 1, async_calls.clone())).await;

    let mut config = test_config(&jobs.url(), &exposure.url());
    config.app_domain = String::new();
    let state = AppState::new(config);

    let result = status::get_status(&state, job_id, "alice").await.expect("status");

    assert!(result.url_ready);
    assert_eq!(async_calls.count(), 0);
    assert_eq!(heads.count(), 1);
}

#[tokio::test]
async fn launch_fills_defaults_and_returns_url() {
    let job_id = Uuid::new_v4();
    let app_id = Uuid::new_v4();
    let captured: Arc<Mutex<Option<(HashMap<String, String>, Value)>>> =
        Arc::new(Mutex::new(None));

    let capture = Arc::clone(&captured);
    let jobs = TestServer::spawn(Router::new().route(
        "/jobs",
        post(
            move |axum::extract::Query(q): axum::extract::Query<HashMap<String, String>>,
                  Json(body): Json<Value>| {
                let capture = Arc::clone(&capture);
                async move {
                    *capture.lock().unwrap() = Some((q, body));
                    Json(json!({ "id": job_id, "name": "", "status": "Submitted" }))
                }
            },
        ),
    ))
    .await;

    let heads = Counter::new();
    let async_calls = Counter::new();
    let probe = TestServer::spawn(probe_router(heads.clone())).await;
    let exposure =
        TestServer::spawn(exposure_router(probe.authority(), 1, async_calls.clone())).await;

    let mut config = test_config(&jobs.url(), &exposure.url());
    config.app_domain = String::new();
    config.user_suffix = "@example.org".to_string();
    let state = AppState::new(config);

    let req = LaunchJob {
        app_id,
        name: None,
        email: None,
        output_dir: None,
        config: Default::default(),
        notify: None,
        debug: None,
    };

    let response = launch::launch_job(&state, req, "alice", None)
        .await
        .expect("launch");

    assert_eq!(response.job_id, job_id);
    assert_eq!(response.status, "Submitted");
    assert_eq!(response.url.as_deref(), Some(probe.url().as_str()));

    let (query, body) = captured.lock().unwrap().clone().expect("captured submission");
    assert_eq!(query["user"], "alice");
    // No body email and no token claim: constructed from username + suffix
    assert_eq!(query["email"], "alice@example.org");
    assert_eq!(body["app_id"], json!(app_id));
    assert_eq!(body["notify"], json!(true));
    assert_eq!(body["debug"], json!(false));

    let name = body["name"].as_str().expect("generated name");
    assert!(name.starts_with("job-"));
    let output_dir = body["output_dir"].as_str().expect("generated output dir");
    assert_eq!(output_dir, format!("/data/home/alice/jobs/{}", name));
}

#[tokio::test]
async fn control_operations_pass_through() {
    let job_id = Uuid::new_v4();
    let jobs = TestServer::spawn(Router::new()).await;

    let exposure = TestServer::spawn(
        Router::new()
            .route(
                "/admin/jobs/{id}/time-limit",
                post(|Path(_id): Path<Uuid>| async {
                    Json(json!({ "time_limit": "2026-08-07T12:00:00Z" }))
                }),
            )
            .route(
                "/admin/jobs/{id}/save-and-exit",
                post(|| async { StatusCode::OK }),
            )
            .route("/admin/jobs/{id}/exit", post(|| async { StatusCode::OK })),
    )
    .await;

    let state = AppState::new(test_config(&jobs.url(), &exposure.url()));

    let extended = control::control_job(&state, job_id, ControlOperation::ExtendTime)
        .await
        .expect("extend_time");
    assert_eq!(extended.time_limit.as_deref(), Some("2026-08-07T12:00:00Z"));
    assert!(extended.outputs_saved.is_none());

    let saved = control::control_job(&state, job_id, ControlOperation::SaveAndExit)
        .await
        .expect("save_and_exit");
    assert_eq!(saved.status.as_deref(), Some("terminated"));
    assert_eq!(saved.outputs_saved, Some(true));

    let exited = control::control_job(&state, job_id, ControlOperation::Exit)
        .await
        .expect("exit");
    assert_eq!(exited.outputs_saved, Some(false));
}

#[tokio::test]
async fn control_not_found_maps_to_job_not_found() {
    let jobs = TestServer::spawn(Router::new()).await;
    let exposure = TestServer::spawn(
        Router::new().fallback(|| async { StatusCode::NOT_FOUND }),
    )
    .await;

    let state = AppState::new(test_config(&jobs.url(), &exposure.url()));
    let err = control::control_job(&state, Uuid::new_v4(), ControlOperation::ExtendTime)
        .await
        .unwrap_err();

    assert!(matches!(err, control::ControlError::NotFound(_)));
}

#[tokio::test]
async fn probe_outcome_is_shared_between_requests_within_ttl() {
    let job_id = Uuid::new_v4();
    let heads = Counter::new();
    let async_calls = Counter::new();

    let probe = TestServer::spawn(probe_router(heads.clone())).await;
    let jobs = TestServer::spawn(jobs_router(
        json!({ "id": job_id, "status": "Running", "subdomain": probe.authority() }),
    ))
    .await;
    let exposure =
        TestServer::spawn(exposure_router(probe.authority(), 1, async_calls.clone())).await;

    let mut config = test_config(&jobs.url(), &exposure.url());
    config.app_domain = String::new();
    config.url_check_cache_ttl = Duration::from_secs(5);
    let state = AppState::new(config);

    let first = status::get_status(&state, job_id, "alice").await.expect("status");
    let second = status::get_status(&state, job_id, "alice").await.expect("status");

    assert!(first.url_ready && second.url_ready);
    assert_eq!(first.url_check_details, second.url_check_details);
    // One probe served both requests
    assert_eq!(heads.count(), 1);
}
