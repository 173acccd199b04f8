use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::engine::router::{leadership_score_handler, LeadershipScoreRequest};
use crate::engine::KpiService;

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

fn patch_json(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn kpi_endpoint_returns_ranked_summaries() {
    let (service, _) = build_service();
    let app = router_with_service(service);

    let response = app
        .oneshot(get(
            "/api/v1/kpi?start=2024-11-01&end=2024-11-30&today=2024-11-20",
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["users"][0]["subject"], json!({ "kind": "user", "id": "ana" }));
    assert_eq!(body["users"][0]["rank"], 1);
    assert_eq!(body["departments"][0]["name"], "Operations");
    assert_eq!(body["trend"][0]["label"], "2024-11");
}

#[tokio::test]
async fn kpi_endpoint_rejects_inverted_period() {
    let (service, _) = build_service();
    let app = router_with_service(service);

    let response = app
        .oneshot(get("/api/v1/kpi?start=2024-11-30&end=2024-11-01"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("after period end"));
}

#[tokio::test]
async fn leadership_score_endpoint_clamps_to_cap() {
    let (service, directory) = build_service();
    let app = router_with_service(service);

    let response = app
        .oneshot(patch_json(
            "/api/v1/tasks/t-late/leadership-score",
            json!({ "score": 9, "today": "2024-11-20" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["persisted_score"], json!(4.0));
    assert_eq!(body["clamped"], json!(true));
    assert_eq!(body["score"]["leadership_cap"], 4);
    assert_eq!(directory.stored_score("t-late"), Some(4.0));
}

#[tokio::test]
async fn leadership_score_endpoint_rejects_negative_scores() {
    let (service, directory) = build_service();
    let app = router_with_service(service);

    let response = app
        .oneshot(patch_json(
            "/api/v1/tasks/t-late/leadership-score",
            json!({ "score": -2.5 }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("score out of range"));
    assert_eq!(directory.stored_score("t-late"), None);
}

#[tokio::test]
async fn leadership_score_handler_returns_not_found_for_unknown_task() {
    let (service, _) = build_service();

    let response = leadership_score_handler::<MemoryDirectory>(
        State(Arc::new(service)),
        Path("t-missing".to_string()),
        axum::Json(LeadershipScoreRequest {
            score: 5.0,
            today: Some(today()),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn leadership_score_handler_surfaces_directory_outage() {
    let service = Arc::new(KpiService::new(Arc::new(UnavailableDirectory)));

    let response = leadership_score_handler::<UnavailableDirectory>(
        State(service),
        Path("t-late".to_string()),
        axum::Json(LeadershipScoreRequest {
            score: 5.0,
            today: None,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn task_score_endpoint_explains_band() {
    let (service, _) = build_service();
    let app = router_with_service(service);

    let response = app
        .oneshot(get("/api/v1/tasks/t-early/score?today=2024-11-20"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["completion_score"], 110);
    assert_eq!(body["leadership_cap"], 10);
    assert_eq!(body["band"], "ahead_of_schedule");
}

#[tokio::test]
async fn workload_endpoint_counts_pending_tasks() {
    let (service, _) = build_service();
    let app = router_with_service(service);

    let response = app
        .oneshot(get("/api/v1/users/ben/workload"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["pending_count"], 2);
    assert_eq!(body["visible_task_ids"], json!(["t-early", "t-late", "t-new"]));
    assert_eq!(body["rule"], "per_assignment");
}

#[tokio::test]
async fn workload_endpoint_returns_not_found_for_unknown_user() {
    let (service, _) = build_service();
    let app = router_with_service(service);

    let response = app
        .oneshot(get("/api/v1/users/ghost/workload"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleted_workload_endpoint_lists_recoverable_tasks() {
    let (service, _) = build_service();
    let app = router_with_service(service);

    let response = app
        .oneshot(get("/api/v1/users/ana/workload/deleted"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["deleted_task_ids"], json!(["t-removed"]));
}
