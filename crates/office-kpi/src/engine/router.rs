use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;

use super::directory::{DirectoryError, TaskDirectory};
use super::domain::{DepartmentId, TaskId, UserId};
use super::evaluation::EvaluationError;
use super::kpi::{KpiQuery, ReportingPeriod};
use super::service::{KpiService, KpiServiceError};

/// Router builder exposing KPI statistics, score submission, and workload endpoints.
pub fn kpi_router<D>(service: Arc<KpiService<D>>) -> Router
where
    D: TaskDirectory + 'static,
{
    Router::new()
        .route("/api/v1/kpi", get(kpi_handler::<D>))
        .route("/api/v1/tasks/:task_id/score", get(task_score_handler::<D>))
        .route(
            "/api/v1/tasks/:task_id/leadership-score",
            patch(leadership_score_handler::<D>),
        )
        .route("/api/v1/users/:user_id/workload", get(workload_handler::<D>))
        .route(
            "/api/v1/users/:user_id/workload/deleted",
            get(deleted_tasks_handler::<D>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct KpiParams {
    pub(crate) start: NaiveDate,
    pub(crate) end: NaiveDate,
    #[serde(default)]
    pub(crate) department: Option<String>,
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TodayParams {
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LeadershipScoreRequest {
    pub(crate) score: f64,
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

fn resolve_today(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Utc::now().date_naive())
}

pub(crate) async fn kpi_handler<D>(
    State(service): State<Arc<KpiService<D>>>,
    Query(params): Query<KpiParams>,
) -> Response
where
    D: TaskDirectory + 'static,
{
    let period = match ReportingPeriod::new(params.start, params.end) {
        Ok(period) => period,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };
    let mut query = KpiQuery::new(period);
    if let Some(department) = params.department {
        query = query.for_department(DepartmentId(department));
    }

    match service.kpi_statistics(&query, resolve_today(params.today)) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn task_score_handler<D>(
    State(service): State<Arc<KpiService<D>>>,
    Path(task_id): Path<String>,
    Query(params): Query<TodayParams>,
) -> Response
where
    D: TaskDirectory + 'static,
{
    match service.task_score(&TaskId(task_id), resolve_today(params.today)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn leadership_score_handler<D>(
    State(service): State<Arc<KpiService<D>>>,
    Path(task_id): Path<String>,
    axum::Json(request): axum::Json<LeadershipScoreRequest>,
) -> Response
where
    D: TaskDirectory + 'static,
{
    let task_id = TaskId(task_id);
    match service.submit_leadership_score(&task_id, request.score, resolve_today(request.today)) {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn workload_handler<D>(
    State(service): State<Arc<KpiService<D>>>,
    Path(user_id): Path<String>,
) -> Response
where
    D: TaskDirectory + 'static,
{
    match service.workload(&UserId(user_id)) {
        Ok(workload) => (StatusCode::OK, axum::Json(workload)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn deleted_tasks_handler<D>(
    State(service): State<Arc<KpiService<D>>>,
    Path(user_id): Path<String>,
) -> Response
where
    D: TaskDirectory + 'static,
{
    let user_id = UserId(user_id);
    match service.deleted_tasks(&user_id) {
        Ok(task_ids) => {
            let payload = json!({ "user_id": user_id, "deleted_task_ids": task_ids });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

fn error_response(error: KpiServiceError) -> Response {
    let status = match &error {
        KpiServiceError::Evaluation(EvaluationError::ScoreOutOfRange(_)) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        KpiServiceError::TaskNotFound(_)
        | KpiServiceError::UserNotFound(_)
        | KpiServiceError::Directory(DirectoryError::NotFound) => StatusCode::NOT_FOUND,
        KpiServiceError::Directory(DirectoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
