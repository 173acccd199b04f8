use crate::config::ConfigError;
use crate::dismissal::DismissalError;
use crate::engine::kpi::PeriodError;
use crate::engine::{KpiServiceError, SnapshotError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Snapshot(SnapshotError),
    Period(PeriodError),
    Dismissal(DismissalError),
    Kpi(KpiServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Snapshot(err) => write!(f, "snapshot error: {}", err),
            AppError::Period(err) => write!(f, "invalid period: {}", err),
            AppError::Dismissal(err) => write!(f, "dismissal error: {}", err),
            AppError::Kpi(err) => write!(f, "kpi error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Snapshot(err) => Some(err),
            AppError::Period(err) => Some(err),
            AppError::Dismissal(err) => Some(err),
            AppError::Kpi(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Period(_) | AppError::Snapshot(_) => StatusCode::BAD_REQUEST,
            AppError::Kpi(KpiServiceError::Evaluation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Kpi(KpiServiceError::TaskNotFound(_))
            | AppError::Kpi(KpiServiceError::UserNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Dismissal(_)
            | AppError::Kpi(KpiServiceError::Directory(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

macro_rules! app_error_from {
    ($($source:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$source> for AppError {
                fn from(value: $source) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

app_error_from!(
    ConfigError => Config,
    TelemetryError => Telemetry,
    std::io::Error => Io,
    axum::Error => Server,
    SnapshotError => Snapshot,
    PeriodError => Period,
    DismissalError => Dismissal,
    KpiServiceError => Kpi,
);
