use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryDirectory};
use crate::routes::with_kpi_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use office_kpi::config::AppConfig;
use office_kpi::engine::KpiService;
use office_kpi::error::AppError;
use office_kpi::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(snapshot) = args.snapshot.take() {
        config.data.snapshot_path = Some(snapshot);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let directory = InMemoryDirectory::from_optional_path(config.data.snapshot_path.as_deref())?;
    if config.data.snapshot_path.is_none() {
        warn!("no APP_SNAPSHOT_PATH configured; serving an empty organization");
    }
    let service = Arc::new(KpiService::new(Arc::new(directory)));

    let app = with_kpi_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "office kpi engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}
