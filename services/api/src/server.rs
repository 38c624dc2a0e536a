use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryExportDispatcher, SeededProgramSource};
use crate::routes::with_companion_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use subsidy_companion::config::AppConfig;
use subsidy_companion::error::AppError;
use subsidy_companion::programs::catalog::CompanionService;
use subsidy_companion::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let source = Arc::new(SeededProgramSource::default());
    let dispatcher = Arc::new(InMemoryExportDispatcher::default());
    let companion_service = Arc::new(CompanionService::new(
        source,
        dispatcher,
        config.catalog.freshness(),
    ));

    let app = with_companion_routes(companion_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "subsidy companion service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
