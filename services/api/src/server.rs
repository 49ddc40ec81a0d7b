use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_dispatch_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fleet_dispatch::config::AppConfig;
use fleet_dispatch::dispatch::{DispatchService, InMemoryEventPublisher, InMemoryFleetRepository};
use fleet_dispatch::error::AppError;
use fleet_dispatch::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(timeout_ms) = args.lock_timeout_ms.take() {
        config.dispatch.lock_timeout = Duration::from_millis(timeout_ms);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryFleetRepository::new());
    let events = Arc::new(InMemoryEventPublisher::new());
    let dispatch_service = Arc::new(DispatchService::new(repository, events, config.dispatch));

    let app = with_dispatch_routes(dispatch_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        lock_timeout_ms = config.dispatch.lock_timeout.as_millis() as u64,
        "fleet dispatch service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
