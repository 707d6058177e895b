use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryConfigurationStore, StandardMasterData};
use crate::routes::with_admin_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use caseflow::admin::casetype::ConfigurationAdminService;
use caseflow::config::AppConfig;
use caseflow::error::AppError;
use caseflow::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
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

    let store = Arc::new(InMemoryConfigurationStore::default());
    let service = Arc::new(ConfigurationAdminService::new(store));
    let catalog = Arc::new(StandardMasterData::new());

    let app = with_admin_routes(service, catalog)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "case-type administration service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
