use crate::cli::ServeArgs;
use crate::infra::{load_question_bank, AppState, ExportSettings};
use crate::routes::with_screening_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fit_screener::config::AppConfig;
use fit_screener::error::AppError;
use fit_screener::screening::{JsonFileSink, ScreeningService};
use fit_screener::telemetry;
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

    let bank = load_question_bank(None, &config.screener)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };
    let export_settings = ExportSettings {
        prefix: config.screener.export_prefix.clone(),
    };

    let sink = Arc::new(JsonFileSink::new(
        config.screener.export_dir.clone(),
        config.screener.export_prefix.clone(),
    ));
    let screening_service = Arc::new(ScreeningService::new(
        bank,
        sink,
        config.screener.location.clone(),
    ));

    let app = with_screening_routes(screening_service)
        .layer(Extension(app_state))
        .layer(Extension(export_settings))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        location = %config.screener.location,
        "candidate fit screener ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
