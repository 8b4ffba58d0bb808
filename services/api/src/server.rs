use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_intake_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use onswift_intake::config::AppConfig;
use onswift_intake::error::AppError;
use onswift_intake::telemetry;
use onswift_intake::workflows::intake::{HttpApplicationGateway, IntakeState};
use std::sync::atomic::{AtomicBool, Ordering};
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
    if let Some(base_url) = args.base_url.take() {
        config.intake.api_base_url = base_url;
    }

    telemetry::init(&config.telemetry)?;

    if config.intake.api_base_url.trim().is_empty() {
        warn!("INTAKE_API_BASE_URL is not set; every submission will resolve to rejected");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let gateway = Arc::new(HttpApplicationGateway::new(&config.intake.api_base_url)?);
    let backend = gateway.endpoint().to_string();

    let intake = IntakeState::new(gateway).with_reset_policy(config.intake.reset_policy);

    let app = with_intake_routes(intake)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        %backend,
        reset_policy = ?config.intake.reset_policy,
        "freelancer intake service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
