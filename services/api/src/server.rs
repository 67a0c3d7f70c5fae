use crate::cli::ServeArgs;
use crate::infra::{build_review_service, AppState};
use crate::routes::with_review_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use billing_assist::config::AppConfig;
use billing_assist::error::AppError;
use billing_assist::telemetry;
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

    let review_service = Arc::new(build_review_service(&config.billing, None)?);
    let payers_with_bumps = review_service
        .stats()
        .map(|stats| stats.payer_bumps.len())
        .unwrap_or(0);

    let app = with_review_routes(review_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        default_payer = %config.billing.default_payer,
        payers_with_bumps,
        "billing assist service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
