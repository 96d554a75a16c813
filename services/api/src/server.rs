use crate::cli::ServeArgs;
use crate::infra::{AppState, ConfiguredSink};
use crate::routes::with_nomination_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use ospa_scorer::config::AppConfig;
use ospa_scorer::error::AppError;
use ospa_scorer::telemetry;
use ospa_scorer::workflows::nomination::NominationService;
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let engine = config.scoring.engine()?;
    if config.submission.endpoint.is_none() {
        warn!("OSPA_SUBMISSION_URL is not set; submissions will be refused");
    }
    let sink = Arc::new(ConfiguredSink::from_config(&config.submission));
    let service = Arc::new(
        NominationService::new(engine, sink, config.submission.attachments)
            .with_default_rating(config.scoring.default_rating),
    );

    let app = with_nomination_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "nomination scorer ready");

    axum::serve(listener, app).await?;
    Ok(())
}
