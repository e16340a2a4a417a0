//! Weathercast HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::{ForecastService, ports::InferencePort};
use infrastructure::{AppConfig, OpenAiInferenceAdapter};
use presentation_http::{
    routes,
    server::{self, Shutdown},
    state::AppState,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "weathercast_server=info,presentation_http=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be populated
    dotenv::dotenv().ok();

    // Configuration decides the log format, so load it before tracing starts
    let loaded = AppConfig::load();
    init_tracing(loaded.as_ref().is_ok_and(|c| c.server.json_logs()));

    info!("Weathercast v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = loaded.inspect_err(|e| error!(error = %e, "Failed to load configuration"))?;

    // Refuse to start without a credential; nothing is bound yet
    config
        .validate()
        .inspect_err(|e| error!(error = %e, "Invalid configuration, aborting startup"))?;

    info!(
        host = %config.server.host,
        port = %config.server.port,
        model = %config.inference.default_model,
        "Configuration loaded"
    );

    // Initialize inference adapter
    let inference_adapter = OpenAiInferenceAdapter::new(config.inference.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize inference: {e}"))?;

    let inference: Arc<dyn InferencePort> = Arc::new(inference_adapter);
    info!(model = %inference.current_model(), "Inference adapter ready");

    // Format instructions are computed once here and shared by every request
    let forecast_service = ForecastService::new(inference);

    let max_body_bytes = config.server.max_body_size_json_bytes;
    let addr = config.server.bind_address();
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    let state = AppState {
        forecast_service: Arc::new(forecast_service),
    };

    let app = routes::create_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(RequestBodyLimitLayer::new(max_body_bytes)),
    );

    // Start server
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    match server::serve(listener, app, server::shutdown_signal(), shutdown_timeout).await? {
        Shutdown::Drained => info!("Server shutdown complete"),
        Shutdown::TimedOut => warn!("Server shutdown forced with requests still in flight"),
    }

    Ok(())
}

/// Install the global subscriber, emitting JSON lines when requested
fn init_tracing(json: bool) {
    let (text_layer, json_layer) = if json {
        (None, Some(tracing_subscriber::fmt::layer().json()))
    } else {
        (Some(tracing_subscriber::fmt::layer()), None)
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(text_layer)
        .with(json_layer)
        .init();
}
