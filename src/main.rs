//! Container Info: a diagnostic web service.
//!
//! This is the application entry point. It initializes tracing, reads the
//! placement metadata from the environment, sets up the Axum router and
//! starts the HTTP server.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use container_info::config::{
    LogFormat, LoggingConfig, PodInfo, DEFAULT_LOG_FILTER, KILL_DELAY, STRESS_BUFFER_SIZE,
};
use container_info::http::start_server;
use container_info::stress::StressBuffer;
use container_info::templates::init_templates;
use container_info::terminator::Terminator;
use container_info::{create_router, AppState};

fn init_tracing(logging: &LoggingConfig) {
    let log_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());
    let filter = tracing_subscriber::EnvFilter::new(&log_filter);
    let format = logging.log_format();

    match format.unwrap_or(LogFormat::Text) {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }

    if format.is_none() {
        tracing::warn!(format = %logging.format, "Unknown log format, using text");
    }
}

#[tokio::main]
async fn main() {
    init_tracing(&LoggingConfig::from_env());

    let pod = PodInfo::from_env();
    tracing::info!(
        ip = %pod.ip,
        pod = %pod.pod,
        node = %pod.node,
        namespace = %pod.namespace,
        "Loaded placement metadata"
    );

    let tera = match init_templates() {
        Ok(tera) => tera,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize templates");
            std::process::exit(1);
        }
    };

    let state = AppState::new(
        pod,
        tera,
        StressBuffer::new(STRESS_BUFFER_SIZE),
        Terminator::process(KILL_DELAY),
    );
    let app = create_router(state);

    if let Err(e) = start_server(app).await {
        tracing::error!(error = %e, "HTTP server failed");
        std::process::exit(1);
    }
}
