//! CrowdPulse Server
//!
//! HTTP service that analyzes the emotional reception of a YouTube
//! video: it fetches the video's top comments, classifies each into the
//! 28-label GoEmotions set, aggregates the labels into a distribution,
//! and synthesizes a short audience sentiment review.

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::signal;
use tracing::{info, warn};

mod analyze;
mod config;
mod routes;
mod state;

use config::ServerConfig;
use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "crowdpulse-server")]
#[command(about = "YouTube comment sentiment analysis service", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// YouTube Data API key
    #[arg(short, long, env = "YOUTUBE_API_KEY")]
    api_key: Option<String>,

    /// Local classifier checkpoint directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Listen address
    #[arg(short = 'l', long, default_value = "0.0.0.0")]
    listen: String,

    /// Listen port
    #[arg(short = 'P', long, default_value = "8080")]
    port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    info!("Starting CrowdPulse Server");

    // Load configuration
    let config = ServerConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded successfully");
    info!("Max comments per request: {}", config.youtube.max_comments);
    info!(
        "Classifier: {}",
        config
            .model
            .dir
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| config.model.hub_repo.clone())
    );

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    // Initialize application state (load classifier, build API client)
    info!("Initializing application state...");
    let state = AppState::new(config.clone(), metrics_handle).await?;
    info!("Application state initialized successfully");

    // Build and run the server with graceful shutdown
    let addr: SocketAddr = format!("{}:{}", config.listen, config.port).parse()?;
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("crowdpulse=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crowdpulse=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "crowdpulse_requests_total",
        "Total number of analyze requests received"
    );
    metrics::describe_counter!(
        "crowdpulse_analyses_total",
        "Total number of analyses by outcome"
    );
    metrics::describe_histogram!(
        "crowdpulse_analysis_duration_seconds",
        metrics::Unit::Seconds,
        "End-to-end analysis latency in seconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
