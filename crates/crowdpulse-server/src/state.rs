//! Process-lifetime application state

use anyhow::Result;
use crowdpulse_classifier::{resolve_device, GoEmotionsClassifier, ModelFiles};
use crowdpulse_comments::{CommentSource, YouTubeCommentApi};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::analyze::Analyzer;
use crate::config::ServerConfig;

/// Application state shared across all requests
///
/// Holds the two process-lifetime singletons — the loaded classifier and
/// the comment API client — behind the orchestrator. Both are built once
/// here and never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Request orchestrator over the shared collaborators
    pub analyzer: Arc<Analyzer>,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    /// Initialize application state from configuration
    pub async fn new(config: ServerConfig, metrics_handle: PrometheusHandle) -> Result<Self> {
        info!("Initializing application state");

        let api = YouTubeCommentApi::new(
            config.youtube.api_key.clone(),
            Duration::from_secs(config.youtube.fetch_timeout_secs),
        )?;
        let source = CommentSource::new(Arc::new(api));

        // Checkpoint resolution and weight loading are synchronous I/O;
        // keep them off the async executor.
        let model_config = config.model.clone();
        let classifier = tokio::task::spawn_blocking(move || {
            let files = match &model_config.dir {
                Some(dir) => {
                    info!(dir = %dir.display(), "loading classifier from local checkpoint");
                    ModelFiles::from_dir(dir)?
                }
                None => {
                    info!(repo = %model_config.hub_repo, "downloading classifier checkpoint");
                    ModelFiles::download(&model_config.hub_repo)?
                }
            };
            let device = resolve_device(&model_config.device)?;
            GoEmotionsClassifier::load(&files, device)
        })
        .await??;
        info!("Classifier loaded");

        let analyzer = Analyzer::new(source, Arc::new(classifier), config.youtube.max_comments);

        Ok(Self {
            analyzer: Arc::new(analyzer),
            metrics_handle,
        })
    }
}
