//! Predictor trait and the candle-backed implementation

use crate::model::{GoEmotionsModel, ModelFiles};
use async_trait::async_trait;
use candle_core::Device;
use crowdpulse_core::{EmotionScores, Error, Result};
use std::sync::Arc;
use tracing::debug;

/// Multi-label emotion prediction over a batch of comments.
///
/// Output is 1:1 index-aligned with the input. A prediction failure
/// invalidates the whole analysis, so errors propagate; there are no
/// retries at this layer.
#[async_trait]
pub trait EmotionPredictor: Send + Sync {
    async fn predict(&self, comments: &[String]) -> Result<Vec<EmotionScores>>;
}

/// Candle-backed GoEmotions predictor.
///
/// Holds the loaded model behind an `Arc` so batch inference can run on
/// a blocking thread while the handle stays cheaply cloneable across
/// concurrent requests.
pub struct GoEmotionsClassifier {
    model: Arc<GoEmotionsModel>,
}

impl GoEmotionsClassifier {
    pub fn new(model: GoEmotionsModel) -> Self {
        Self {
            model: Arc::new(model),
        }
    }

    /// Load a checkpoint and wrap it.
    pub fn load(files: &ModelFiles, device: Device) -> Result<Self> {
        Ok(Self::new(GoEmotionsModel::load(files, device)?))
    }
}

#[async_trait]
impl EmotionPredictor for GoEmotionsClassifier {
    async fn predict(&self, comments: &[String]) -> Result<Vec<EmotionScores>> {
        // Degenerate batch: no inference call at all.
        if comments.is_empty() {
            return Ok(Vec::new());
        }

        debug!(batch = comments.len(), "running emotion inference");

        let model = Arc::clone(&self.model);
        let texts = comments.to_vec();
        let scores = tokio::task::spawn_blocking(move || model.infer(&texts))
            .await
            .map_err(|e| Error::classifier(format!("inference task failed: {e}")))??;

        if scores.len() != comments.len() {
            return Err(Error::classifier(format!(
                "prediction count mismatch: {} inputs, {} outputs",
                comments.len(),
                scores.len()
            )));
        }
        Ok(scores)
    }
}
