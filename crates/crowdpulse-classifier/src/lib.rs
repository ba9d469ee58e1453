//! CrowdPulse Classifier
//!
//! Adapter around a pretrained GoEmotions sequence classifier.
//!
//! The model is loaded once at startup (local directory or Hugging Face
//! Hub) and shared read-only afterwards. Inference is batch-oriented:
//! one sigmoid-activated 28-class probability vector per input comment,
//! index-aligned with `crowdpulse_core::Emotion::ALL`.

pub mod model;
pub mod predictor;

pub use model::{resolve_device, GoEmotionsModel, ModelFiles, DEFAULT_HUB_REPO, MAX_POSITIONS};
pub use predictor::{EmotionPredictor, GoEmotionsClassifier};
