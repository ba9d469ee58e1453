//! CrowdPulse Core
//!
//! Core types shared across CrowdPulse components.
//!
//! This crate provides:
//! - The closed 28-label emotion set, the single source of truth for
//!   model-output alignment, aggregation, and presentation
//! - Score vector, tally, and analysis report types
//! - Video reference parsing
//! - Error types and result handling

pub mod emotion;
pub mod error;
pub mod types;

pub use emotion::{Emotion, Polarity, EMOTION_COUNT};
pub use error::{Error, Result};
pub use types::{AnalysisReport, EmotionScores, EmotionTally, VideoId};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::emotion::{Emotion, Polarity, EMOTION_COUNT};
    pub use crate::error::{Error, Result};
    pub use crate::types::{AnalysisReport, EmotionScores, EmotionTally, VideoId};
}
