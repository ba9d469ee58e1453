//! The closed emotion label set.
//!
//! The 28 labels (27 named emotions plus `neutral`) follow the GoEmotions
//! taxonomy in model-output index order. `Emotion::ALL` is the single
//! source of truth for that ordering: the classifier aligns its output
//! vector against it and the aggregator ranks against it. Never duplicate
//! the list.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of emotion labels, including `neutral`.
pub const EMOTION_COUNT: usize = 28;

/// One of the 28 emotion labels the classifier can assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Admiration,
    Amusement,
    Anger,
    Annoyance,
    Approval,
    Caring,
    Confusion,
    Curiosity,
    Desire,
    Disappointment,
    Disapproval,
    Disgust,
    Embarrassment,
    Excitement,
    Fear,
    Gratitude,
    Grief,
    Joy,
    Love,
    Nervousness,
    Optimism,
    Pride,
    Realization,
    Relief,
    Remorse,
    Sadness,
    Surprise,
    Neutral,
}

/// Broad polarity grouping used only for narrative synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

impl Emotion {
    /// All labels in model-output index order.
    pub const ALL: [Emotion; EMOTION_COUNT] = [
        Emotion::Admiration,
        Emotion::Amusement,
        Emotion::Anger,
        Emotion::Annoyance,
        Emotion::Approval,
        Emotion::Caring,
        Emotion::Confusion,
        Emotion::Curiosity,
        Emotion::Desire,
        Emotion::Disappointment,
        Emotion::Disapproval,
        Emotion::Disgust,
        Emotion::Embarrassment,
        Emotion::Excitement,
        Emotion::Fear,
        Emotion::Gratitude,
        Emotion::Grief,
        Emotion::Joy,
        Emotion::Love,
        Emotion::Nervousness,
        Emotion::Optimism,
        Emotion::Pride,
        Emotion::Realization,
        Emotion::Relief,
        Emotion::Remorse,
        Emotion::Sadness,
        Emotion::Surprise,
        Emotion::Neutral,
    ];

    /// Position of this label in the model output vector.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Look up a label by model output index.
    pub fn from_index(index: usize) -> Option<Emotion> {
        Self::ALL.get(index).copied()
    }

    /// Lowercase label name as used in API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Admiration => "admiration",
            Emotion::Amusement => "amusement",
            Emotion::Anger => "anger",
            Emotion::Annoyance => "annoyance",
            Emotion::Approval => "approval",
            Emotion::Caring => "caring",
            Emotion::Confusion => "confusion",
            Emotion::Curiosity => "curiosity",
            Emotion::Desire => "desire",
            Emotion::Disappointment => "disappointment",
            Emotion::Disapproval => "disapproval",
            Emotion::Disgust => "disgust",
            Emotion::Embarrassment => "embarrassment",
            Emotion::Excitement => "excitement",
            Emotion::Fear => "fear",
            Emotion::Gratitude => "gratitude",
            Emotion::Grief => "grief",
            Emotion::Joy => "joy",
            Emotion::Love => "love",
            Emotion::Nervousness => "nervousness",
            Emotion::Optimism => "optimism",
            Emotion::Pride => "pride",
            Emotion::Realization => "realization",
            Emotion::Relief => "relief",
            Emotion::Remorse => "remorse",
            Emotion::Sadness => "sadness",
            Emotion::Surprise => "surprise",
            Emotion::Neutral => "neutral",
        }
    }

    /// Polarity grouping for regime classification.
    ///
    /// Eleven labels are positive, eleven negative; the rest (confusion,
    /// curiosity, desire, realization, surprise, neutral) belong to
    /// neither sum.
    pub fn polarity(&self) -> Polarity {
        match self {
            Emotion::Admiration
            | Emotion::Amusement
            | Emotion::Approval
            | Emotion::Caring
            | Emotion::Excitement
            | Emotion::Gratitude
            | Emotion::Joy
            | Emotion::Love
            | Emotion::Optimism
            | Emotion::Pride
            | Emotion::Relief => Polarity::Positive,
            Emotion::Anger
            | Emotion::Annoyance
            | Emotion::Disappointment
            | Emotion::Disapproval
            | Emotion::Disgust
            | Emotion::Embarrassment
            | Emotion::Fear
            | Emotion::Grief
            | Emotion::Nervousness
            | Emotion::Remorse
            | Emotion::Sadness => Polarity::Negative,
            Emotion::Confusion
            | Emotion::Curiosity
            | Emotion::Desire
            | Emotion::Realization
            | Emotion::Surprise
            | Emotion::Neutral => Polarity::Neutral,
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
