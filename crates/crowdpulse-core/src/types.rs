//! Request-scoped value types for the analysis pipeline

use crate::emotion::{Emotion, EMOTION_COUNT};
use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Canonical video identifier extracted from a user-supplied reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoId(String);

fn video_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // The identifier is the value of the `v` query parameter: everything
    // after `v=` up to the next `&` or end of string.
    PATTERN.get_or_init(|| Regex::new(r"v=([^&]+)").expect("video id pattern is valid"))
}

impl VideoId {
    /// Extract the video identifier from a reference string.
    ///
    /// References without a `v=` marker are rejected with
    /// [`Error::InvalidReference`].
    pub fn from_reference(reference: &str) -> Result<Self> {
        video_id_pattern()
            .captures(reference)
            .and_then(|caps| caps.get(1))
            .map(|m| VideoId(m.as_str().to_string()))
            .ok_or(Error::InvalidReference)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-comment probability vector, index-aligned with [`Emotion::ALL`].
///
/// Values are independent sigmoid activations in [0, 1]; they do not sum
/// to 1 (multi-label, not mutually exclusive).
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionScores([f32; EMOTION_COUNT]);

impl EmotionScores {
    pub fn new(scores: [f32; EMOTION_COUNT]) -> Self {
        Self(scores)
    }

    /// Build from a raw model output row, rejecting rows that are not
    /// exactly [`EMOTION_COUNT`] wide.
    pub fn from_row(row: Vec<f32>) -> Result<Self> {
        let len = row.len();
        let scores: [f32; EMOTION_COUNT] = row.try_into().map_err(|_| {
            Error::classifier(format!(
                "expected {EMOTION_COUNT} class scores, model produced {len}"
            ))
        })?;
        Ok(Self(scores))
    }

    /// Score for a single label.
    pub fn get(&self, emotion: Emotion) -> f32 {
        self.0[emotion.index()]
    }

    /// Iterate `(label, score)` pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f32)> + '_ {
        Emotion::ALL.iter().map(|e| (*e, self.0[e.index()]))
    }
}

/// Occurrence count per emotion label across a whole comment batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmotionTally(HashMap<Emotion, u32>);

impl EmotionTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of a label.
    pub fn record(&mut self, emotion: Emotion) {
        *self.0.entry(emotion).or_insert(0) += 1;
    }

    pub fn count(&self, emotion: Emotion) -> u32 {
        self.0.get(&emotion).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.0.values().map(|c| u64::from(*c)).sum()
    }

    /// Labels with nonzero counts, count descending. Ties keep
    /// enumeration order, so ranking is deterministic.
    pub fn ranked(&self) -> Vec<(Emotion, u32)> {
        let mut entries: Vec<(Emotion, u32)> = Emotion::ALL
            .iter()
            .filter_map(|e| {
                let count = self.count(*e);
                (count > 0).then_some((*e, count))
            })
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (Emotion, u32)> + '_ {
        self.0.iter().map(|(e, c)| (*e, *c))
    }
}

impl FromIterator<(Emotion, u32)> for EmotionTally {
    fn from_iter<I: IntoIterator<Item = (Emotion, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().filter(|(_, c)| *c > 0).collect())
    }
}

/// Snapshot result of one analysis request.
///
/// Constructed once per request and immutable afterwards; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Number of comments that went through classification
    pub total_comments_analyzed: usize,

    /// Synthesized narrative summary
    pub video_review: String,

    /// Top-5 `(label, count)` pairs, count descending
    pub dominant_emotions: Vec<(Emotion, u32)>,

    /// Full per-label frequency map
    pub emotion_distribution: EmotionTally,

    /// First few raw comment texts, for display
    pub top_comments_sample: Vec<String>,
}
