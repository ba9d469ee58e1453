//! Request orchestration
//!
//! Linear state machine per request: parse the reference, fetch
//! comments, classify, aggregate, synthesize. The first failure
//! short-circuits; there are no retries.

use crowdpulse_classifier::EmotionPredictor;
use crowdpulse_comments::{CommentFetch, CommentSource};
use crowdpulse_core::{AnalysisReport, Emotion, Error, Result, VideoId};
use crowdpulse_insight::{assign_labels, synthesize, tally};
use std::sync::Arc;
use tracing::info;

/// How many `(label, count)` pairs the report exposes as dominant.
const DOMINANT_EMOTIONS: usize = 5;

/// How many raw comments the report carries as a sample.
const SAMPLE_COMMENTS: usize = 5;

/// Runs one analysis end to end over injected collaborators.
///
/// Both collaborators are constructed once at startup and shared
/// read-only across requests; the orchestrator itself holds no mutable
/// state.
pub struct Analyzer {
    source: CommentSource,
    predictor: Arc<dyn EmotionPredictor>,
    max_comments: usize,
}

impl Analyzer {
    pub fn new(
        source: CommentSource,
        predictor: Arc<dyn EmotionPredictor>,
        max_comments: usize,
    ) -> Self {
        Self {
            source,
            predictor,
            max_comments,
        }
    }

    /// Analyze the video behind a user-supplied reference string.
    ///
    /// Reference and availability problems come back as the matching
    /// recoverable [`Error`] variants; a classifier failure propagates
    /// untouched and surfaces as a server fault at the boundary.
    pub async fn analyze(&self, reference: &str) -> Result<AnalysisReport> {
        let video_id = VideoId::from_reference(reference)?;

        let comments = match self.source.fetch(&video_id, self.max_comments).await {
            CommentFetch::Disabled => return Err(Error::CommentsDisabled),
            CommentFetch::Comments(comments) if comments.is_empty() => {
                return Err(Error::NoCommentsFound)
            }
            CommentFetch::Comments(comments) => comments,
        };

        let scores = self.predictor.predict(&comments).await?;
        let assignments: Vec<Vec<Emotion>> = scores.iter().map(assign_labels).collect();
        let distribution = tally(&assignments);
        let video_review = synthesize(&distribution, comments.len());

        let mut dominant_emotions = distribution.ranked();
        dominant_emotions.truncate(DOMINANT_EMOTIONS);

        info!(
            video_id = %video_id,
            comments = comments.len(),
            labels = distribution.total(),
            "analysis complete"
        );

        Ok(AnalysisReport {
            total_comments_analyzed: comments.len(),
            video_review,
            dominant_emotions,
            emotion_distribution: distribution,
            top_comments_sample: comments.into_iter().take(SAMPLE_COMMENTS).collect(),
        })
    }
}
