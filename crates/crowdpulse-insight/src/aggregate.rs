//! Discrete label assignment and tallying

use crowdpulse_core::{Emotion, EmotionScores, EmotionTally};

/// A label is assigned outright when its score is strictly above this.
pub const CONFIDENCE_THRESHOLD: f32 = 0.35;

/// When nothing clears the threshold, the top-ranked labels are taken
/// instead, exactly this many.
pub const FALLBACK_LABELS: usize = 4;

/// Derive the label set for one comment from its probability vector.
///
/// Labels are ranked by score descending; the sort is stable, so ties
/// keep enumeration order and the result is deterministic. Every label
/// strictly above [`CONFIDENCE_THRESHOLD`] is selected; if none is, the
/// top [`FALLBACK_LABELS`] are taken regardless of absolute score. A
/// comment therefore always contributes at least four label votes and
/// never zero.
pub fn assign_labels(scores: &EmotionScores) -> Vec<Emotion> {
    let mut ranked: Vec<(Emotion, f32)> = scores.iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let confident: Vec<Emotion> = ranked
        .iter()
        .filter(|(_, score)| *score > CONFIDENCE_THRESHOLD)
        .map(|(emotion, _)| *emotion)
        .collect();

    if !confident.is_empty() {
        confident
    } else {
        ranked
            .iter()
            .take(FALLBACK_LABELS)
            .map(|(emotion, _)| *emotion)
            .collect()
    }
}

/// Count label occurrences across all comment assignments.
///
/// One increment per label per comment; a comment assigned four labels
/// bumps four distinct counters by one each.
pub fn tally<'a, I>(assignments: I) -> EmotionTally
where
    I: IntoIterator<Item = &'a Vec<Emotion>>,
{
    let mut counts = EmotionTally::new();
    for assignment in assignments {
        for emotion in assignment {
            counts.record(*emotion);
        }
    }
    counts
}
