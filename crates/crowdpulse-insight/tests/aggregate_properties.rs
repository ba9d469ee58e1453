//! Property tests for the label assignment rule

use crowdpulse_core::{Emotion, EmotionScores, EMOTION_COUNT};
use crowdpulse_insight::{assign_labels, CONFIDENCE_THRESHOLD, FALLBACK_LABELS};
use proptest::prelude::*;

fn score_vectors() -> impl Strategy<Value = EmotionScores> {
    prop::array::uniform28(0.0f32..=1.0).prop_map(EmotionScores::new)
}

proptest! {
    /// Every vector contributes at least one label.
    #[test]
    fn assignment_is_never_empty(scores in score_vectors()) {
        prop_assert!(!assign_labels(&scores).is_empty());
    }

    /// When anything clears the threshold, the assignment is exactly the
    /// set of labels strictly above it.
    #[test]
    fn assignment_matches_threshold_set(scores in score_vectors()) {
        let above: Vec<Emotion> = scores
            .iter()
            .filter(|(_, s)| *s > CONFIDENCE_THRESHOLD)
            .map(|(e, _)| e)
            .collect();
        if !above.is_empty() {
            let mut assigned = assign_labels(&scores);
            let mut expected = above;
            assigned.sort();
            expected.sort();
            prop_assert_eq!(assigned, expected);
        }
    }

    /// When nothing clears the threshold, exactly the top four ranked
    /// labels are assigned.
    #[test]
    fn fallback_is_exactly_top_four(scores in score_vectors()) {
        let none_above = scores.iter().all(|(_, s)| s <= CONFIDENCE_THRESHOLD);
        if none_above {
            let assigned = assign_labels(&scores);
            prop_assert_eq!(assigned.len(), FALLBACK_LABELS);
            // Every assigned label must score at least as high as every
            // unassigned one.
            let floor = assigned
                .iter()
                .map(|e| scores.get(*e))
                .fold(f32::INFINITY, f32::min);
            for (emotion, score) in scores.iter() {
                if !assigned.contains(&emotion) {
                    prop_assert!(score <= floor);
                }
            }
        }
    }

    /// Assignment is deterministic: the same vector always yields the
    /// same labels in the same order.
    #[test]
    fn assignment_is_deterministic(scores in score_vectors()) {
        prop_assert_eq!(assign_labels(&scores), assign_labels(&scores));
    }
}

#[test]
fn assignment_handles_all_label_count_widths() {
    // Sanity anchor for the strategy above.
    assert_eq!(EMOTION_COUNT, 28);
}
