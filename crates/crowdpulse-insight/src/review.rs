//! Narrative review synthesis from the aggregate distribution

use crowdpulse_core::{Emotion, EmotionTally, Polarity};

/// One polarity sum must exceed the other by this factor (strictly) for
/// the reception to count as one-sided.
pub const POLARITY_RATIO: f32 = 1.5;

const TOP_EMOTIONS: usize = 5;
const DRIVER_COUNT: usize = 3;

/// Strict `a > 1.5 * b`, computed in integers so the boundary is exact.
fn outweighs(a: u64, b: u64) -> bool {
    2 * a > 3 * b
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render the audience sentiment summary for a tally of `total_comments`
/// analyzed comments.
///
/// The regime decision is the behavior that matters here: positive and
/// negative polarity sums are compared under the strict 1.5x rule, in
/// priority order, and an exact 1.5x ratio lands in the mixed branch.
/// The surrounding wording is template text.
pub fn synthesize(tally: &EmotionTally, total_comments: usize) -> String {
    if total_comments == 0 {
        return "Not enough data to generate a review.".to_string();
    }

    let ranked = tally.ranked();
    let top: Vec<Emotion> = ranked
        .iter()
        .take(TOP_EMOTIONS)
        .map(|(emotion, _)| *emotion)
        .collect();
    let dominant = top.first().copied().unwrap_or(Emotion::Neutral);

    let mut positive: u64 = 0;
    let mut negative: u64 = 0;
    for (emotion, count) in tally.iter() {
        match emotion.polarity() {
            Polarity::Positive => positive += u64::from(count),
            Polarity::Negative => negative += u64::from(count),
            Polarity::Neutral => {}
        }
    }

    let mut review = format!(
        "Based on the analysis of {total_comments} top comments, here is the audience sentiment summary:\n\n"
    );

    let dominant_name = dominant.as_str().to_uppercase();
    if outweighs(positive, negative) {
        review.push_str(&format!(
            "**Overwhelmingly Positive Reception**: The audience is vibing with this content! \
             The most prominent sentiment is **{dominant_name}**. Viewers are expressing strong \
             appreciation, likely due to the entertaining or helpful nature of the video."
        ));
    } else if outweighs(negative, positive) {
        review.push_str(&format!(
            "**Critical Audience Reaction**: The feedback indicates distinct dissatisfaction, \
             led by **{dominant_name}**. Several viewers are expressing concerns or frustration, \
             suggesting the content might be controversial or that technical issues were present."
        ));
    } else {
        review.push_str(&format!(
            "**Mixed or Balanced Views**: The audience is split. While some are showing \
             **{dominant_name}**, there is a complex mix of reactions. This often happens with \
             thought-provoking topics or debates."
        ));
    }

    let drivers: Vec<String> = top
        .iter()
        .take(DRIVER_COUNT)
        .map(|emotion| capitalize(emotion.as_str()))
        .collect();
    review.push_str(&format!(
        "\n\n**Top Emotional Drivers**: {}.",
        drivers.join(", ")
    ));

    review
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally_of(entries: &[(Emotion, u32)]) -> EmotionTally {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_zero_comments_short_circuits() {
        let review = synthesize(&tally_of(&[(Emotion::Joy, 5)]), 0);
        assert_eq!(review, "Not enough data to generate a review.");
    }

    #[test]
    fn test_positive_regime() {
        // joy + admiration = 20 positive votes vs 1 negative.
        let tally = tally_of(&[
            (Emotion::Joy, 12),
            (Emotion::Admiration, 8),
            (Emotion::Anger, 1),
            (Emotion::Neutral, 5),
        ]);
        let review = synthesize(&tally, 20);
        assert!(review.contains("Overwhelmingly Positive Reception"));
        assert!(review.contains("**JOY**"));
    }

    #[test]
    fn test_negative_regime() {
        let tally = tally_of(&[(Emotion::Anger, 10), (Emotion::Joy, 2)]);
        let review = synthesize(&tally, 12);
        assert!(review.contains("Critical Audience Reaction"));
        assert!(review.contains("**ANGER**"));
    }

    #[test]
    fn test_balanced_regime() {
        let tally = tally_of(&[(Emotion::Joy, 5), (Emotion::Anger, 5)]);
        let review = synthesize(&tally, 10);
        assert!(review.contains("Mixed or Balanced Views"));
    }

    #[test]
    fn test_exact_ratio_falls_to_mixed() {
        // positive == 1.5 x negative exactly; strict inequality keeps
        // this out of the positive branch.
        let tally = tally_of(&[(Emotion::Joy, 3), (Emotion::Anger, 2)]);
        let review = synthesize(&tally, 5);
        assert!(review.contains("Mixed or Balanced Views"));
    }

    #[test]
    fn test_just_past_ratio_is_positive() {
        let tally = tally_of(&[(Emotion::Joy, 4), (Emotion::Anger, 2)]);
        let review = synthesize(&tally, 6);
        assert!(review.contains("Overwhelmingly Positive Reception"));
    }

    #[test]
    fn test_neutral_polarity_labels_count_toward_neither_sum() {
        // Surprise and neutral dominate the tally but drive no regime;
        // only the 3-vs-2 positive/negative split decides, and that is
        // not strictly past 1.5x.
        let tally = tally_of(&[
            (Emotion::Surprise, 40),
            (Emotion::Neutral, 40),
            (Emotion::Joy, 3),
            (Emotion::Anger, 2),
        ]);
        let review = synthesize(&tally, 40);
        assert!(review.contains("Mixed or Balanced Views"));
        assert!(review.contains("**SURPRISE**"));
    }

    #[test]
    fn test_empty_tally_defaults_to_neutral_dominant() {
        let review = synthesize(&EmotionTally::new(), 3);
        assert!(review.contains("**NEUTRAL**"));
        assert!(review.contains("Mixed or Balanced Views"));
    }

    #[test]
    fn test_drivers_list_top_three_capitalized() {
        let tally = tally_of(&[
            (Emotion::Joy, 9),
            (Emotion::Admiration, 7),
            (Emotion::Gratitude, 5),
            (Emotion::Love, 3),
        ]);
        let review = synthesize(&tally, 20);
        assert!(review.contains("**Top Emotional Drivers**: Joy, Admiration, Gratitude."));
    }
}
