//! CrowdPulse Insight
//!
//! Pure computation over classifier output: discrete label assignment
//! with a confidence-threshold-with-fallback rule, frequency tallying,
//! and synthesis of the narrative review from the aggregate
//! distribution. No I/O anywhere in this crate.

pub mod aggregate;
pub mod review;

pub use aggregate::{assign_labels, tally, CONFIDENCE_THRESHOLD, FALLBACK_LABELS};
pub use review::{synthesize, POLARITY_RATIO};
