//! Bucket classification for the continuous UPS score.
//!
//! Thresholds are half-open and lower-inclusive; a score of exactly 2.0 is
//! `strong_spike`, not `mild_spike`. These constants are a behavioral
//! contract shared with trained-model labels and are deliberately not
//! configurable.

use crate::models::Bucket;

pub const MILD_THRESHOLD: f64 = 1.0;
pub const STRONG_THRESHOLD: f64 = 2.0;
pub const EXTREME_THRESHOLD: f64 = 3.0;

/// Map a UPS score to its anomaly flag and severity bucket.
///
/// Flag is set for the top two buckets only.
pub fn classify(score: f64) -> (u8, Bucket) {
    if score < MILD_THRESHOLD {
        (0, Bucket::Normal)
    } else if score < STRONG_THRESHOLD {
        (0, Bucket::MildSpike)
    } else if score < EXTREME_THRESHOLD {
        (1, Bucket::StrongSpike)
    } else {
        (1, Bucket::ExtremeSpike)
    }
}
