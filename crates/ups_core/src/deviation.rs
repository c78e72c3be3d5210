//! Deviation scoring: baseline + observation -> anomaly score.
//!
//! Two sibling modes exist and are intentionally kept distinct:
//!
//! - [`ups_score`]: the innings-level UPS score. One-sided (negative
//!   deviations clamp to zero; only excess performance counts as a spike)
//!   and capped so scores stay comparable across players.
//! - [`combined_deviation`]: the ball-level two-metric score. Symmetric and
//!   uncapped; it signals deviation in either direction for both metrics.

use crate::models::BaselineStats;

/// Z-score with a guard for non-positive spread.
///
/// A spread of zero only occurs on the degenerate empty-window baseline;
/// it must yield 0 rather than a division by zero or NaN.
pub fn z_score(observed: f64, mean: f64, spread: f64) -> f64 {
    if spread <= 0.0 {
        return 0.0;
    }
    (observed - mean) / spread
}

/// One-sided capped UPS score for a batting innings.
///
/// `z = (observed - mean) / spread` when spread > 0, else 0;
/// result is `min(max(z, 0), cap)`.
pub fn ups_score(observed: f64, baseline: &BaselineStats, cap: f64) -> f64 {
    let z = z_score(observed, baseline.mean, baseline.spread);
    z.max(0.0).min(cap)
}

/// Symmetric euclidean combination of two per-metric z-scores.
///
/// Used for ball events where runs and wickets each deviate against their
/// own expectation. No clamp, no cap: a collapse is as anomalous as a spike.
pub fn combined_deviation(z_primary: f64, z_secondary: f64) -> f64 {
    (z_primary.powi(2) + z_secondary.powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BaselineSource;
    use proptest::prelude::*;

    fn baseline(mean: f64, spread: f64) -> BaselineStats {
        BaselineStats { mean, spread, samples: 10, source: BaselineSource::Player }
    }

    #[test]
    fn test_zero_spread_scores_zero() {
        assert_eq!(ups_score(70.0, &baseline(20.0, 0.0), 5.0), 0.0);
        assert_eq!(ups_score(70.0, &baseline(20.0, -1.0), 5.0), 0.0);
        assert_eq!(z_score(f64::MAX, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_negative_deviation_clamps_to_zero() {
        // Scoring below baseline is not a spike.
        let score = ups_score(5.0, &baseline(25.0, 10.0), 5.0);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_cap_applied() {
        let score = ups_score(500.0, &baseline(20.0, 5.0), 5.0);
        assert_eq!(score, 5.0);
    }

    #[test]
    fn test_plain_z_within_cap() {
        let score = ups_score(40.0, &baseline(20.0, 10.0), 5.0);
        assert!((score - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_combined_deviation_symmetric() {
        // A dip deviates exactly as much as an equal-sized spike.
        let spike = combined_deviation(2.0, 0.5);
        let dip = combined_deviation(-2.0, -0.5);
        assert!((spike - dip).abs() < 1e-12);
        assert!((spike - (4.25f64).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_combined_deviation_uncapped() {
        assert!(combined_deviation(10.0, 10.0) > 5.0);
    }

    proptest! {
        #[test]
        fn prop_score_bounded(observed in -1000.0..1000.0f64, mean in -100.0..100.0f64, spread in 0.0..50.0f64) {
            let score = ups_score(observed, &baseline(mean, spread), 5.0);
            prop_assert!((0.0..=5.0).contains(&score));
            prop_assert!(score.is_finite());
        }

        #[test]
        fn prop_score_monotonic_in_observed(a in -500.0..500.0f64, delta in 0.0..500.0f64, mean in -100.0..100.0f64, spread in 0.1..50.0f64) {
            // For a fixed baseline, a higher innings never scores lower.
            let lower = ups_score(a, &baseline(mean, spread), 5.0);
            let higher = ups_score(a + delta, &baseline(mean, spread), 5.0);
            prop_assert!(higher >= lower);
        }
    }
}
