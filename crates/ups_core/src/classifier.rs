//! Trained-classifier side channel.
//!
//! The core never trains or loads a model; it borrows an opaque
//! [`ClassifierBackend`] and feeds it a fixed-order feature vector. Feature
//! order is part of the training contract and must never be reordered.

use crate::error::{Result, ScoringError};
use crate::models::{BaselineStats, InningsObservation};

pub const FEATURE_COUNT: usize = 6;

/// Fixed-order numeric features:
/// `[baseline_mean, baseline_spread, observed_runs, venue_factor,
///   opposition_factor, batting_position]`
pub type FeatureVector = [f64; FEATURE_COUNT];

const DEFAULT_VENUE_FACTOR: f64 = 0.5;
const DEFAULT_OPPOSITION_FACTOR: f64 = 0.5;
const DEFAULT_BATTING_POSITION: u8 = 4;

/// Opaque binary classifier contract (`fit` happens elsewhere).
/// `Sync` because parallel batch scoring shares the backend across threads.
pub trait ClassifierBackend: Sync {
    /// Binary anomaly label for one feature vector.
    fn predict(&self, features: &FeatureVector) -> i64;

    /// `[prob_class0, prob_class1]` for one feature vector.
    fn predict_proba(&self, features: &FeatureVector) -> [f64; 2];
}

/// Build the feature vector for one observation and its baseline.
///
/// Only the contextual fields get defaults; the required numeric metric must
/// be a usable number or the call fails.
pub fn extract_features(
    observation: &InningsObservation,
    baseline: &BaselineStats,
) -> Result<FeatureVector> {
    if !observation.runs.is_finite() {
        return Err(ScoringError::InvalidValue {
            field: "runs",
            message: format!("expected a finite number, got {}", observation.runs),
        });
    }

    Ok([
        baseline.mean,
        baseline.spread,
        observation.runs,
        observation.venue_factor.unwrap_or(DEFAULT_VENUE_FACTOR),
        observation.opposition_factor.unwrap_or(DEFAULT_OPPOSITION_FACTOR),
        f64::from(observation.batting_position.unwrap_or(DEFAULT_BATTING_POSITION)),
    ])
}
