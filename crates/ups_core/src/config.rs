//! Centralized scoring configuration.
//!
//! All tunable values used by the baseline engine, the deviation scorer and
//! the ball-level rules live here. Instead of hardcoded magic numbers spread
//! across the pipeline, thresholds are grouped per concern and can be
//! selected via presets or an environment variable.
//!
//! ## Configuration groups
//!
//! | Group | Description |
//! |----------|-------------|
//! | Baseline | History window, recency decay, spread floor |
//! | Score | UPS score cap |
//! | Ball | Ball-event thresholds and expected-value stds |
//!
//! ## Environment Variables
//!
//! - `UPS_PROFILE`: Select preset (t20, test, default)

use serde::{Deserialize, Serialize};
use std::env;

/// Baseline computation parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BaselineConfig {
    /// Maximum number of recent innings considered
    pub max_window: usize,
    /// Minimum innings required for a player-specific baseline
    pub min_samples: usize,
    /// Exponential recency decay rate (w_i = exp(-decay_rate * i))
    pub decay_rate: f64,
    /// Lower bound applied to the baseline spread
    pub spread_floor: f64,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self { max_window: 10, min_samples: 5, decay_rate: 0.3, spread_floor: 5.0 }
    }
}

/// Innings-level UPS score parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UpsScoreConfig {
    /// Ceiling applied to the one-sided score
    pub cap: f64,
}

impl Default for UpsScoreConfig {
    fn default() -> Self {
        Self { cap: 5.0 }
    }
}

/// Ball-event rule parameters, shared by both ball-level strategies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BallThresholds {
    /// Runs on a single delivery at or above which the threshold rule fires
    pub run_threshold: f64,
    /// Wickets on a single delivery at or above which the threshold rule fires
    pub wicket_threshold: f64,
    /// Std used for the run z-score in the two-metric rule
    pub run_std: f64,
    /// Std used for the wicket z-score in the two-metric rule
    pub wicket_std: f64,
    /// Combined euclidean score at or above which the two-metric rule fires
    pub combined_threshold: f64,
}

impl Default for BallThresholds {
    fn default() -> Self {
        Self {
            run_threshold: 6.0,
            wicket_threshold: 1.0,
            run_std: 1.5,
            wicket_std: 0.25,
            combined_threshold: 2.0,
        }
    }
}

/// Bundled configuration for the scoring pipeline.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UpsConfig {
    pub baseline: BaselineConfig,
    pub score: UpsScoreConfig,
    pub ball: BallThresholds,
}

impl UpsConfig {
    /// T20 preset - short format, volatile scores, wider spread floor
    pub fn t20() -> Self {
        Self {
            baseline: BaselineConfig { spread_floor: 8.0, ..BaselineConfig::default() },
            score: UpsScoreConfig::default(),
            ball: BallThresholds::default(),
        }
    }

    /// Test-match preset - longer memory, slower decay
    pub fn test_match() -> Self {
        Self {
            baseline: BaselineConfig {
                max_window: 20,
                decay_rate: 0.15,
                ..BaselineConfig::default()
            },
            score: UpsScoreConfig::default(),
            ball: BallThresholds { run_threshold: 4.0, ..BallThresholds::default() },
        }
    }

    /// Load from environment variable UPS_PROFILE or use default
    pub fn from_env_or_default() -> Self {
        match env::var("UPS_PROFILE").unwrap_or_default().to_lowercase().as_str() {
            "t20" => Self::t20(),
            "test" => Self::test_match(),
            _ => Self::default(),
        }
    }
}
