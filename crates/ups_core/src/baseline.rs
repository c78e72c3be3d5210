//! Baseline computation with recency weighting and a fallback hierarchy.
//!
//! A baseline answers "what did we expect this player to score?". The engine
//! prefers a player-specific recency-weighted baseline and degrades through
//! increasingly coarse sources when history is too thin:
//!
//! 1. player history, exponentially weighted (requires `min_samples` innings)
//! 2. per-format heuristic constants
//! 3. global heuristic constants
//! 4. hard default (mean 20, spread 15)
//!
//! The ordering is a behavioral contract; each step tags
//! [`BaselineSource`](crate::models::BaselineSource) so downstream consumers
//! can tell how coarse the reference point was. Missing history is never an
//! error.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::config::BaselineConfig;
use crate::history::HistoryProvider;
use crate::models::{BaselineSource, BaselineStats, MatchFormat};

/// Coarse per-format averages used when a player has too little history.
static FORMAT_BASELINES: Lazy<HashMap<MatchFormat, (f64, f64)>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert(MatchFormat::T20, (25.0, 10.0));
    table.insert(MatchFormat::Odi, (32.0, 14.0));
    table.insert(MatchFormat::Test, (35.0, 16.0));
    table
});

const GLOBAL_BASELINE: (f64, f64) = (22.0, 12.0);
const DEFAULT_BASELINE: (f64, f64) = (20.0, 15.0);

/// Computes [`BaselineStats`] from a borrowed history provider.
///
/// Stateless apart from the read-only provider reference; every call
/// recomputes from scratch, which keeps scoring idempotent.
pub struct BaselineEngine<'a> {
    history: &'a dyn HistoryProvider,
    config: BaselineConfig,
}

impl<'a> BaselineEngine<'a> {
    pub fn new(history: &'a dyn HistoryProvider, config: BaselineConfig) -> Self {
        Self { history, config }
    }

    pub fn config(&self) -> &BaselineConfig {
        &self.config
    }

    /// Compute the baseline for one player in one format.
    ///
    /// Takes at most `max_window` innings (provider returns most-recent-first)
    /// and requires `min_samples` of them for the player path; otherwise the
    /// first applicable fallback wins.
    pub fn compute(&self, player_id: &str, format: MatchFormat) -> BaselineStats {
        let mut innings = self.history.recent_innings(player_id, format);
        innings.truncate(self.config.max_window);

        if innings.len() >= self.config.min_samples {
            let runs: Vec<f64> = innings.iter().map(|record| record.runs).collect();
            let (mean, std, samples) = weighted_stats(&runs, self.config.decay_rate);
            if samples == 0 {
                // Zero-weight sum: only reachable with a zero-size window.
                // Callers must treat spread = 0 as "no deviation signal".
                return BaselineStats {
                    mean: 0.0,
                    spread: 0.0,
                    samples: 0,
                    source: BaselineSource::Player,
                };
            }
            return BaselineStats {
                mean,
                spread: std.max(self.config.spread_floor),
                samples,
                source: BaselineSource::Player,
            };
        }

        if let Some(stats) = self.format_heuristic(format) {
            return stats;
        }
        if let Some(stats) = self.global_heuristic() {
            return stats;
        }

        BaselineStats {
            mean: DEFAULT_BASELINE.0,
            spread: DEFAULT_BASELINE.1,
            samples: 0,
            source: BaselineSource::Default,
        }
    }

    /// Per-format heuristic baseline; step 2 of the fallback chain.
    fn format_heuristic(&self, format: MatchFormat) -> Option<BaselineStats> {
        FORMAT_BASELINES.get(&format).map(|&(mean, spread)| BaselineStats {
            mean,
            spread: spread.max(self.config.spread_floor),
            samples: 0,
            source: BaselineSource::Format,
        })
    }

    /// Global heuristic baseline; step 3 of the fallback chain.
    fn global_heuristic(&self) -> Option<BaselineStats> {
        Some(BaselineStats {
            mean: GLOBAL_BASELINE.0,
            spread: GLOBAL_BASELINE.1.max(self.config.spread_floor),
            samples: 0,
            source: BaselineSource::Global,
        })
    }
}

/// Exponentially weighted mean and population std, most-recent-first.
///
/// `w_i = exp(-decay_rate * i)` with i = 0 for the most recent value.
/// Returns `(0.0, 0.0, 0)` when the slice is empty.
pub fn weighted_stats(values: &[f64], decay_rate: f64) -> (f64, f64, usize) {
    let weights: Vec<f64> =
        (0..values.len()).map(|i| (-decay_rate * i as f64).exp()).collect();
    let weight_sum: f64 = weights.iter().sum();
    if weight_sum == 0.0 {
        return (0.0, 0.0, 0);
    }

    let mean = values
        .iter()
        .zip(&weights)
        .map(|(value, weight)| value * weight)
        .sum::<f64>()
        / weight_sum;
    let variance = values
        .iter()
        .zip(&weights)
        .map(|(value, weight)| weight * (value - mean).powi(2))
        .sum::<f64>()
        / weight_sum;

    (mean, variance.sqrt(), values.len())
}
