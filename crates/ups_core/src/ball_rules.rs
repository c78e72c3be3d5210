//! Ball-level anomaly strategies.
//!
//! Two decision rules exist side by side and are NOT reparametrizations of
//! each other:
//!
//! - [`ThresholdRule`]: absolute thresholds applied to the raw metrics
//!   ("a six or a wicket is an event"), no normalization.
//! - [`ZScoreRule`]: two-metric z-scores against the attached expectations,
//!   combined into a symmetric euclidean score.
//!
//! Callers pick a strategy at construction time via the [`BallScoring`]
//! trait; nothing inspects the concrete type at call time.

use crate::config::BallThresholds;
use crate::deviation::combined_deviation;
use crate::models::{BallAnomaly, BallEvent};

const SPORT: &str = "cricket";

/// Guard for caller-supplied stds; a zero std would blow up the z-score.
const STD_EPSILON: f64 = 1e-6;

/// Strategy interface for scoring a single delivery.
pub trait BallScoring {
    fn score(&self, event: &BallEvent) -> BallAnomaly;

    fn score_all(&self, events: &[BallEvent]) -> Vec<BallAnomaly> {
        events.iter().map(|event| self.score(event)).collect()
    }
}

/// Absolute-threshold rule on raw runs/wickets.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdRule {
    thresholds: BallThresholds,
}

impl ThresholdRule {
    pub fn new(thresholds: BallThresholds) -> Self {
        Self { thresholds }
    }
}

impl BallScoring for ThresholdRule {
    fn score(&self, event: &BallEvent) -> BallAnomaly {
        let is_run_spike = event.runs >= self.thresholds.run_threshold;
        let is_wicket_event = event.wickets >= self.thresholds.wicket_threshold;
        let is_anomaly = is_run_spike || is_wicket_event;

        // Wickets dominate: a dismissal outweighs boundary runs.
        let score = event.runs + if is_wicket_event { 5.0 } else { 0.0 };

        let mut reason_parts = Vec::new();
        if is_run_spike {
            reason_parts.push(format!("runs >= {}", self.thresholds.run_threshold));
        }
        if is_wicket_event {
            reason_parts.push(format!("wickets >= {}", self.thresholds.wicket_threshold));
        }
        let reason = if reason_parts.is_empty() {
            "within expected range".to_string()
        } else {
            reason_parts.join("; ")
        };

        BallAnomaly {
            match_id: event.match_id.clone(),
            over: event.over,
            ball: event.ball,
            anomaly_score: score,
            is_anomaly,
            reason,
            sport: SPORT.to_string(),
        }
    }
}

/// Two-metric z-score rule against attached expectations.
#[derive(Debug, Clone, Copy)]
pub struct ZScoreRule {
    thresholds: BallThresholds,
}

impl ZScoreRule {
    pub fn new(thresholds: BallThresholds) -> Self {
        Self { thresholds }
    }

    fn safe_std(value: f64) -> f64 {
        if value <= 0.0 {
            STD_EPSILON
        } else {
            value
        }
    }

    fn build_reason(z_run: f64, z_wicket: f64, is_anomaly: bool) -> String {
        if !is_anomaly {
            return "within expected range".to_string();
        }

        let mut messages = Vec::new();
        if z_run.abs() >= 1.0 {
            messages.push(if z_run > 0.0 {
                "runs higher than expected"
            } else {
                "runs lower than expected"
            });
        }
        if z_wicket.abs() >= 1.0 {
            messages.push(if z_wicket > 0.0 {
                "more wickets than expected"
            } else {
                "fewer wickets than expected"
            });
        }

        if messages.is_empty() {
            "overall deviation from baseline".to_string()
        } else {
            messages.join("; ")
        }
    }
}

impl BallScoring for ZScoreRule {
    fn score(&self, event: &BallEvent) -> BallAnomaly {
        let run_std = Self::safe_std(self.thresholds.run_std);
        let wicket_std = Self::safe_std(self.thresholds.wicket_std);

        let z_run = (event.runs - event.expected_runs) / run_std;
        let z_wicket = (event.wickets - event.expected_wickets) / wicket_std;
        let score = combined_deviation(z_run, z_wicket);
        let is_anomaly = score >= self.thresholds.combined_threshold;

        BallAnomaly {
            match_id: event.match_id.clone(),
            over: event.over,
            ball: event.ball,
            anomaly_score: score,
            is_anomaly,
            reason: Self::build_reason(z_run, z_wicket, is_anomaly),
            sport: SPORT.to_string(),
        }
    }
}
