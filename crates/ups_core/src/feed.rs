//! Anomaly feed helpers: ranking scored innings and building the short
//! rule-based headline/driver text shown in feed listings.
//!
//! These are presentation-adjacent but deterministic, so they live in the
//! core next to the types they read. The narrative adapter is not involved;
//! feed text is always rule-based.

use serde::Serialize;

use crate::models::{AnomalyResult, Bucket};

/// Weight of the UPS score vs the model probability in feed ranking.
const UPS_WEIGHT: f64 = 0.7;
const PROB_WEIGHT: f64 = 0.3;
/// Model probability is 0-1; rescaled to the UPS cap before mixing.
const PROB_SCALE: f64 = 5.0;

/// One ranked feed entry.
#[derive(Debug, Clone, Serialize)]
pub struct FeedItem {
    pub event_id: String,
    pub combined_score: f64,
    pub headline: String,
    pub key_drivers: Vec<String>,
    #[serde(flatten)]
    pub result: AnomalyResult,
}

/// Combined severity using UPS and model probability when available.
pub fn combined_score(result: &AnomalyResult) -> f64 {
    match result.model_anomaly_probability {
        Some(prob) => UPS_WEIGHT * result.ups_score + PROB_WEIGHT * (prob * PROB_SCALE),
        None => result.ups_score,
    }
}

/// Rule-based sports headline for one scored innings.
pub fn build_headline(result: &AnomalyResult) -> String {
    let player = &result.player_id;
    let format = result.match_format;
    let runs = result.current_runs;
    let baseline = result.baseline_mean_runs;

    match result.ups_bucket {
        Bucket::ExtremeSpike | Bucket::StrongSpike => format!(
            "{} lights up {} with a breakout {:.0} — way above the usual {:.0}",
            player, format, runs, baseline
        ),
        Bucket::MildSpike => format!(
            "{} finds extra gears in {}, posting {:.0} beyond the usual {:.0}",
            player, format, runs, baseline
        ),
        Bucket::Normal => format!("Featured innings: {} posts {:.0} in {}", player, runs, format),
    }
}

/// Rule-based bullets describing what drives the anomaly. At most three.
pub fn build_key_drivers(result: &AnomalyResult) -> Vec<String> {
    let mut drivers = Vec::new();

    let ups = result.ups_score;
    drivers.push(match result.ups_bucket {
        Bucket::ExtremeSpike => format!("Extreme spike (~{:.1} sigma above baseline)", ups),
        Bucket::StrongSpike => format!("Strong spike (~{:.1} sigma above baseline)", ups),
        Bucket::MildSpike => format!("Moderate spike (~{:.1} sigma above baseline)", ups),
        Bucket::Normal => format!("Near baseline (~{:.1} sigma)", ups),
    });

    if let Some(prob) = result.model_anomaly_probability {
        if prob > 0.7 {
            drivers.push("Model strongly agrees this innings is an outlier.".to_string());
        } else if prob < 0.3 {
            drivers.push("Model sees this innings as unremarkable.".to_string());
        }
    }

    if drivers.len() < 2 {
        drivers.push("Context: baseline vs current runs drives this anomaly.".to_string());
    }
    drivers.truncate(3);
    drivers
}

/// Assemble and rank feed items, highest combined severity first.
///
/// Ranking is stable for equal scores, so repeated assembly of the same
/// results yields the same ordering.
pub fn assemble_feed(results: &[AnomalyResult], min_ups: f64, limit: usize) -> Vec<FeedItem> {
    let mut items: Vec<FeedItem> = results
        .iter()
        .filter(|result| result.ups_score >= min_ups)
        .map(|result| FeedItem {
            event_id: format!("{}-{}", result.player_id, result.match_format),
            combined_score: combined_score(result),
            headline: build_headline(result),
            key_drivers: build_key_drivers(result),
            result: result.clone(),
        })
        .collect();

    items.sort_by(|a, b| {
        b.combined_score.partial_cmp(&a.combined_score).unwrap_or(std::cmp::Ordering::Equal)
    });
    items.truncate(limit);
    items
}
