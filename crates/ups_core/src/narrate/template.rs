//! Deterministic rule-based narration backend.
//!
//! Pure text generation: no I/O, always succeeds. Each tone has its own
//! fixed phrasing; tone changes word choice only, never the facts carried in
//! the summary.

use crate::models::{AnomalyResult, Bucket, NarrationContext, Narrative, Tone};

/// First-vs-last score delta beyond which a sequence trends up or down.
pub const TREND_DELTA: f64 = 0.5;

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateNarrator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trend {
    Upward,
    Downward,
    Stable,
}

impl Trend {
    fn as_str(&self) -> &'static str {
        match self {
            Trend::Upward => "upward",
            Trend::Downward => "downward",
            Trend::Stable => "stable",
        }
    }
}

impl TemplateNarrator {
    pub fn narrate(
        &self,
        result: &AnomalyResult,
        context: &NarrationContext,
        tone: Tone,
    ) -> Narrative {
        let title = self.title(result, tone);
        let summary = self.summary(result, context, tone);
        Narrative { title, summary }
    }

    /// Aggregate narration for an ordered run of scored innings.
    pub fn narrate_sequence(&self, results: &[AnomalyResult], tone: Tone) -> Narrative {
        if results.is_empty() {
            return Narrative {
                title: "No recent innings".to_string(),
                summary: "No scored innings were available to summarize.".to_string(),
            };
        }

        let avg_score =
            results.iter().map(|r| r.ups_score).sum::<f64>() / results.len() as f64;
        let spike_count = results
            .iter()
            .filter(|r| matches!(r.ups_bucket, Bucket::StrongSpike | Bucket::ExtremeSpike))
            .count();
        let trend = sequence_trend(results);
        let player = results[0].player_id.as_str();

        let title = match tone {
            Tone::Analyst => format!("Recent form review: {}", player),
            Tone::Commentator => format!("{}'s run of innings, called live", player),
            Tone::Casual => format!("How {}'s been doing lately", player),
        };

        let summary = match tone {
            Tone::Analyst => format!(
                "Across {} innings the average UPS is {:.2} with {} strong-or-extreme spike(s). \
                 The trajectory is {}.",
                results.len(),
                avg_score,
                spike_count,
                trend.as_str()
            ),
            Tone::Commentator => format!(
                "Over the last {} innings it's been averaging out at UPS {:.2}, {} of them \
                 real fireworks, and the curve is pointing {}!",
                results.len(),
                avg_score,
                spike_count,
                trend.as_str()
            ),
            Tone::Casual => format!(
                "Last {} knocks: average spike score {:.2}, {} big one(s), trend looks {}.",
                results.len(),
                avg_score,
                spike_count,
                trend.as_str()
            ),
        };

        Narrative { title, summary }
    }

    fn title(&self, result: &AnomalyResult, tone: Tone) -> String {
        let spiking = matches!(result.ups_bucket, Bucket::StrongSpike | Bucket::ExtremeSpike);
        let dipped = result.model_anomaly_label == Some(1)
            && result.ups_bucket == Bucket::Normal
            && result.current_runs < result.baseline_mean_runs;

        match tone {
            Tone::Analyst => {
                if spiking {
                    format!("Performance spike flagged for {}", result.player_id)
                } else if dipped {
                    format!("Below-baseline outlier for {}", result.player_id)
                } else {
                    format!("Innings assessment: {}", result.player_id)
                }
            }
            Tone::Commentator => {
                if spiking {
                    format!("{} lights it up!", result.player_id)
                } else if dipped {
                    format!("A quiet day for {}", result.player_id)
                } else {
                    format!("Steady stuff from {}", result.player_id)
                }
            }
            Tone::Casual => {
                if spiking {
                    format!("{} went off today", result.player_id)
                } else if dipped {
                    format!("{} had a rough one", result.player_id)
                } else {
                    format!("Nothing wild from {}", result.player_id)
                }
            }
        }
    }

    fn summary(
        &self,
        result: &AnomalyResult,
        context: &NarrationContext,
        tone: Tone,
    ) -> String {
        let setting = match (&context.venue, &context.opposition) {
            (Some(venue), Some(opposition)) => format!(" at {} against {}", venue, opposition),
            (Some(venue), None) => format!(" at {}", venue),
            (None, Some(opposition)) => format!(" against {}", opposition),
            (None, None) => String::new(),
        };

        match tone {
            Tone::Analyst => format!(
                "{} ({}){} scored {:.0} against a baseline of {:.0} (±{:.0}). \
                 UPS {:.2} places the innings in the {} band.",
                result.player_id,
                result.match_format,
                setting,
                result.current_runs,
                result.baseline_mean_runs,
                result.baseline_std_runs,
                result.ups_score,
                result.ups_bucket
            ),
            Tone::Commentator => format!(
                "{} has made {:.0} in this {} innings{}, when {:.0} was par! \
                 That registers a UPS of {:.2}, {} territory.",
                result.player_id,
                result.current_runs,
                result.match_format,
                setting,
                result.baseline_mean_runs,
                result.ups_score,
                result.ups_bucket
            ),
            Tone::Casual => format!(
                "{} put up {:.0} in {}{} when they usually get about {:.0}. \
                 Spike score {:.2} ({}).",
                result.player_id,
                result.current_runs,
                result.match_format,
                setting,
                result.baseline_mean_runs,
                result.ups_score,
                result.ups_bucket
            ),
        }
    }
}

fn sequence_trend(results: &[AnomalyResult]) -> Trend {
    let first = results.first().map(|r| r.ups_score).unwrap_or(0.0);
    let last = results.last().map(|r| r.ups_score).unwrap_or(0.0);
    let delta = last - first;
    if delta > TREND_DELTA {
        Trend::Upward
    } else if delta < -TREND_DELTA {
        Trend::Downward
    } else {
        Trend::Stable
    }
}

/// Whether a bucket counts toward the sequence spike tally.
/// Mirrors the flag threshold of the continuous classifier.
pub fn is_spike_bucket(bucket: Bucket) -> bool {
    matches!(bucket, Bucket::StrongSpike | Bucket::ExtremeSpike)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BaselineSource, MatchFormat};

    fn result(score: f64, bucket: Bucket) -> AnomalyResult {
        AnomalyResult {
            player_id: "V. Sharma".to_string(),
            match_format: MatchFormat::T20,
            current_runs: 70.0,
            ups_score: score,
            ups_bucket: bucket,
            ups_anomaly_flag_baseline: is_spike_bucket(bucket) as u8,
            baseline_mean_runs: 23.0,
            baseline_std_runs: 8.0,
            baseline_samples: 10,
            baseline_source: BaselineSource::Player,
            model_anomaly_probability: None,
            model_anomaly_label: None,
            narrative_title: None,
            narrative_summary: None,
        }
    }

    #[test]
    fn test_tones_have_distinct_phrasing_same_facts() {
        let narrator = TemplateNarrator;
        let context = NarrationContext::default();
        let scored = result(4.0, Bucket::ExtremeSpike);

        let analyst = narrator.narrate(&scored, &context, Tone::Analyst);
        let commentator = narrator.narrate(&scored, &context, Tone::Commentator);
        let casual = narrator.narrate(&scored, &context, Tone::Casual);

        assert_ne!(analyst.summary, commentator.summary);
        assert_ne!(commentator.summary, casual.summary);
        // The facts survive every tone.
        for narrative in [&analyst, &commentator, &casual] {
            assert!(narrative.summary.contains("70"));
            assert!(narrative.summary.contains("23"));
            assert!(narrative.summary.contains("4.00"));
        }
    }

    #[test]
    fn test_context_appears_in_summary() {
        let narrator = TemplateNarrator;
        let context = NarrationContext {
            team: None,
            opposition: Some("Australia".to_string()),
            venue: Some("MCG".to_string()),
        };
        let narrative = narrator.narrate(&result(2.5, Bucket::StrongSpike), &context, Tone::Analyst);
        assert!(narrative.summary.contains("MCG"));
        assert!(narrative.summary.contains("Australia"));
    }

    #[test]
    fn test_dip_title_when_model_flags_below_baseline() {
        let narrator = TemplateNarrator;
        let mut dipped = result(0.0, Bucket::Normal);
        dipped.current_runs = 4.0;
        dipped.model_anomaly_label = Some(1);

        let narrative = narrator.narrate(&dipped, &NarrationContext::default(), Tone::Analyst);
        assert!(narrative.title.contains("Below-baseline"));
    }

    #[test]
    fn test_sequence_trend_directions() {
        let narrator = TemplateNarrator;
        let upward = vec![result(0.2, Bucket::Normal), result(3.0, Bucket::ExtremeSpike)];
        let downward = vec![result(3.0, Bucket::ExtremeSpike), result(0.2, Bucket::Normal)];
        let stable = vec![result(1.0, Bucket::MildSpike), result(1.3, Bucket::MildSpike)];

        assert!(narrator
            .narrate_sequence(&upward, Tone::Analyst)
            .summary
            .contains("upward"));
        assert!(narrator
            .narrate_sequence(&downward, Tone::Analyst)
            .summary
            .contains("downward"));
        assert!(narrator
            .narrate_sequence(&stable, Tone::Analyst)
            .summary
            .contains("stable"));
    }

    #[test]
    fn test_sequence_counts_top_buckets() {
        let narrator = TemplateNarrator;
        let results = vec![
            result(0.5, Bucket::Normal),
            result(2.2, Bucket::StrongSpike),
            result(3.4, Bucket::ExtremeSpike),
        ];
        let narrative = narrator.narrate_sequence(&results, Tone::Analyst);
        assert!(narrative.summary.contains("2 strong-or-extreme spike(s)"));
    }

    #[test]
    fn test_empty_sequence_still_returns_narrative() {
        let narrator = TemplateNarrator;
        let narrative = narrator.narrate_sequence(&[], Tone::Casual);
        assert!(!narrative.title.is_empty());
        assert!(!narrative.summary.is_empty());
    }
}
