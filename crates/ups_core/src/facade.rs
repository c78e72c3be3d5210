//! Scoring facade: the single entry point the outer layers call.
//!
//! Orchestration order is fixed: baseline -> deviation score -> bucket ->
//! (optional) narration. Narration failure never fails scoring; the
//! narrative fields simply stay empty. The facade borrows its collaborators
//! (history, classifier) and owns only transient pipeline objects, so every
//! call is a pure function of its inputs.

use rayon::prelude::*;

use crate::ball_rules::{BallScoring, ThresholdRule, ZScoreRule};
use crate::baseline::BaselineEngine;
use crate::bucket::classify;
use crate::classifier::{extract_features, ClassifierBackend};
use crate::config::UpsConfig;
use crate::deviation::ups_score;
use crate::error::{Result, ScoringError};
use crate::history::HistoryProvider;
use crate::models::{
    AnomalyResult, BallAnomaly, BallEvent, BaselineStats, InningsObservation, NarrationContext,
    Narrative, Tone,
};
use crate::narrate::NarrationAdapter;

pub struct ScoringFacade<'a> {
    history: &'a dyn HistoryProvider,
    classifier: Option<&'a dyn ClassifierBackend>,
    narrator: Option<NarrationAdapter>,
    config: UpsConfig,
}

impl<'a> ScoringFacade<'a> {
    pub fn new(history: &'a dyn HistoryProvider, config: UpsConfig) -> Self {
        Self { history, classifier: None, narrator: None, config }
    }

    /// Attach the trained classifier side channel.
    pub fn with_classifier(mut self, classifier: &'a dyn ClassifierBackend) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Attach a narration adapter; without one, narrated calls silently
    /// leave narrative fields empty.
    pub fn with_narrator(mut self, narrator: NarrationAdapter) -> Self {
        self.narrator = Some(narrator);
        self
    }

    pub fn config(&self) -> &UpsConfig {
        &self.config
    }

    /// Score one innings against its recomputed baseline.
    pub fn score_one(&self, observation: &InningsObservation) -> Result<AnomalyResult> {
        if !observation.runs.is_finite() {
            return Err(ScoringError::InvalidValue {
                field: "runs",
                message: format!("expected a finite number, got {}", observation.runs),
            });
        }

        let engine = BaselineEngine::new(self.history, self.config.baseline);
        let baseline = engine.compute(&observation.player_id, observation.format);
        let score = ups_score(observation.runs, &baseline, self.config.score.cap);
        let (flag, bucket) = classify(score);

        log::debug!(
            "scored innings player={} format={} runs={} ups={:.3} bucket={} source={}",
            observation.player_id,
            observation.format,
            observation.runs,
            score,
            bucket,
            baseline.source.as_str()
        );

        Ok(AnomalyResult {
            player_id: observation.player_id.clone(),
            match_format: observation.format,
            current_runs: observation.runs,
            ups_score: score,
            ups_bucket: bucket,
            ups_anomaly_flag_baseline: flag,
            baseline_mean_runs: baseline.mean,
            baseline_std_runs: baseline.spread,
            baseline_samples: baseline.samples,
            baseline_source: baseline.source,
            model_anomaly_probability: None,
            model_anomaly_label: None,
            narrative_title: None,
            narrative_summary: None,
        })
    }

    /// Score one innings and attach a narrative when an adapter is present.
    pub fn score_one_narrated(
        &self,
        observation: &InningsObservation,
        tone: Tone,
    ) -> Result<AnomalyResult> {
        let mut result = self.score_one(observation)?;
        if let Some(narrator) = &self.narrator {
            let context = NarrationContext {
                team: observation.team.clone(),
                opposition: observation.opposition.clone(),
                venue: observation.venue.clone(),
            };
            let narrative = narrator.narrate(&result, &context, tone);
            result.narrative_title = Some(narrative.title);
            result.narrative_summary = Some(narrative.summary);
        }
        Ok(result)
    }

    /// Score one innings with the trained classifier in the loop.
    ///
    /// Unlike narration, a missing classifier is a hard error: model-based
    /// output was requested and cannot be faked.
    pub fn score_with_model(&self, observation: &InningsObservation) -> Result<AnomalyResult> {
        let classifier = self.classifier.ok_or(ScoringError::ClassifierUnavailable)?;

        let mut result = self.score_one(observation)?;
        let baseline = BaselineStats {
            mean: result.baseline_mean_runs,
            spread: result.baseline_std_runs,
            samples: result.baseline_samples,
            source: result.baseline_source,
        };
        let features = extract_features(observation, &baseline)?;
        let proba = classifier.predict_proba(&features);
        result.model_anomaly_probability = Some(proba[1]);
        result.model_anomaly_label = Some(classifier.predict(&features));
        Ok(result)
    }

    /// Score a batch; output order matches input order, one-to-one.
    pub fn score_batch(&self, observations: &[InningsObservation]) -> Result<Vec<AnomalyResult>> {
        observations.iter().map(|observation| self.score_one(observation)).collect()
    }

    /// Parallel batch scoring. Items are independent, so this is safe; the
    /// indexed collect keeps output order identical to input order.
    pub fn score_batch_parallel(
        &self,
        observations: &[InningsObservation],
    ) -> Result<Vec<AnomalyResult>> {
        observations.par_iter().map(|observation| self.score_one(observation)).collect()
    }

    /// Ball-level scoring with the absolute-threshold strategy.
    pub fn score_ball_threshold(&self, event: &BallEvent) -> BallAnomaly {
        ThresholdRule::new(self.config.ball).score(event)
    }

    /// Ball-level scoring with the two-metric z-score strategy.
    pub fn score_ball_zscore(&self, event: &BallEvent) -> BallAnomaly {
        ZScoreRule::new(self.config.ball).score(event)
    }

    /// Narrate a run of already-scored innings, oldest first.
    pub fn narrate_sequence(&self, results: &[AnomalyResult], tone: Tone) -> Option<Narrative> {
        self.narrator.as_ref().map(|narrator| narrator.narrate_sequence(results, tone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::FeatureVector;
    use crate::history::InMemoryHistory;
    use crate::models::{BaselineSource, Bucket, MatchFormat};

    struct StubClassifier;

    impl ClassifierBackend for StubClassifier {
        fn predict(&self, features: &FeatureVector) -> i64 {
            (features[2] > 50.0) as i64
        }

        fn predict_proba(&self, features: &FeatureVector) -> [f64; 2] {
            let p1 = if features[2] > 50.0 { 0.9 } else { 0.1 };
            [1.0 - p1, p1]
        }
    }

    fn seeded_history() -> InMemoryHistory {
        let mut history = InMemoryHistory::new();
        history.insert_runs(
            "P1",
            MatchFormat::T20,
            &[20.0, 22.0, 25.0, 18.0, 30.0, 24.0, 21.0, 19.0, 23.0, 26.0],
        );
        history
    }

    #[test]
    fn test_end_to_end_breakout_innings() {
        let history = seeded_history();
        let facade = ScoringFacade::new(&history, UpsConfig::default());

        let observation = InningsObservation::new("P1", MatchFormat::T20, 70.0);
        let result = facade.score_one(&observation).unwrap();

        assert_eq!(result.baseline_source, BaselineSource::Player);
        assert!(result.baseline_mean_runs > 21.0 && result.baseline_mean_runs < 23.5);
        assert!(result.baseline_std_runs >= facade.config().baseline.spread_floor);
        assert!(result.ups_score <= facade.config().score.cap);
        assert!(matches!(result.ups_bucket, Bucket::StrongSpike | Bucket::ExtremeSpike));
        assert_eq!(result.ups_anomaly_flag_baseline, 1);
    }

    #[test]
    fn test_empty_history_uses_first_fallback() {
        let history = InMemoryHistory::new();
        let facade = ScoringFacade::new(&history, UpsConfig::default());

        let observation = InningsObservation::new("debutant", MatchFormat::T20, 35.0);
        let result = facade.score_one(&observation).unwrap();
        assert_eq!(result.baseline_source, BaselineSource::Format);
    }

    #[test]
    fn test_score_one_idempotent() {
        let history = seeded_history();
        let facade = ScoringFacade::new(&history, UpsConfig::default());
        let observation = InningsObservation::new("P1", MatchFormat::T20, 47.0);

        let first = facade.score_one(&observation).unwrap();
        let second = facade.score_one(&observation).unwrap();

        assert_eq!(first.ups_score.to_bits(), second.ups_score.to_bits());
        assert_eq!(first.ups_bucket, second.ups_bucket);
        assert_eq!(first.ups_anomaly_flag_baseline, second.ups_anomaly_flag_baseline);
    }

    #[test]
    fn test_batch_preserves_order() {
        let history = seeded_history();
        let facade = ScoringFacade::new(&history, UpsConfig::default());
        let observations: Vec<_> = [10.0, 70.0, 25.0, 55.0]
            .iter()
            .map(|&runs| InningsObservation::new("P1", MatchFormat::T20, runs))
            .collect();

        let sequential = facade.score_batch(&observations).unwrap();
        let parallel = facade.score_batch_parallel(&observations).unwrap();

        assert_eq!(sequential.len(), 4);
        for (a, b) in sequential.iter().zip(&parallel) {
            assert_eq!(a.ups_score.to_bits(), b.ups_score.to_bits());
            assert_eq!(a.current_runs.to_bits(), b.current_runs.to_bits());
        }
        // Order matches input, not severity.
        assert!((sequential[1].current_runs - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_classifier_is_fatal() {
        let history = seeded_history();
        let facade = ScoringFacade::new(&history, UpsConfig::default());
        let observation = InningsObservation::new("P1", MatchFormat::T20, 70.0);

        let err = facade.score_with_model(&observation).unwrap_err();
        assert!(matches!(err, ScoringError::ClassifierUnavailable));
    }

    #[test]
    fn test_model_path_fills_model_fields() {
        let history = seeded_history();
        let classifier = StubClassifier;
        let facade =
            ScoringFacade::new(&history, UpsConfig::default()).with_classifier(&classifier);
        let observation = InningsObservation::new("P1", MatchFormat::T20, 70.0);

        let result = facade.score_with_model(&observation).unwrap();
        assert_eq!(result.model_anomaly_label, Some(1));
        assert!(result.model_anomaly_probability.unwrap() > 0.5);
    }

    #[test]
    fn test_nan_runs_rejected() {
        let history = seeded_history();
        let facade = ScoringFacade::new(&history, UpsConfig::default());
        let observation = InningsObservation::new("P1", MatchFormat::T20, f64::NAN);

        assert!(facade.score_one(&observation).is_err());
    }

    #[test]
    fn test_narration_attached_when_requested() {
        let history = seeded_history();
        let facade = ScoringFacade::new(&history, UpsConfig::default())
            .with_narrator(NarrationAdapter::rule_based());

        let mut observation = InningsObservation::new("P1", MatchFormat::T20, 70.0);
        observation.venue = Some("Eden Gardens".to_string());
        let result = facade.score_one_narrated(&observation, Tone::Commentator).unwrap();

        assert!(result.narrative_title.is_some());
        assert!(result.narrative_summary.unwrap().contains("Eden Gardens"));
    }

    #[test]
    fn test_no_narrator_leaves_fields_empty() {
        let history = seeded_history();
        let facade = ScoringFacade::new(&history, UpsConfig::default());

        let observation = InningsObservation::new("P1", MatchFormat::T20, 70.0);
        let result = facade.score_one_narrated(&observation, Tone::Analyst).unwrap();
        assert!(result.narrative_title.is_none());
        assert!(result.narrative_summary.is_none());
    }

    #[test]
    fn test_ball_strategies_disagree_by_design() {
        let history = InMemoryHistory::new();
        let facade = ScoringFacade::new(&history, UpsConfig::default());

        // A dot ball where several runs were expected: invisible to the
        // threshold rule, flagged by the symmetric z-score rule.
        let event = BallEvent {
            match_id: "M1".to_string(),
            over: 18,
            ball: 3,
            runs: 0.0,
            wickets: 0.0,
            expected_runs: 5.0,
            expected_wickets: 0.0,
        };

        let threshold = facade.score_ball_threshold(&event);
        let zscore = facade.score_ball_zscore(&event);

        assert!(!threshold.is_anomaly);
        assert!(zscore.is_anomaly);
    }
}
