//! Generative narration backend.
//!
//! Wraps an external text-generation service behind the [`TextGeneration`]
//! contract: one blocking call, no streaming, no retries. The backend builds
//! a structured prompt (serialized event + tone + output-shape instructions)
//! and parses a JSON response. Every failure path degrades to fixed generic
//! text; nothing here ever surfaces an error to the scoring pipeline.

use serde::Serialize;
use thiserror::Error;

use crate::models::{AnomalyResult, NarrationContext, Narrative, Tone};

const DEFAULT_TEMPERATURE: f64 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 256;

#[derive(Error, Debug)]
pub enum TextGenerationError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("backend call timed out")]
    Timeout,
}

/// Minimal text-generation contract. Single blocking attempt; the caller
/// imposes any timeout and maps it to [`TextGenerationError::Timeout`].
/// `Send + Sync` so the owning facade stays shareable across threads.
pub trait TextGeneration: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
        temperature: Option<f64>,
        max_tokens: Option<u32>,
    ) -> Result<String, TextGenerationError>;
}

#[derive(Serialize)]
struct PromptEvent<'a> {
    #[serde(flatten)]
    result: &'a AnomalyResult,
    #[serde(flatten)]
    context: &'a NarrationContext,
    tone: Tone,
}

pub struct GenerativeNarrator {
    client: Box<dyn TextGeneration>,
}

impl GenerativeNarrator {
    pub fn new(client: Box<dyn TextGeneration>) -> Self {
        Self { client }
    }

    pub fn narrate(
        &self,
        result: &AnomalyResult,
        context: &NarrationContext,
        tone: Tone,
    ) -> Narrative {
        let prompt = match self.build_prompt(result, context, tone) {
            Ok(prompt) => prompt,
            Err(err) => {
                log::warn!("narration prompt serialization failed: {}", err);
                return fallback_narrative();
            }
        };
        self.generate_and_parse(&prompt)
    }

    pub fn narrate_sequence(&self, results: &[AnomalyResult], tone: Tone) -> Narrative {
        let events = match serde_json::to_string(results) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("sequence serialization failed: {}", err);
                return fallback_narrative();
            }
        };
        let prompt = format!(
            "You are an assistant that explains cricket batting anomalies.\n\
             Given the following JSON array of scored innings, ordered oldest \
             to newest, write a short title and a 2-3 sentence summary of the \
             player's recent trend for a human reader.\n\
             Tone: {}.\n\
             JSON: {}\n\
             Respond in JSON with keys: narrative_title, narrative_summary.",
            tone_instruction(tone),
            events
        );
        self.generate_and_parse(&prompt)
    }

    fn build_prompt(
        &self,
        result: &AnomalyResult,
        context: &NarrationContext,
        tone: Tone,
    ) -> serde_json::Result<String> {
        let event = PromptEvent { result, context, tone };
        let json = serde_json::to_string(&event)?;
        Ok(format!(
            "You are an assistant that explains cricket batting anomalies.\n\
             Given the following JSON of an innings and its anomaly scores, \
             write a short title and a 2-3 sentence summary for a human reader.\n\
             Tone: {}.\n\
             JSON: {}\n\
             Respond in JSON with keys: narrative_title, narrative_summary.",
            tone_instruction(tone),
            json
        ))
    }

    fn generate_and_parse(&self, prompt: &str) -> Narrative {
        let response = match self.client.generate(
            prompt,
            Some(DEFAULT_TEMPERATURE),
            Some(DEFAULT_MAX_TOKENS),
        ) {
            Ok(response) => response,
            Err(err) => {
                log::warn!("narration backend failed, using fallback: {}", err);
                return fallback_narrative();
            }
        };

        match serde_json::from_str::<Narrative>(&response) {
            Ok(narrative) => narrative,
            Err(err) => {
                log::warn!("unparsable narration response, using fallback: {}", err);
                fallback_narrative()
            }
        }
    }
}

fn tone_instruction(tone: Tone) -> &'static str {
    match tone {
        Tone::Analyst => "measured and statistical, like a performance analyst",
        Tone::Commentator => "energetic and vivid, like live commentary",
        Tone::Casual => "relaxed and conversational, like a fan chatting",
    }
}

/// Fixed generic text used whenever the backend errors or returns junk.
pub fn fallback_narrative() -> Narrative {
    Narrative {
        title: "Anomaly summary".to_string(),
        summary: "An unusual performance was detected for this innings.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BaselineSource, Bucket, MatchFormat};

    struct CannedClient(Result<String, TextGenerationError>);

    impl TextGeneration for CannedClient {
        fn generate(
            &self,
            _prompt: &str,
            _temperature: Option<f64>,
            _max_tokens: Option<u32>,
        ) -> Result<String, TextGenerationError> {
            match &self.0 {
                Ok(s) => Ok(s.clone()),
                Err(TextGenerationError::Backend(msg)) => {
                    Err(TextGenerationError::Backend(msg.clone()))
                }
                Err(TextGenerationError::Timeout) => Err(TextGenerationError::Timeout),
            }
        }
    }

    /// Captures the prompt so tests can check its structure.
    struct PromptSpy(std::sync::Arc<std::sync::Mutex<String>>);

    impl TextGeneration for PromptSpy {
        fn generate(
            &self,
            prompt: &str,
            _temperature: Option<f64>,
            _max_tokens: Option<u32>,
        ) -> Result<String, TextGenerationError> {
            *self.0.lock().unwrap() = prompt.to_string();
            Err(TextGenerationError::Timeout)
        }
    }

    fn result() -> AnomalyResult {
        AnomalyResult {
            player_id: "P1".to_string(),
            match_format: MatchFormat::T20,
            current_runs: 70.0,
            ups_score: 4.0,
            ups_bucket: Bucket::ExtremeSpike,
            ups_anomaly_flag_baseline: 1,
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
    fn test_valid_json_response_is_parsed() {
        let client = CannedClient(Ok(
            r#"{"narrative_title": "Big day", "narrative_summary": "A huge innings."}"#
                .to_string(),
        ));
        let narrator = GenerativeNarrator::new(Box::new(client));
        let narrative = narrator.narrate(&result(), &NarrationContext::default(), Tone::Analyst);

        assert_eq!(narrative.title, "Big day");
        assert_eq!(narrative.summary, "A huge innings.");
    }

    #[test]
    fn test_backend_error_degrades_to_fallback() {
        let client = CannedClient(Err(TextGenerationError::Backend("boom".to_string())));
        let narrator = GenerativeNarrator::new(Box::new(client));
        let narrative = narrator.narrate(&result(), &NarrationContext::default(), Tone::Analyst);

        assert_eq!(narrative, fallback_narrative());
    }

    #[test]
    fn test_timeout_degrades_to_fallback() {
        let client = CannedClient(Err(TextGenerationError::Timeout));
        let narrator = GenerativeNarrator::new(Box::new(client));
        let narrative =
            narrator.narrate_sequence(&[result()], Tone::Commentator);

        assert_eq!(narrative, fallback_narrative());
    }

    #[test]
    fn test_unparsable_response_degrades_to_fallback() {
        let client = CannedClient(Ok("the model rambled instead of emitting JSON".to_string()));
        let narrator = GenerativeNarrator::new(Box::new(client));
        let narrative = narrator.narrate(&result(), &NarrationContext::default(), Tone::Casual);

        assert_eq!(narrative, fallback_narrative());
    }

    #[test]
    fn test_prompt_carries_event_tone_and_shape() {
        let captured = std::sync::Arc::new(std::sync::Mutex::new(String::new()));
        let narrator = GenerativeNarrator::new(Box::new(PromptSpy(captured.clone())));
        let _ = narrator.narrate(&result(), &NarrationContext::default(), Tone::Commentator);

        let prompt = captured.lock().unwrap().clone();
        assert!(prompt.contains("\"ups_score\""));
        assert!(prompt.contains("live commentary"));
        assert!(prompt.contains("narrative_title, narrative_summary"));
    }
}
