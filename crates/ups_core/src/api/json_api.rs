//! JSON-in / JSON-out entry points.
//!
//! This is the surface the REST layer (out of scope here) binds to. Requests
//! are self-contained: they carry the player history inline, so the caller
//! owns data loading. Errors are returned as plain strings, ready to embed
//! in an HTTP error body.

use serde::Deserialize;

use crate::config::UpsConfig;
use crate::error::ScoringError;
use crate::facade::ScoringFacade;
use crate::history::InMemoryHistory;
use crate::models::{
    BaselineSource, Bucket, InningsObservation, MatchFormat, NarrationContext, Tone,
};
use crate::narrate::NarrationAdapter;
use crate::SCHEMA_VERSION;

#[derive(Debug, Deserialize)]
pub struct InningsPayload {
    pub player_id: String,
    pub match_format: MatchFormat,
    /// Required; a missing value is a validation error, never defaulted.
    pub current_runs: Option<f64>,
    /// Most-recent-first runs history for this player/format
    #[serde(default)]
    pub history: Vec<f64>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub opposition: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub venue_factor: Option<f64>,
    #[serde(default)]
    pub opposition_factor: Option<f64>,
    #[serde(default)]
    pub batting_position: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub schema_version: u8,
    #[serde(flatten)]
    pub innings: InningsPayload,
    #[serde(default)]
    pub tone: Option<String>,
    /// Attach a rule-based narrative to the result
    #[serde(default)]
    pub narrate: bool,
}

#[derive(Debug, Deserialize)]
pub struct ScoreBatchRequest {
    pub schema_version: u8,
    pub records: Vec<InningsPayload>,
}

#[derive(Debug, Deserialize)]
pub struct NarrateRequest {
    pub schema_version: u8,
    pub player_id: String,
    pub match_format: MatchFormat,
    pub current_runs: Option<f64>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub opposition: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default = "default_baseline_mean")]
    pub baseline_mean_runs: f64,
    #[serde(default = "default_baseline_std")]
    pub baseline_std_runs: f64,
    #[serde(default)]
    pub ups_score: f64,
    #[serde(default = "default_bucket")]
    pub ups_bucket: Bucket,
    #[serde(default)]
    pub ups_anomaly_flag_baseline: u8,
    #[serde(default)]
    pub tone: Option<String>,
}

fn default_baseline_mean() -> f64 {
    20.0
}

fn default_baseline_std() -> f64 {
    10.0
}

fn default_bucket() -> Bucket {
    Bucket::Normal
}

fn check_schema_version(found: u8) -> Result<(), String> {
    if found != SCHEMA_VERSION {
        return Err(ScoringError::SchemaVersionMismatch {
            found,
            expected: SCHEMA_VERSION,
        }
        .to_string());
    }
    Ok(())
}

fn parse_tone(tone: &Option<String>) -> Result<Tone, String> {
    match tone {
        None => Ok(Tone::default()),
        Some(raw) => Tone::parse(raw).ok_or_else(|| format!("Unknown tone: {}", raw)),
    }
}

fn observation_from_payload(payload: &InningsPayload) -> Result<InningsObservation, String> {
    let runs = payload
        .current_runs
        .ok_or_else(|| ScoringError::MissingField { field: "current_runs" }.to_string())?;

    Ok(InningsObservation {
        player_id: payload.player_id.clone(),
        format: payload.match_format,
        runs,
        date: None,
        team: payload.team.clone(),
        opposition: payload.opposition.clone(),
        venue: payload.venue.clone(),
        venue_factor: payload.venue_factor,
        opposition_factor: payload.opposition_factor,
        batting_position: payload.batting_position,
    })
}

fn history_from_payload(payload: &InningsPayload) -> InMemoryHistory {
    let mut history = InMemoryHistory::new();
    history.insert_runs(payload.player_id.clone(), payload.match_format, &payload.history);
    history
}

/// Score one innings described entirely by the request JSON.
pub fn score_innings_json(request_json: &str) -> Result<String, String> {
    let request: ScoreRequest =
        serde_json::from_str(request_json).map_err(|err| err.to_string())?;
    check_schema_version(request.schema_version)?;
    let tone = parse_tone(&request.tone)?;

    let observation = observation_from_payload(&request.innings)?;
    let history = history_from_payload(&request.innings);
    let mut facade = ScoringFacade::new(&history, UpsConfig::from_env_or_default());
    if request.narrate {
        facade = facade.with_narrator(NarrationAdapter::rule_based());
    }

    let result = facade.score_one_narrated(&observation, tone).map_err(|err| err.to_string())?;
    serde_json::to_string(&result).map_err(|err| err.to_string())
}

/// Score a batch of innings; the response array preserves request order.
pub fn score_batch_json(request_json: &str) -> Result<String, String> {
    let request: ScoreBatchRequest =
        serde_json::from_str(request_json).map_err(|err| err.to_string())?;
    check_schema_version(request.schema_version)?;

    let mut results = Vec::with_capacity(request.records.len());
    for payload in &request.records {
        let observation = observation_from_payload(payload)?;
        let history = history_from_payload(payload);
        let facade = ScoringFacade::new(&history, UpsConfig::from_env_or_default());
        results.push(facade.score_one(&observation).map_err(|err| err.to_string())?);
    }
    serde_json::to_string(&results).map_err(|err| err.to_string())
}

/// Narration-only endpoint for precomputed anomaly inputs.
pub fn narrate_json(request_json: &str) -> Result<String, String> {
    let request: NarrateRequest =
        serde_json::from_str(request_json).map_err(|err| err.to_string())?;
    check_schema_version(request.schema_version)?;
    let tone = parse_tone(&request.tone)?;

    let runs = request
        .current_runs
        .ok_or_else(|| ScoringError::MissingField { field: "current_runs" }.to_string())?;

    let result = crate::models::AnomalyResult {
        player_id: request.player_id.clone(),
        match_format: request.match_format,
        current_runs: runs,
        ups_score: request.ups_score,
        ups_bucket: request.ups_bucket,
        ups_anomaly_flag_baseline: request.ups_anomaly_flag_baseline,
        baseline_mean_runs: request.baseline_mean_runs,
        baseline_std_runs: request.baseline_std_runs,
        baseline_samples: 0,
        baseline_source: BaselineSource::Default,
        model_anomaly_probability: None,
        model_anomaly_label: None,
        narrative_title: None,
        narrative_summary: None,
    };
    let context = NarrationContext {
        team: request.team.clone(),
        opposition: request.opposition.clone(),
        venue: request.venue.clone(),
    };

    let adapter = NarrationAdapter::rule_based();
    let narrative = adapter.narrate(&result, &context, tone);
    serde_json::to_string(&narrative).map_err(|err| err.to_string())
}
