//! Core value objects for the UPS scoring pipeline.
//!
//! Everything here is created once, scored, and handed off; nothing is
//! mutated after construction. Serialized field names are a wire contract
//! consumed by the REST layer and must not change (`ups_score`, `ups_bucket`,
//! `ups_anomaly_flag_baseline`, `narrative_title`, `narrative_summary`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Match format the innings was played in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchFormat {
    #[serde(rename = "T20")]
    T20,
    #[serde(rename = "ODI")]
    Odi,
    #[serde(rename = "TEST")]
    Test,
}

impl fmt::Display for MatchFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatchFormat::T20 => write!(f, "T20"),
            MatchFormat::Odi => write!(f, "ODI"),
            MatchFormat::Test => write!(f, "TEST"),
        }
    }
}

impl MatchFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "T20" => Some(MatchFormat::T20),
            "ODI" => Some(MatchFormat::Odi),
            "TEST" => Some(MatchFormat::Test),
            _ => None,
        }
    }
}

/// One measured batting innings for a player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InningsObservation {
    pub player_id: String,
    pub format: MatchFormat,
    /// Runs scored in this innings
    pub runs: f64,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub opposition: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    /// 0-1 venue batting friendliness, defaults to 0.5 when absent
    #[serde(default)]
    pub venue_factor: Option<f64>,
    /// 0-1 opposition strength, defaults to 0.5 when absent
    #[serde(default)]
    pub opposition_factor: Option<f64>,
    #[serde(default)]
    pub batting_position: Option<u8>,
}

impl InningsObservation {
    pub fn new(player_id: impl Into<String>, format: MatchFormat, runs: f64) -> Self {
        Self {
            player_id: player_id.into(),
            format,
            runs,
            date: None,
            team: None,
            opposition: None,
            venue: None,
            venue_factor: None,
            opposition_factor: None,
            batting_position: None,
        }
    }
}

/// One delivery with its phase-level expectations attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallEvent {
    pub match_id: String,
    pub over: u32,
    pub ball: u32,
    pub runs: f64,
    pub wickets: f64,
    pub expected_runs: f64,
    pub expected_wickets: f64,
}

/// Where a baseline came from, in fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaselineSource {
    #[serde(rename = "player")]
    Player,
    #[serde(rename = "format_fallback")]
    Format,
    #[serde(rename = "global_fallback")]
    Global,
    #[serde(rename = "default")]
    Default,
}

impl BaselineSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaselineSource::Player => "player",
            BaselineSource::Format => "format_fallback",
            BaselineSource::Global => "global_fallback",
            BaselineSource::Default => "default",
        }
    }
}

/// Expected performance statistics used as the deviation reference point.
///
/// Produced fresh per scoring call; never cached across calls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineStats {
    pub mean: f64,
    /// Std-like spread; on the player path never below the configured floor.
    /// Zero only for the degenerate empty-window case, which scorers must
    /// treat as z = 0.
    pub spread: f64,
    pub samples: usize,
    pub source: BaselineSource,
}

/// Severity bucket derived from a continuous UPS score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bucket {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "mild_spike")]
    MildSpike,
    #[serde(rename = "strong_spike")]
    StrongSpike,
    #[serde(rename = "extreme_spike")]
    ExtremeSpike,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Normal => "normal",
            Bucket::MildSpike => "mild_spike",
            Bucket::StrongSpike => "strong_spike",
            Bucket::ExtremeSpike => "extreme_spike",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scored innings, produced exactly once per observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyResult {
    pub player_id: String,
    pub match_format: MatchFormat,
    pub current_runs: f64,
    pub ups_score: f64,
    pub ups_bucket: Bucket,
    /// 0/1 flag from the rule-based bucket classification
    pub ups_anomaly_flag_baseline: u8,
    pub baseline_mean_runs: f64,
    pub baseline_std_runs: f64,
    pub baseline_samples: usize,
    pub baseline_source: BaselineSource,
    /// Present only on the model-assisted path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_anomaly_probability: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_anomaly_label: Option<i64>,
    /// Narration is optional; None means not requested or degraded away
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative_summary: Option<String>,
}

/// Ball-level anomaly verdict, shared output of both ball strategies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallAnomaly {
    pub match_id: String,
    pub over: u32,
    pub ball: u32,
    pub anomaly_score: f64,
    pub is_anomaly: bool,
    pub reason: String,
    pub sport: String,
}

/// Voice used by the narration backends. Changes wording, never facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    #[serde(rename = "analyst")]
    Analyst,
    #[serde(rename = "commentator")]
    Commentator,
    #[serde(rename = "casual")]
    Casual,
}

impl Tone {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "analyst" => Some(Tone::Analyst),
            "commentator" => Some(Tone::Commentator),
            "casual" => Some(Tone::Casual),
            _ => None,
        }
    }
}

/// Contextual fields handed to the narrator alongside a result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NarrationContext {
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub opposition: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
}

/// Title + summary pair produced by a narration backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    #[serde(rename = "narrative_title")]
    pub title: String,
    #[serde(rename = "narrative_summary")]
    pub summary: String,
}
