//! # ups_core - Unexpected Performance Spike scoring engine
//!
//! This library scores single cricket events (a batting innings, or one
//! delivery) against a recency-weighted baseline and explains the result.
//!
//! ## Features
//! - Recency-weighted baselines with a deterministic fallback hierarchy
//! - One-sided capped UPS score plus a symmetric two-metric ball score
//! - Fixed severity buckets with exact boundary behavior
//! - Pluggable narration (rule-based templates or a generative backend)
//! - JSON API for easy integration with a REST layer

pub mod api;
pub mod ball_rules;
pub mod baseline;
pub mod bucket;
pub mod classifier;
pub mod config;
pub mod data;
pub mod deviation;
pub mod error;
pub mod facade;
pub mod feed;
pub mod history;
pub mod models;
pub mod narrate;
pub mod store;

// Re-export the JSON entry points the REST layer binds to
pub use api::{narrate_json, score_batch_json, score_innings_json};

// Re-export the main pipeline types
pub use ball_rules::{BallScoring, ThresholdRule, ZScoreRule};
pub use baseline::BaselineEngine;
pub use bucket::classify;
pub use classifier::{ClassifierBackend, FeatureVector};
pub use config::{BallThresholds, BaselineConfig, UpsConfig, UpsScoreConfig};
pub use deviation::{combined_deviation, ups_score, z_score};
pub use error::{Result, ScoringError};
pub use facade::ScoringFacade;
pub use history::{HistoryProvider, InMemoryHistory, InningsRecord};
pub use models::{
    AnomalyResult, BallAnomaly, BallEvent, BaselineSource, BaselineStats, Bucket,
    InningsObservation, MatchFormat, NarrationContext, Narrative, Tone,
};
pub use narrate::{NarrationAdapter, TextGeneration, TextGenerationError};
pub use store::{InMemoryResultStore, ResultStore};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
