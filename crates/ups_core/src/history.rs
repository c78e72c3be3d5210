//! History access for baseline computation.
//!
//! The engine never owns historical data. It borrows a [`HistoryProvider`]
//! and treats an empty answer as "no data", which is resolved by the
//! baseline fallback chain rather than by an error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::MatchFormat;

/// One historical innings as stored by the data layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InningsRecord {
    pub runs: f64,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl InningsRecord {
    pub fn new(runs: f64) -> Self {
        Self { runs, date: None }
    }
}

/// Read-only access to recent innings, most-recent-first.
///
/// Implementations must return an empty vector for unknown players and never
/// fail; "no data" is not an error anywhere in the scoring pipeline.
/// `Sync` because parallel batch scoring shares the provider across threads.
pub trait HistoryProvider: Sync {
    fn recent_innings(&self, player_id: &str, format: MatchFormat) -> Vec<InningsRecord>;
}

/// In-memory provider keyed by (player, format), used by tests and the CLI.
#[derive(Debug, Default, Clone)]
pub struct InMemoryHistory {
    innings: HashMap<(String, MatchFormat), Vec<InningsRecord>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a full history, most-recent-first.
    pub fn insert(
        &mut self,
        player_id: impl Into<String>,
        format: MatchFormat,
        records: Vec<InningsRecord>,
    ) {
        self.innings.insert((player_id.into(), format), records);
    }

    /// Convenience for runs-only histories, most-recent-first.
    pub fn insert_runs(
        &mut self,
        player_id: impl Into<String>,
        format: MatchFormat,
        runs: &[f64],
    ) {
        let records = runs.iter().map(|&r| InningsRecord::new(r)).collect();
        self.insert(player_id, format, records);
    }
}

impl HistoryProvider for InMemoryHistory {
    fn recent_innings(&self, player_id: &str, format: MatchFormat) -> Vec<InningsRecord> {
        self.innings
            .get(&(player_id.to_string(), format))
            .cloned()
            .unwrap_or_default()
    }
}
