//! Result persistence contract.
//!
//! Persistence proper lives outside the core; this is the narrow interface
//! the core writes through when a store is wired in. The in-memory
//! implementation backs the CLI feed and tests.

use crate::models::AnomalyResult;

pub trait ResultStore {
    /// Append scored results in arrival order.
    fn save(&mut self, results: &[AnomalyResult]);

    /// Most recent results first, at most `limit` of them.
    fn fetch_recent(&self, limit: usize) -> Vec<AnomalyResult>;
}

#[derive(Debug, Default)]
pub struct InMemoryResultStore {
    results: Vec<AnomalyResult>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl ResultStore for InMemoryResultStore {
    fn save(&mut self, results: &[AnomalyResult]) {
        self.results.extend_from_slice(results);
    }

    fn fetch_recent(&self, limit: usize) -> Vec<AnomalyResult> {
        self.results.iter().rev().take(limit).cloned().collect()
    }
}
