//! Processing statistics tracking.
//!
//! Counts per-item failures by `FailureType` over the course of a run.

use std::collections::HashMap;
use strum::IntoEnumIterator;

use super::types::FailureType;

/// Per-run failure counters.
///
/// Every `FailureType` is initialized to zero on creation. The pipeline is
/// sequential, so plain counters behind `&mut self` are enough.
#[derive(Debug, Clone)]
pub struct ProcessingStats {
    failures: HashMap<FailureType, usize>,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStats {
    pub fn new() -> Self {
        let failures = FailureType::iter().map(|f| (f, 0)).collect();
        ProcessingStats { failures }
    }

    /// Increment a failure counter.
    pub fn increment(&mut self, failure: FailureType) {
        *self.failures.entry(failure).or_insert(0) += 1;
    }

    /// Get the count for a failure type.
    pub fn get_count(&self, failure: FailureType) -> usize {
        self.failures.get(&failure).copied().unwrap_or(0)
    }

    /// Get total failure count across all failure types.
    pub fn total_failures(&self) -> usize {
        FailureType::iter().map(|f| self.get_count(f)).sum()
    }
}
