//! Request outcome statistics tracking.
//!
//! This module provides thread-safe counters for the outcomes of API requests
//! (cache hits and misses, failures by category), exposed on `/metrics`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::RequestOutcome;

/// Thread-safe request outcome tracker.
///
/// All outcomes are initialized to zero on creation, so lookups never miss.
/// Shared across handlers through `Arc`.
pub struct ServiceStats {
    outcomes: HashMap<RequestOutcome, AtomicUsize>,
}

impl ServiceStats {
    pub fn new() -> Self {
        let mut outcomes = HashMap::new();
        for outcome in RequestOutcome::iter() {
            outcomes.insert(outcome, AtomicUsize::new(0));
        }
        ServiceStats { outcomes }
    }

    /// Increment an outcome counter.
    pub fn increment(&self, outcome: RequestOutcome) {
        if let Some(counter) = self.outcomes.get(&outcome) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment counter for {:?} which is not in the map. \
                 This indicates a bug in ServiceStats initialization.",
                outcome
            );
        }
    }

    /// Get the count for an outcome.
    pub fn get_count(&self, outcome: RequestOutcome) -> usize {
        self.outcomes
            .get(&outcome)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get total failure count (unknown header kinds and unavailable data).
    pub fn total_errors(&self) -> usize {
        self.get_count(RequestOutcome::UnknownHeaderKind)
            + self.get_count(RequestOutcome::DataUnavailable)
    }
}

impl Default for ServiceStats {
    fn default() -> Self {
        Self::new()
    }
}
