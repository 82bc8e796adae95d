//! Metrics for semi-join runs
//!
//! Aggregates join events into counters, across every run the collector is
//! attached to.
//!
//! ## Usage
//!
//! ```ignore
//! use sj_02_semi_join::{JoinMetrics, SemiJoinEngine};
//!
//! let metrics = Arc::new(JoinMetrics::new());
//! let engine = SemiJoinEngine::new(config).with_observer(metrics.clone());
//!
//! engine.join(&left, &right)?;
//! println!("{:?}", metrics.snapshot());
//! ```

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::events::{JoinEvent, JoinObserver};

/// Metrics collector for semi-join runs
///
/// Thread-safe counters, fed through [`JoinObserver`].
#[derive(Debug, Default)]
pub struct JoinMetrics {
    /// Joins that passed validation and started
    pub joins_started: AtomicU64,
    /// Joins that ran to completion
    pub joins_completed: AtomicU64,
    /// Keys read from both sides
    pub keys_scanned: AtomicU64,
    /// Left keys that survived pruning
    pub left_candidates: AtomicU64,
    /// Right keys that survived pruning
    pub right_candidates: AtomicU64,
    /// Verified matches
    pub matches: AtomicU64,
    /// Cumulative key-level join time in nanoseconds
    pub join_time_ns: AtomicU64,
}

impl JoinMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a join start
    pub fn record_started(&self, left_keys: usize, right_keys: usize) {
        self.joins_started.fetch_add(1, Ordering::Relaxed);
        self.keys_scanned
            .fetch_add((left_keys + right_keys) as u64, Ordering::Relaxed);
    }

    /// Record the outcome of the pruning phase
    pub fn record_pruned(&self, left_candidates: usize, right_candidates: usize) {
        self.left_candidates
            .fetch_add(left_candidates as u64, Ordering::Relaxed);
        self.right_candidates
            .fetch_add(right_candidates as u64, Ordering::Relaxed);
    }

    /// Record a finished join
    pub fn record_completed(&self, matches: usize, elapsed: Duration) {
        self.joins_completed.fetch_add(1, Ordering::Relaxed);
        self.matches.fetch_add(matches as u64, Ordering::Relaxed);
        self.join_time_ns
            .fetch_add(elapsed.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> JoinMetricsSnapshot {
        JoinMetricsSnapshot {
            joins_started: self.joins_started.load(Ordering::Relaxed),
            joins_completed: self.joins_completed.load(Ordering::Relaxed),
            keys_scanned: self.keys_scanned.load(Ordering::Relaxed),
            left_candidates: self.left_candidates.load(Ordering::Relaxed),
            right_candidates: self.right_candidates.load(Ordering::Relaxed),
            matches: self.matches.load(Ordering::Relaxed),
            avg_join_ns: self.avg_join_time_ns(),
            observed_false_positive_rate: self.observed_false_positive_rate(),
        }
    }

    /// Average key-level join time in nanoseconds
    pub fn avg_join_time_ns(&self) -> u64 {
        let total = self.join_time_ns.load(Ordering::Relaxed);
        let count = self.joins_completed.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Share of left candidates that verification rejected
    ///
    /// Empty joins never prune, so they do not contribute.
    pub fn observed_false_positive_rate(&self) -> f64 {
        let candidates = self.left_candidates.load(Ordering::Relaxed);
        let matches = self.matches.load(Ordering::Relaxed);
        if candidates > 0 {
            candidates.saturating_sub(matches) as f64 / candidates as f64
        } else {
            0.0
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.joins_started.store(0, Ordering::Relaxed);
        self.joins_completed.store(0, Ordering::Relaxed);
        self.keys_scanned.store(0, Ordering::Relaxed);
        self.left_candidates.store(0, Ordering::Relaxed);
        self.right_candidates.store(0, Ordering::Relaxed);
        self.matches.store(0, Ordering::Relaxed);
        self.join_time_ns.store(0, Ordering::Relaxed);
    }
}

impl JoinObserver for JoinMetrics {
    fn on_event(&self, event: &JoinEvent) {
        match event {
            JoinEvent::JoinStarted {
                left_keys,
                right_keys,
                ..
            } => self.record_started(*left_keys, *right_keys),
            JoinEvent::CandidatesPruned {
                left_candidates,
                right_candidates,
                ..
            } => self.record_pruned(*left_candidates, *right_candidates),
            JoinEvent::JoinCompleted {
                matches, elapsed, ..
            } => self.record_completed(*matches, *elapsed),
            JoinEvent::FilterBuilt { .. } | JoinEvent::MatchFound { .. } => {}
        }
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct JoinMetricsSnapshot {
    pub joins_started: u64,
    pub joins_completed: u64,
    pub keys_scanned: u64,
    pub left_candidates: u64,
    pub right_candidates: u64,
    pub matches: u64,
    pub avg_join_ns: u64,
    pub observed_false_positive_rate: f64,
}
