//! Events Layer - domain events emitted by the join
//!
//! The engine reports what it did through [`JoinObserver`]; it never logs
//! on its own. Rendering (tracing, metrics, test capture) is decided by the
//! observer the caller wires in.

pub mod observer;

pub use observer::{FanoutObserver, JoinObserver, NoOpObserver, RecordingObserver, TracingObserver};

use serde::Serialize;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Which input a filter or key belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Structured events of one join run, in emission order
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum JoinEvent {
    /// Inputs are known, filters are about to be built
    JoinStarted {
        run_id: Uuid,
        left_keys: usize,
        right_keys: usize,
        capacity: usize,
        false_positive_rate: f64,
    },
    /// One side's filter holds all of that side's keys
    FilterBuilt {
        run_id: Uuid,
        side: Side,
        filter_kind: &'static str,
        elements: usize,
        capacity: usize,
        size_bits: usize,
        hash_count: usize,
    },
    /// Both key lists were reduced to probable matches
    CandidatesPruned {
        run_id: Uuid,
        left_candidates: usize,
        right_candidates: usize,
        estimated_intersection: f64,
    },
    /// Verification confirmed a common key
    MatchFound { run_id: Uuid, key: String },
    /// The key-level join finished
    JoinCompleted {
        run_id: Uuid,
        matches: usize,
        elapsed: Duration,
    },
}

impl JoinEvent {
    /// Run this event belongs to
    pub fn run_id(&self) -> Uuid {
        match self {
            JoinEvent::JoinStarted { run_id, .. }
            | JoinEvent::FilterBuilt { run_id, .. }
            | JoinEvent::CandidatesPruned { run_id, .. }
            | JoinEvent::MatchFound { run_id, .. }
            | JoinEvent::JoinCompleted { run_id, .. } => *run_id,
        }
    }

    /// Stable event name for logs and assertions
    pub fn name(&self) -> &'static str {
        match self {
            JoinEvent::JoinStarted { .. } => "join_started",
            JoinEvent::FilterBuilt { .. } => "filter_built",
            JoinEvent::CandidatesPruned { .. } => "candidates_pruned",
            JoinEvent::MatchFound { .. } => "match_found",
            JoinEvent::JoinCompleted { .. } => "join_completed",
        }
    }
}
