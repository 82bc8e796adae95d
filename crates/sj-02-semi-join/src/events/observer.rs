//! Observers for join events

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::JoinEvent;

/// Receives the domain events of every join it is attached to
///
/// Implement this trait to route join events to logs, metrics systems or
/// test probes.
pub trait JoinObserver: Send + Sync {
    fn on_event(&self, event: &JoinEvent);
}

/// Drops every event
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpObserver;

impl JoinObserver for NoOpObserver {
    fn on_event(&self, _: &JoinEvent) {}
}

/// Renders events as structured `tracing` records
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl JoinObserver for TracingObserver {
    fn on_event(&self, event: &JoinEvent) {
        match event {
            JoinEvent::JoinStarted {
                run_id,
                left_keys,
                right_keys,
                capacity,
                false_positive_rate,
            } => info!(
                run_id = %run_id,
                left_keys,
                right_keys,
                capacity,
                false_positive_rate,
                "Semi-join started"
            ),
            JoinEvent::FilterBuilt {
                run_id,
                side,
                filter_kind,
                elements,
                capacity,
                size_bits,
                hash_count,
            } => {
                debug!(
                    run_id = %run_id,
                    side = %side,
                    filter_kind,
                    elements,
                    size_bits,
                    hash_count,
                    "Filter built"
                );
                if elements > capacity {
                    warn!(
                        run_id = %run_id,
                        side = %side,
                        elements,
                        capacity,
                        "Filter holds more keys than its capacity, false positive rate is degraded"
                    );
                }
            }
            JoinEvent::CandidatesPruned {
                run_id,
                left_candidates,
                right_candidates,
                estimated_intersection,
            } => debug!(
                run_id = %run_id,
                left_candidates,
                right_candidates,
                estimated_intersection,
                "Candidates pruned"
            ),
            JoinEvent::MatchFound { run_id, key } => {
                debug!(run_id = %run_id, key = %key, "Got match")
            }
            JoinEvent::JoinCompleted {
                run_id,
                matches,
                elapsed,
            } => info!(
                run_id = %run_id,
                matches,
                elapsed_us = elapsed.as_micros() as u64,
                "Semi-join completed"
            ),
        }
    }
}

/// Keeps a copy of every event
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<JoinEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far, in order
    pub fn events(&self) -> Vec<JoinEvent> {
        self.events.lock().clone()
    }

    /// Names of the events received so far, in order
    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(JoinEvent::name).collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl JoinObserver for RecordingObserver {
    fn on_event(&self, event: &JoinEvent) {
        self.events.lock().push(event.clone());
    }
}

/// Forwards every event to each inner observer
#[derive(Clone, Default)]
pub struct FanoutObserver {
    observers: Vec<Arc<dyn JoinObserver>>,
}

impl FanoutObserver {
    pub fn new(observers: Vec<Arc<dyn JoinObserver>>) -> Self {
        Self { observers }
    }

    /// Add another observer
    pub fn with(mut self, observer: Arc<dyn JoinObserver>) -> Self {
        self.observers.push(observer);
        self
    }
}

impl JoinObserver for FanoutObserver {
    fn on_event(&self, event: &JoinEvent) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }
}
