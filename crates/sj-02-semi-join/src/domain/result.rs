//! Join outputs

use serde::Serialize;
use uuid::Uuid;

/// A key verified to exist in both inputs
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KeyMatch {
    /// The common key
    pub key: String,
    /// Position of the key in the left input
    pub left_index: usize,
    /// Position of the key in the right input
    pub right_index: usize,
}

/// A matched row: the common key with the value from each side
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct JoinMatch<L, R> {
    pub key: String,
    pub left_value: L,
    pub right_value: R,
}

/// Diagnostics of one join run
#[derive(Clone, Debug, Default, Serialize)]
pub struct JoinStats {
    /// Membership filter implementation used for pruning
    pub filter_kind: &'static str,
    /// Bits per filter
    pub size_bits: usize,
    /// Hash functions per filter
    pub hash_count: usize,
    /// Keys read from the left source
    pub left_keys: usize,
    /// Keys read from the right source
    pub right_keys: usize,
    /// Left keys that survived pruning
    pub left_candidates: usize,
    /// Right keys that survived pruning
    pub right_candidates: usize,
    /// Cardinality estimate of the combined filter
    pub estimated_intersection: f64,
    /// Verified matches
    pub matches: usize,
    /// Whether the fill and verification phases ran on the rayon pool
    pub parallel: bool,
    /// Wall time of the key-level join
    pub elapsed_us: u64,
}

impl JoinStats {
    /// Left candidates that the verification step rejected
    pub fn left_false_positives(&self) -> usize {
        self.left_candidates.saturating_sub(self.matches)
    }

    /// Share of left keys removed before verification
    pub fn left_pruning_ratio(&self) -> f64 {
        if self.left_keys == 0 {
            return 0.0;
        }
        1.0 - self.left_candidates as f64 / self.left_keys as f64
    }
}

/// Key-level result, before values are attached
#[derive(Clone, Debug, Serialize)]
pub struct KeyJoin {
    /// Correlates this run with the events it emitted
    pub run_id: Uuid,
    /// Verified matches in left-input order
    pub matches: Vec<KeyMatch>,
    pub stats: JoinStats,
}

impl KeyJoin {
    /// Number of verified matches
    pub fn count(&self) -> usize {
        self.matches.len()
    }
}

/// Result of one semi-join: matched rows plus their count
#[derive(Clone, Debug, Serialize)]
pub struct JoinResult<L, R> {
    /// Correlates this run with the events it emitted
    pub run_id: Uuid,
    /// Matched rows in left-input order
    pub matches: Vec<JoinMatch<L, R>>,
    /// Number of matched rows
    pub count: usize,
    pub stats: JoinStats,
}

impl<L, R> JoinResult<L, R> {
    /// Assemble a result from matched rows
    pub fn new(run_id: Uuid, matches: Vec<JoinMatch<L, R>>, stats: JoinStats) -> Self {
        Self {
            run_id,
            count: matches.len(),
            matches,
            stats,
        }
    }

    /// Whether no key was common to both inputs
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Matched keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.matches.iter().map(|m| m.key.as_str())
    }
}
