//! Probabilistic semi-join engine
//!
//! ## Algorithm: Filter-then-Verify
//!
//! 1. Build: one filter per side, same configuration
//! 2. Fill: insert every left key into the left filter, every right key into
//!    the right filter
//! 3. Combine: copy the left filter and AND the right filter into the copy
//! 4. Prune: keep only keys the combined filter may contain, on both sides
//! 5. Verify: for each surviving left key, scan the surviving right keys for
//!    an exact match and stop at the first one
//!
//! Pruning never drops a true match, so the output is exact. False positives
//! only cost verification work. Keys must be unique within each side; with
//! duplicates only the first right match of each left key is reported.
//!
//! Steps 2 and 5 run on the rayon pool once both inputs reach
//! `JoinConfig::parallel_threshold`. Output order always follows the left
//! input.

use rayon::prelude::*;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use sj_01_probabilistic_filter::{FilterConfig, FilterError, MembershipFilter, ProbabilisticFilter};

use super::config::JoinConfig;
use super::result::{JoinMatch, JoinResult, JoinStats, KeyJoin, KeyMatch};
use crate::events::{JoinEvent, JoinObserver, NoOpObserver, Side};

/// Semi-join engine, generic over the membership filter used for pruning
///
/// The engine holds no state between calls: every join builds, uses and
/// drops its own filters.
pub struct SemiJoinEngine<F: MembershipFilter = ProbabilisticFilter> {
    config: JoinConfig,
    observer: Arc<dyn JoinObserver>,
    _filter: PhantomData<fn() -> F>,
}

impl SemiJoinEngine<ProbabilisticFilter> {
    /// Engine pruning with Bloom filters
    pub fn new(config: JoinConfig) -> Self {
        Self::with_filter(config)
    }
}

impl<F: MembershipFilter> SemiJoinEngine<F> {
    /// Engine pruning with the membership filter `F`
    pub fn with_filter(config: JoinConfig) -> Self {
        Self {
            config,
            observer: Arc::new(NoOpObserver),
            _filter: PhantomData,
        }
    }

    /// Send join events to `observer`
    pub fn with_observer(mut self, observer: Arc<dyn JoinObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &JoinConfig {
        &self.config
    }

    /// Join two `(key, value)` sequences
    ///
    /// Returns one `(key, left value, right value)` row per key present on
    /// both sides. An empty side yields an empty result.
    pub fn join<L, R>(
        &self,
        left: &[(String, L)],
        right: &[(String, R)],
    ) -> Result<JoinResult<L, R>, FilterError>
    where
        L: Clone + Sync,
        R: Clone + Sync,
    {
        let left_keys: Vec<&str> = left.iter().map(|(key, _)| key.as_str()).collect();
        let right_keys: Vec<&str> = right.iter().map(|(key, _)| key.as_str()).collect();

        let key_join = self.join_keys(&left_keys, &right_keys)?;

        let matches = key_join
            .matches
            .into_iter()
            .map(|m| JoinMatch {
                left_value: left[m.left_index].1.clone(),
                right_value: right[m.right_index].1.clone(),
                key: m.key,
            })
            .collect();

        Ok(JoinResult::new(key_join.run_id, matches, key_join.stats))
    }

    /// Join two key lists, reporting positions of the common keys
    pub fn join_keys<A, B>(&self, left: &[A], right: &[B]) -> Result<KeyJoin, FilterError>
    where
        A: AsRef<str> + Sync,
        B: AsRef<str> + Sync,
    {
        let started = Instant::now();
        let run_id = Uuid::new_v4();
        let filter_config = self.config.filter;
        let params = filter_config.params()?;

        self.emit(JoinEvent::JoinStarted {
            run_id,
            left_keys: left.len(),
            right_keys: right.len(),
            capacity: filter_config.capacity,
            false_positive_rate: filter_config.false_positive_rate,
        });

        let mut stats = JoinStats {
            filter_kind: F::KIND,
            size_bits: params.size_bits,
            hash_count: params.hash_count,
            left_keys: left.len(),
            right_keys: right.len(),
            ..Default::default()
        };

        if left.is_empty() || right.is_empty() {
            return Ok(self.finish(run_id, Vec::new(), stats, started));
        }

        let parallel = self.config.is_parallel_for(left.len(), right.len());
        stats.parallel = parallel;

        // Fill
        let (filter_left, filter_right) = if parallel {
            rayon::join(
                || build_filter::<F, A>(&filter_config, left),
                || build_filter::<F, B>(&filter_config, right),
            )
        } else {
            (
                build_filter::<F, A>(&filter_config, left),
                build_filter::<F, B>(&filter_config, right),
            )
        };
        let (filter_left, filter_right) = (filter_left?, filter_right?);

        for (side, elements) in [(Side::Left, left.len()), (Side::Right, right.len())] {
            self.emit(JoinEvent::FilterBuilt {
                run_id,
                side,
                filter_kind: F::KIND,
                elements,
                capacity: filter_config.capacity,
                size_bits: params.size_bits,
                hash_count: params.hash_count,
            });
        }

        // Combine
        let combined = filter_left.intersection(&filter_right)?;
        stats.estimated_intersection = combined.estimated_len();

        // Prune
        let left_candidates = prune(&combined, left);
        let right_candidates = prune(&combined, right);
        stats.left_candidates = left_candidates.len();
        stats.right_candidates = right_candidates.len();

        self.emit(JoinEvent::CandidatesPruned {
            run_id,
            left_candidates: stats.left_candidates,
            right_candidates: stats.right_candidates,
            estimated_intersection: stats.estimated_intersection,
        });

        // Verify
        let verify = |&left_index: &usize| -> Option<KeyMatch> {
            let key = left[left_index].as_ref();
            right_candidates
                .iter()
                .find(|&&right_index| right[right_index].as_ref() == key)
                .map(|&right_index| KeyMatch {
                    key: key.to_owned(),
                    left_index,
                    right_index,
                })
        };
        let matches: Vec<KeyMatch> = if parallel {
            left_candidates.par_iter().filter_map(verify).collect()
        } else {
            left_candidates.iter().filter_map(verify).collect()
        };

        for m in &matches {
            self.emit(JoinEvent::MatchFound {
                run_id,
                key: m.key.clone(),
            });
        }

        Ok(self.finish(run_id, matches, stats, started))
    }

    fn finish(
        &self,
        run_id: Uuid,
        matches: Vec<KeyMatch>,
        mut stats: JoinStats,
        started: Instant,
    ) -> KeyJoin {
        let elapsed = started.elapsed();
        stats.matches = matches.len();
        stats.elapsed_us = elapsed.as_micros() as u64;

        self.emit(JoinEvent::JoinCompleted {
            run_id,
            matches: matches.len(),
            elapsed,
        });

        KeyJoin {
            run_id,
            matches,
            stats,
        }
    }

    fn emit(&self, event: JoinEvent) {
        self.observer.on_event(&event);
    }
}

fn build_filter<F, K>(config: &FilterConfig, keys: &[K]) -> Result<F, FilterError>
where
    F: MembershipFilter,
    K: AsRef<str>,
{
    let mut filter = F::from_config(config)?;
    filter.insert_all(keys.iter().map(AsRef::as_ref));
    Ok(filter)
}

fn prune<F, K>(combined: &F, keys: &[K]) -> Vec<usize>
where
    F: MembershipFilter,
    K: AsRef<str>,
{
    keys.iter()
        .enumerate()
        .filter(|(_, key)| combined.may_contain(key.as_ref()))
        .map(|(index, _)| index)
        .collect()
}

/// Bloom-filter semi-join of two `(key, value)` sequences
///
/// Convenience wrapper over [`SemiJoinEngine`] with default tuning and no
/// observer.
pub fn probabilistic_semi_join<L, R>(
    left: &[(String, L)],
    right: &[(String, R)],
    capacity: usize,
    false_positive_rate: f64,
) -> Result<JoinResult<L, R>, FilterError>
where
    L: Clone + Sync,
    R: Clone + Sync,
{
    let config = JoinConfig::new(capacity, false_positive_rate)?;
    SemiJoinEngine::new(config).join(left, right)
}
