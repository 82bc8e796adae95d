//! Semi-Join Service
//!
//! Runs the engine against two key-value sources: list both key sets
//! concurrently, join the keys, then fetch values for the matches only.
//! At most `fetch_concurrency` matched keys are in flight at once, so a
//! large overlap never floods the sources with lookups.

use async_trait::async_trait;
use futures::future::try_join;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use sj_01_probabilistic_filter::{MembershipFilter, ProbabilisticFilter};

use crate::domain::{JoinConfig, JoinMatch, JoinResult, KeyJoin, SemiJoinEngine};
use crate::error::{JoinError, SourceError};
use crate::events::JoinObserver;
use crate::ports::{KeyValueSource, SemiJoinApi};

/// Semi-join service implementation
///
/// Implements the `SemiJoinApi` port over two injected sources.
pub struct SemiJoinService<L, R, F = ProbabilisticFilter>
where
    L: KeyValueSource,
    R: KeyValueSource,
    F: MembershipFilter,
{
    /// Left source (driven port)
    left: Arc<L>,
    /// Right source (driven port)
    right: Arc<R>,
    engine: SemiJoinEngine<F>,
}

impl<L: KeyValueSource, R: KeyValueSource> SemiJoinService<L, R, ProbabilisticFilter> {
    /// Create a service pruning with Bloom filters
    pub fn new(left: Arc<L>, right: Arc<R>, config: JoinConfig) -> Self {
        Self::with_filter(left, right, config)
    }
}

impl<L, R, F> SemiJoinService<L, R, F>
where
    L: KeyValueSource,
    R: KeyValueSource,
    F: MembershipFilter,
{
    /// Create a service pruning with the membership filter `F`
    pub fn with_filter(left: Arc<L>, right: Arc<R>, config: JoinConfig) -> Self {
        Self {
            left,
            right,
            engine: SemiJoinEngine::with_filter(config),
        }
    }

    /// Send join events to `observer`
    pub fn with_observer(mut self, observer: Arc<dyn JoinObserver>) -> Self {
        self.engine = self.engine.with_observer(observer);
        self
    }

    pub fn config(&self) -> &JoinConfig {
        self.engine.config()
    }

    fn source_timeout(&self) -> Duration {
        self.engine.config().source_timeout
    }

    /// List both sources and join their keys
    async fn join_source_keys(&self) -> Result<KeyJoin, JoinError> {
        self.engine.config().validate()?;

        let timeout = self.source_timeout();
        let (left_keys, right_keys) = try_join(
            bounded(self.left.name(), timeout, self.left.list_all_keys()),
            bounded(self.right.name(), timeout, self.right.list_all_keys()),
        )
        .await?;

        debug!(
            left = self.left.name(),
            right = self.right.name(),
            left_keys = left_keys.len(),
            right_keys = right_keys.len(),
            "Listed source keys"
        );

        Ok(self.engine.join_keys(&left_keys, &right_keys)?)
    }

    /// Fetch both values of one matched key
    async fn fetch_match(&self, key: String) -> Result<JoinMatch<L::Value, R::Value>, SourceError> {
        let timeout = self.source_timeout();
        let (left_value, right_value) = try_join(
            bounded(self.left.name(), timeout, self.left.get_value(&key)),
            bounded(self.right.name(), timeout, self.right.get_value(&key)),
        )
        .await?;

        Ok(JoinMatch {
            key,
            left_value,
            right_value,
        })
    }
}

/// Bound a source call by `timeout`
async fn bounded<T, Fut>(source_name: &str, timeout: Duration, call: Fut) -> Result<T, SourceError>
where
    Fut: Future<Output = Result<T, SourceError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(SourceError::Timeout {
            source_name: source_name.to_string(),
        }),
    }
}

#[async_trait]
impl<L, R, F> SemiJoinApi for SemiJoinService<L, R, F>
where
    L: KeyValueSource + 'static,
    R: KeyValueSource + 'static,
    F: MembershipFilter + 'static,
{
    type LeftValue = L::Value;
    type RightValue = R::Value;

    async fn run(&self) -> Result<JoinResult<L::Value, R::Value>, JoinError> {
        let key_join = self.join_source_keys().await?;
        let limit = self.engine.config().fetch_limit();

        // buffered keeps the left order of the key join
        let matches: Vec<_> = stream::iter(key_join.matches)
            .map(|m| self.fetch_match(m.key))
            .buffered(limit)
            .try_collect()
            .await?;

        for m in &matches {
            debug!(
                run_id = %key_join.run_id,
                key = %m.key,
                left_value = ?m.left_value,
                right_value = ?m.right_value,
                "Got match"
            );
        }
        debug!(
            run_id = %key_join.run_id,
            matches = matches.len(),
            fetch_limit = limit,
            "Fetched matched values"
        );

        Ok(JoinResult::new(key_join.run_id, matches, key_join.stats))
    }

    async fn count_matches(&self) -> Result<usize, JoinError> {
        Ok(self.join_source_keys().await?.count())
    }
}
