//! # Join Flows
//!
//! End-to-end semi-joins across the filter crate, the engine and the service.
//!
//! ## Flows Tested:
//!
//! 1. **Engine**: key/value slices in, matched rows out
//! 2. **Filter combination**: AND of compatible and incompatible filters
//! 3. **Service**: sources listed, keys joined, values fetched for matches
//! 4. **Observers**: event order and metrics across runs

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use rand::{Rng, SeedableRng};
    use serde_json::json;
    use std::io::Write;
    use std::sync::Arc;
    use std::time::Duration;

    use sj_01_probabilistic_filter::{
        ExactSetFilter, FilterConfig, FilterError, MembershipFilter, ProbabilisticFilter,
    };
    use sj_02_semi_join::{
        probabilistic_semi_join, FanoutObserver, InMemorySource, JoinConfig, JoinConfigBuilder,
        JoinError, JoinEvent, JoinMetrics, JoinObserver, JsonFileSource, KeyValueSource,
        RecordingObserver, SemiJoinApi, SemiJoinEngine, SemiJoinService, SourceError,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn rows<V: Clone>(pairs: &[(&str, V)]) -> Vec<(String, V)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn left_rows() -> Vec<(String, i64)> {
        rows(&[("a", 1), ("b", 2), ("c", 3)])
    }

    fn right_rows() -> Vec<(String, i64)> {
        rows(&[("b", 20), ("c", 30), ("d", 40)])
    }

    /// Random alphanumeric keys, seeded for reproducibility
    fn random_keys(seed: u64, count: usize) -> Vec<String> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| {
                (0..12)
                    .map(|_| rng.sample(rand::distributions::Alphanumeric) as char)
                    .collect()
            })
            .collect()
    }

    /// Overlapping key sets: `shared` keys on both sides plus private keys
    fn overlapping(shared: usize, private: usize) -> (Vec<(String, usize)>, Vec<(String, usize)>) {
        let common = random_keys(1, shared);
        let left_only: Vec<String> = random_keys(2, private)
            .into_iter()
            .map(|k| format!("L-{}", k))
            .collect();
        let right_only: Vec<String> = random_keys(3, private)
            .into_iter()
            .map(|k| format!("R-{}", k))
            .collect();

        let left = common
            .iter()
            .chain(&left_only)
            .cloned()
            .enumerate()
            .map(|(i, k)| (k, i))
            .collect();
        let right = right_only
            .iter()
            .chain(&common)
            .cloned()
            .enumerate()
            .map(|(i, k)| (k, i))
            .collect();
        (left, right)
    }

    /// Lists keys it cannot serve and answers slowly when asked to
    struct FlakySource {
        keys: Vec<String>,
        missing: Vec<String>,
        list_delay: Duration,
        lookups: Mutex<usize>,
    }

    impl FlakySource {
        fn new(keys: &[&str]) -> Self {
            Self {
                keys: keys.iter().map(|k| k.to_string()).collect(),
                missing: Vec::new(),
                list_delay: Duration::ZERO,
                lookups: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl KeyValueSource for FlakySource {
        type Value = u32;

        fn name(&self) -> &str {
            "flaky"
        }

        async fn list_all_keys(&self) -> Result<Vec<String>, SourceError> {
            tokio::time::sleep(self.list_delay).await;
            Ok(self.keys.clone())
        }

        async fn get_value(&self, key: &str) -> Result<u32, SourceError> {
            *self.lookups.lock() += 1;
            if self.missing.iter().any(|k| k == key) {
                return Err(SourceError::KeyNotFound {
                    source_name: "flaky".to_string(),
                    key: key.to_string(),
                });
            }
            Ok(key.len() as u32)
        }
    }

    // =============================================================================
    // ENGINE FLOWS
    // =============================================================================

    #[test]
    fn test_join_on_exact_data() {
        let result = probabilistic_semi_join(&left_rows(), &right_rows(), 10, 0.01).unwrap();

        assert_eq!(result.count, 2);
        let rows: Vec<_> = result
            .matches
            .iter()
            .map(|m| (m.key.as_str(), m.left_value, m.right_value))
            .collect();
        assert_eq!(rows, vec![("b", 2, 20), ("c", 3, 30)]);
    }

    #[test]
    fn test_empty_right_input() {
        let empty: Vec<(String, i64)> = Vec::new();
        let result = probabilistic_semi_join(&left_rows(), &empty, 10, 0.01).unwrap();

        assert_eq!(result.count, 0);
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_disjoint_inputs() {
        let result =
            probabilistic_semi_join(&rows(&[("x", 1)]), &rows(&[("y", 2)]), 10, 0.01).unwrap();
        assert_eq!(result.count, 0);
    }

    #[test]
    fn test_overfull_filters_stay_exact() {
        let (left, right) = overlapping(300, 700);

        let result = probabilistic_semi_join(&left, &right, 10, 0.01).unwrap();

        assert_eq!(result.count, 300);
        assert!(result.stats.left_candidates >= 300);
        let expected: Vec<&str> = left[..300].iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(result.keys().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_well_sized_filters_prune() {
        let (left, right) = overlapping(100, 5_000);

        let result = probabilistic_semi_join(&left, &right, 5_100, 0.01).unwrap();

        assert_eq!(result.count, 100);
        // 5 000 private keys at 1% leave a few dozen false candidates at most
        assert!(result.stats.left_false_positives() < 250);
        assert!(result.stats.left_pruning_ratio() > 0.9);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let (left, right) = overlapping(2_000, 3_000);
        let base = JoinConfigBuilder::new().capacity(5_000).build().unwrap();

        let sequential = SemiJoinEngine::new(base.clone().sequential())
            .join(&left, &right)
            .unwrap();
        let parallel = SemiJoinEngine::new(JoinConfig {
            parallel_threshold: 16,
            ..base
        })
        .join(&left, &right)
        .unwrap();

        assert!(parallel.stats.parallel);
        assert!(!sequential.stats.parallel);
        assert_eq!(parallel.count, 2_000);
        assert_eq!(parallel.matches, sequential.matches);
    }

    #[test]
    fn test_bloom_and_exact_engines_agree() {
        let (left, right) = overlapping(250, 750);
        let config = JoinConfig::new(1_000, 0.05).unwrap();

        let bloom = SemiJoinEngine::new(config.clone())
            .join(&left, &right)
            .unwrap();
        let exact = SemiJoinEngine::<ExactSetFilter>::with_filter(config)
            .join(&left, &right)
            .unwrap();

        assert_eq!(bloom.matches, exact.matches);
        assert_eq!(exact.stats.left_candidates, 250);
        assert!(bloom.stats.left_candidates >= exact.stats.left_candidates);
    }

    // =============================================================================
    // FILTER COMBINATION
    // =============================================================================

    #[test]
    fn test_incompatible_filters_rejected() {
        let mut small = ProbabilisticFilter::with_capacity(100, 0.01).unwrap();
        let large = ProbabilisticFilter::with_capacity(1000, 0.01).unwrap();

        let err = small.combine_and(&large).unwrap_err();

        assert!(matches!(
            err,
            FilterError::IncompatibleFilters {
                left_bits: 959,
                right_bits: 9586,
                left_hashes: 7,
                right_hashes: 7,
            }
        ));
    }

    #[test]
    fn test_combination_keeps_common_keys() {
        let config = FilterConfig::new(100, 0.01).unwrap();
        let mut a = ProbabilisticFilter::new(config).unwrap();
        let mut b = ProbabilisticFilter::new(config).unwrap();
        a.insert_all(["x", "y", "shared-1", "shared-2"]);
        b.insert_all(["z", "shared-1", "shared-2"]);

        let both = a.intersection(&b).unwrap();

        assert!(both.may_contain("shared-1"));
        assert!(both.may_contain("shared-2"));
        assert!(both.may_contain("shared-1"), "membership answers are stable");
    }

    // =============================================================================
    // SERVICE FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_service_over_json_files() {
        let mut left = tempfile::NamedTempFile::new().unwrap();
        let mut right = tempfile::NamedTempFile::new().unwrap();
        write!(left, r#"{{"u1": {{"name": "ann"}}, "u2": {{"name": "bo"}}}}"#).unwrap();
        write!(right, r#"{{"u2": [1, 2], "u3": [3]}}"#).unwrap();

        let left = JsonFileSource::load("users", left.path()).await.unwrap();
        let right = JsonFileSource::load("orders", right.path()).await.unwrap();
        let service = SemiJoinService::new(
            Arc::new(left),
            Arc::new(right),
            JoinConfig::new(10, 0.01).unwrap(),
        );

        let result = service.run().await.unwrap();

        assert_eq!(result.count, 1);
        assert_eq!(result.matches[0].key, "u2");
        assert_eq!(result.matches[0].left_value, json!({"name": "bo"}));
        assert_eq!(result.matches[0].right_value, json!([1, 2]));
    }

    #[tokio::test]
    async fn test_service_reports_missing_value() {
        let left = Arc::new(InMemorySource::from_pairs("left", vec![("k1", 1u32), ("k2", 2)]));
        let mut right = FlakySource::new(&["k2", "k3"]);
        right.missing.push("k2".to_string());

        let service =
            SemiJoinService::new(left, Arc::new(right), JoinConfig::new(10, 0.01).unwrap());

        match service.run().await {
            Err(JoinError::Source(SourceError::KeyNotFound { source_name, key })) => {
                assert_eq!(source_name, "flaky");
                assert_eq!(key, "k2");
            }
            other => panic!("expected KeyNotFound, got {:?}", other.map(|r| r.count)),
        }
    }

    #[tokio::test]
    async fn test_service_times_out_slow_source() {
        let left = Arc::new(InMemorySource::from_pairs("left", vec![("k", 1u32)]));
        let mut right = FlakySource::new(&["k"]);
        right.list_delay = Duration::from_millis(500);

        let config = JoinConfigBuilder::new()
            .capacity(10)
            .source_timeout(Duration::from_millis(25))
            .build()
            .unwrap();
        let service = SemiJoinService::new(left, Arc::new(right), config);

        assert!(matches!(
            service.count_matches().await,
            Err(JoinError::Source(SourceError::Timeout { .. }))
        ));
    }

    #[tokio::test]
    async fn test_service_fetches_values_for_matches_only() {
        let left = Arc::new(InMemorySource::from_pairs(
            "left",
            (0..50).map(|i| (format!("k{}", i), i)),
        ));
        let right = Arc::new(FlakySource::new(&["k3", "k7", "other-1", "other-2"]));

        let service =
            SemiJoinService::new(left, right.clone(), JoinConfig::new(64, 0.01).unwrap());
        let result = service.run().await.unwrap();

        assert_eq!(result.keys().collect::<Vec<_>>(), vec!["k3", "k7"]);
        assert_eq!(*right.lookups.lock(), 2);
    }

    // =============================================================================
    // OBSERVERS
    // =============================================================================

    #[tokio::test]
    async fn test_event_sequence_and_metrics() {
        let recorder = Arc::new(RecordingObserver::new());
        let metrics = Arc::new(JoinMetrics::new());
        let observer = FanoutObserver::new(vec![
            recorder.clone() as Arc<dyn JoinObserver>,
            metrics.clone() as Arc<dyn JoinObserver>,
        ]);

        let service = SemiJoinService::new(
            Arc::new(InMemorySource::from_pairs("left", left_rows())),
            Arc::new(InMemorySource::from_pairs("right", right_rows())),
            JoinConfig::new(10, 0.01).unwrap(),
        )
        .with_observer(Arc::new(observer));

        let first = service.run().await.unwrap();
        let events = recorder.events();

        assert_eq!(
            recorder.names(),
            vec![
                "join_started",
                "filter_built",
                "filter_built",
                "candidates_pruned",
                "match_found",
                "match_found",
                "join_completed",
            ]
        );
        assert!(matches!(
            &events[4],
            JoinEvent::MatchFound { key, .. } if key == "b"
        ));
        assert!(events.iter().all(|e| e.run_id() == first.run_id));

        recorder.clear();
        let second = service.run().await.unwrap();
        assert_ne!(first.run_id, second.run_id);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.joins_started, 2);
        assert_eq!(snapshot.joins_completed, 2);
        assert_eq!(snapshot.keys_scanned, 12);
        assert_eq!(snapshot.matches, 4);
    }
}
