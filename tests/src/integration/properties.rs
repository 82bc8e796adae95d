//! # Join Properties
//!
//! Randomised checks of the semi-join against a plain set intersection.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use std::collections::{BTreeMap, HashSet};

    use sj_01_probabilistic_filter::ExactSetFilter;
    use sj_02_semi_join::{JoinConfig, SemiJoinEngine};

    /// Unique keys, each with a value derived from its position
    fn arb_rows(max: usize) -> impl Strategy<Value = Vec<(String, usize)>> {
        proptest::collection::btree_set("[a-z]{1,6}", 0..max).prop_map(|keys| {
            keys.into_iter()
                .enumerate()
                .map(|(i, k)| (k, i))
                .collect()
        })
    }

    fn arb_config() -> impl Strategy<Value = JoinConfig> {
        (1_usize..400, 1_u32..500)
            .prop_map(|(capacity, rate)| JoinConfig::new(capacity, rate as f64 / 1000.0).unwrap())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn join_equals_set_intersection(
            left in arb_rows(150),
            right in arb_rows(150),
            config in arb_config(),
        ) {
            let result = SemiJoinEngine::new(config).join(&left, &right).unwrap();

            let right_keys: HashSet<&str> = right.iter().map(|(k, _)| k.as_str()).collect();
            let expected: Vec<&str> = left
                .iter()
                .map(|(k, _)| k.as_str())
                .filter(|k| right_keys.contains(k))
                .collect();

            prop_assert_eq!(result.keys().collect::<Vec<_>>(), expected);
            prop_assert_eq!(result.count, result.matches.len());
        }

        #[test]
        fn matched_values_come_from_their_side(
            left in arb_rows(100),
            right in arb_rows(100),
        ) {
            let result = SemiJoinEngine::new(JoinConfig::new(100, 0.01).unwrap())
                .join(&left, &right)
                .unwrap();

            let left_map: BTreeMap<_, _> = left.iter().cloned().collect();
            let right_map: BTreeMap<_, _> = right.iter().cloned().collect();
            for m in &result.matches {
                prop_assert_eq!(left_map[&m.key], m.left_value);
                prop_assert_eq!(right_map[&m.key], m.right_value);
            }
        }

        #[test]
        fn parallel_equals_sequential(
            left in arb_rows(200),
            right in arb_rows(200),
            config in arb_config(),
        ) {
            let sequential = SemiJoinEngine::new(config.clone().sequential())
                .join(&left, &right)
                .unwrap();
            let parallel = SemiJoinEngine::new(JoinConfig { parallel_threshold: 0, ..config })
                .join(&left, &right)
                .unwrap();

            prop_assert_eq!(parallel.matches, sequential.matches);
        }

        #[test]
        fn bloom_equals_exact_reference(
            left in arb_rows(150),
            right in arb_rows(150),
            config in arb_config(),
        ) {
            let bloom = SemiJoinEngine::new(config.clone()).join(&left, &right).unwrap();
            let exact = SemiJoinEngine::<ExactSetFilter>::with_filter(config)
                .join(&left, &right)
                .unwrap();

            prop_assert_eq!(&bloom.matches, &exact.matches);
            prop_assert!(bloom.stats.left_candidates >= exact.stats.left_candidates);
            prop_assert!(bloom.stats.right_candidates >= exact.stats.right_candidates);
        }
    }
}
