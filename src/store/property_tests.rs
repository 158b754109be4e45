//! Property-Based Tests for Store Module
//!
//! Uses proptest to check the pair-keyed table invariants.

use proptest::prelude::*;
use std::collections::HashMap;

use crate::error::StoreError;
use crate::store::RateStore;

// == Test Configuration ==
const BASE_TIME: i64 = 1_700_000_000_000;

// == Strategies ==
/// Generates ISO-style currency codes
fn code_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{3}".prop_map(|s| s)
}

/// Generates valid rates across several orders of magnitude
fn valid_rate_strategy() -> impl Strategy<Value = f64> {
    (1e-6f64..1e6f64).prop_map(|r| r)
}

/// Generates rates that must be rejected
fn invalid_rate_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        (-1e6f64..0.0f64).prop_map(|r| r),
    ]
}

/// Store operations for sequence testing
#[derive(Debug, Clone)]
enum StoreOp {
    Upsert { base: String, target: String, rate: f64 },
    Sweep { age_ms: i64 },
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        4 => (code_strategy(), code_strategy(), valid_rate_strategy())
            .prop_map(|(base, target, rate)| StoreOp::Upsert { base, target, rate }),
        1 => (0i64..10_000).prop_map(|age_ms| StoreOp::Sweep { age_ms }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Round trip: the stored rate comes back exactly for the same ordered pair.
    #[test]
    fn prop_upsert_then_get_roundtrip(
        base in code_strategy(),
        target in code_strategy(),
        rate in valid_rate_strategy()
    ) {
        let mut store = RateStore::open_in_memory().unwrap();

        store.upsert(&base, &target, rate, BASE_TIME).unwrap();

        let record = store.get(&base, &target).unwrap().unwrap();
        prop_assert_eq!(record.rate, rate, "Round-trip rate mismatch");
        prop_assert_eq!(record.created_at, BASE_TIME);
    }

    // Two writes for one pair leave one record carrying the second write.
    #[test]
    fn prop_upsert_is_keyed_by_pair(
        base in code_strategy(),
        target in code_strategy(),
        rate1 in valid_rate_strategy(),
        rate2 in valid_rate_strategy()
    ) {
        let mut store = RateStore::open_in_memory().unwrap();

        store.upsert(&base, &target, rate1, BASE_TIME).unwrap();
        store.upsert(&base, &target, rate2, BASE_TIME + 1).unwrap();

        let record = store.get(&base, &target).unwrap().unwrap();
        prop_assert_eq!(record.rate, rate2, "Latest write should win");
        prop_assert_eq!(record.created_at, BASE_TIME + 1);
        prop_assert_eq!(store.len().unwrap(), 1, "Should have exactly one record");
    }

    // Invalid rates are rejected and leave the table untouched.
    #[test]
    fn prop_invalid_rate_leaves_store_unchanged(
        base in code_strategy(),
        target in code_strategy(),
        good in valid_rate_strategy(),
        bad in invalid_rate_strategy()
    ) {
        let mut store = RateStore::open_in_memory().unwrap();
        store.upsert(&base, &target, good, BASE_TIME).unwrap();

        let result = store.upsert(&base, &target, bad, BASE_TIME + 1);
        prop_assert!(matches!(result, Err(StoreError::Validation(_))));

        let record = store.get(&base, &target).unwrap().unwrap();
        prop_assert_eq!(record.rate, good);
        prop_assert_eq!(record.created_at, BASE_TIME);
    }

    // The table always mirrors a model map keyed by ordered pair.
    #[test]
    fn prop_store_matches_pair_model(ops in prop::collection::vec(store_op_strategy(), 1..60)) {
        let mut store = RateStore::open_in_memory().unwrap();
        let mut model: HashMap<(String, String), (f64, i64)> = HashMap::new();
        let mut now = BASE_TIME;

        for op in ops {
            now += 100;
            match op {
                StoreOp::Upsert { base, target, rate } => {
                    store.upsert(&base, &target, rate, now).unwrap();
                    model.insert((base, target), (rate, now));
                }
                StoreOp::Sweep { age_ms } => {
                    let cutoff = now - age_ms;
                    let expected = model.values().filter(|(_, at)| *at < cutoff).count();
                    let removed = store.delete_older_than(cutoff).unwrap();
                    prop_assert_eq!(removed, expected, "Sweep count mismatch");
                    model.retain(|_, (_, at)| *at >= cutoff);
                }
            }
        }

        prop_assert_eq!(store.len().unwrap(), model.len());
        for ((base, target), (rate, at)) in &model {
            let record = store.get(base, target).unwrap().unwrap();
            prop_assert_eq!(record.rate, *rate);
            prop_assert_eq!(record.created_at, *at);
        }
    }

    // Clear-all empties the listing regardless of prior contents.
    #[test]
    fn prop_delete_all_empties_listing(
        entries in prop::collection::vec(
            (code_strategy(), code_strategy(), valid_rate_strategy()),
            0..30
        )
    ) {
        let mut store = RateStore::open_in_memory().unwrap();
        for (base, target, rate) in entries {
            store.upsert(&base, &target, rate, BASE_TIME).unwrap();
        }

        store.delete_all().unwrap();

        prop_assert!(store.list_all().unwrap().is_empty());
    }
}
