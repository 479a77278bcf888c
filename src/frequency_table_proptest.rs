#![cfg(test)]

// Property tests for FrequencyTable kept inside the crate so they can see
// which bucket each entry is stored in.

use crate::behavior::FnBehavior;
use crate::config::TableConfig;
use crate::frequency_table::FrequencyTable;
use proptest::prelude::*;
use std::collections::HashMap;

// Weak hash on purpose: short keys collide often, so chains get long.
fn weak_hash(s: &String) -> u64 {
    s.bytes().map(u64::from).sum()
}

fn arb_ladder() -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::btree_set(1usize..64, 1..=5).prop_map(|set| set.into_iter().collect())
}

fn arb_threshold() -> impl Strategy<Value = f32> {
    prop_oneof![Just(1.0f32), Just(0.5f32), 0.05f32..1.0f32]
}

// Property: placement and counting under random insert sequences.
// Invariants exercised after every insert:
// - Each entry lives in bucket `hash(payload) % capacity`, including
//   entries that were moved by a growth step.
// - Capacity is always a ladder rung and never decreases.
// - distinct/total counters match a HashMap<String, usize> model, and the
//   returned frequency matches the model's count.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_entries_stay_in_hash_bucket(
        ladder in arb_ladder(),
        threshold in arb_threshold(),
        keys in proptest::collection::vec("[a-f]{1,3}", 1..120),
    ) {
        let behavior = FnBehavior::new(weak_hash, |a: &String, b: &String| a == b);
        let config = TableConfig::new(ladder.clone(), threshold);
        let mut table = FrequencyTable::with_behavior(behavior, config).unwrap();
        let mut model: HashMap<String, usize> = HashMap::new();
        let mut last_capacity = table.capacity();

        for key in keys {
            let freq = table.insert(key.clone()).unwrap();
            let count = model.entry(key).or_insert(0);
            *count += 1;
            prop_assert_eq!(freq, *count);

            prop_assert!(ladder.contains(&table.capacity()));
            prop_assert!(table.capacity() >= last_capacity);
            last_capacity = table.capacity();

            for (bucket, entry) in table.placed_entries() {
                prop_assert_eq!(bucket, table.expected_bucket(entry.payload()));
                prop_assert_eq!(bucket as u64, weak_hash(entry.payload()) % table.capacity() as u64);
            }
            prop_assert_eq!(table.distinct_keys(), model.len());
            prop_assert_eq!(table.total_occurrences(), model.values().sum::<usize>());
        }

        if threshold == 1.0 {
            prop_assert_eq!(table.capacity(), ladder[0]);
        }
    }
}
