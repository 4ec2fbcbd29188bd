//! Property-based tests for merge precedence and non-overwrite guarantees

use proptest::prelude::*;
use scc_bootstrap::merge::merge_response;
use scc_bootstrap::model::{ConfigResponse, PropertySourceGroup, PropertyValue};
use scc_bootstrap::store::{ConfigStore, MemoryStore};
use std::collections::BTreeMap;

fn response_from(groups: Vec<BTreeMap<String, i64>>) -> ConfigResponse {
    ConfigResponse {
        name: "prop-app".to_string(),
        profiles: vec![],
        label: None,
        version: String::new(),
        state: None,
        property_sources: groups
            .into_iter()
            .enumerate()
            .map(|(i, source)| PropertySourceGroup {
                name: format!("group-{}", i),
                source: source
                    .into_iter()
                    .map(|(k, v)| (k, PropertyValue::Integer(v)))
                    .collect(),
            })
            .collect(),
    }
}

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-c]\\.[x-z]"
}

fn groups_strategy() -> impl Strategy<Value = Vec<BTreeMap<String, i64>>> {
    prop::collection::vec(prop::collection::btree_map(key_strategy(), any::<i64>(), 0..5), 0..5)
}

/// Pre-existing keys keep their value whatever the response carries
#[test]
fn test_existing_keys_never_overwritten() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(groups_strategy(), prop::collection::btree_map(key_strategy(), any::<i64>(), 0..4)),
            |(groups, existing)| {
                let store = MemoryStore::with_entries(existing.clone());
                merge_response(&response_from(groups), &store);

                for (key, value) in &existing {
                    prop_assert_eq!(store.get(key), Some(PropertyValue::Integer(*value)));
                }
                Ok(())
            },
        )
        .unwrap();
}

/// Every new key takes the value of the lowest-index group defining it
#[test]
fn test_lowest_index_group_wins() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&groups_strategy(), |groups| {
            let store = MemoryStore::new();
            merge_response(&response_from(groups.clone()), &store);

            let mut expected: BTreeMap<String, i64> = BTreeMap::new();
            for group in &groups {
                for (key, value) in group {
                    expected.entry(key.clone()).or_insert(*value);
                }
            }

            prop_assert_eq!(store.len(), expected.len());
            for (key, value) in expected {
                prop_assert_eq!(store.get(&key), Some(PropertyValue::Integer(value)));
            }
            Ok(())
        })
        .unwrap();
}

/// Merging the same response twice changes nothing the second time
#[test]
fn test_second_merge_is_noop() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&groups_strategy(), |groups| {
            let store = MemoryStore::new();
            let response = response_from(groups);
            merge_response(&response, &store);
            let first = store.snapshot();

            let report = merge_response(&response, &store);
            prop_assert!(report.is_noop());
            prop_assert_eq!(store.snapshot(), first);
            Ok(())
        })
        .unwrap();
}
