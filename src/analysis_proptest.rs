//! Property-based tests for dependency aggregation.
//!
//! These tests use proptest to generate random record sets and verify that
//! the aggregation invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::analysis::{collect_all, filter_conflicts, has_conflict};
    use crate::manifest::{drop_linked, ProjectRecord};
    use proptest::prelude::*;
    use std::collections::BTreeMap;
    use std::path::Path;

    /// Version ranges as they appear in real manifests, link entries included.
    fn arb_range() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("1.2.3".to_string()),
            Just("4.17.21".to_string()),
            Just("^1.3.0".to_string()),
            Just("~2.0.0".to_string()),
            Just(">=0.4.0".to_string()),
            Just("latest".to_string()),
            Just("link:../local".to_string()),
            Just("workspace:link:../foo".to_string()),
        ]
    }

    fn arb_deps() -> impl Strategy<Value = BTreeMap<String, String>> {
        prop::collection::btree_map("[a-e]{1,4}", arb_range(), 0..6)
    }

    fn arb_records() -> impl Strategy<Value = Vec<ProjectRecord>> {
        prop::collection::vec((arb_deps(), prop::option::of(arb_deps())), 0..5).prop_map(
            |entries| {
                entries
                    .into_iter()
                    .enumerate()
                    .map(|(i, (deps, dev))| {
                        let name = format!("project-{}", i);
                        let mut record = ProjectRecord::empty(&name, Path::new(&name));
                        // Aggregation operates on post-extraction records, so
                        // the link filter has already been applied.
                        record.dependencies = drop_linked(&deps);
                        record.dev_dependencies = dev.as_ref().map(drop_linked);
                        record
                    })
                    .collect()
            },
        )
    }

    proptest! {
        /// Property: collect_all output is sorted ascending with no duplicates
        #[test]
        fn collect_all_is_sorted_and_unique(records in arb_records(), include_dev in any::<bool>()) {
            let names = collect_all(&records, include_dev);
            for window in names.windows(2) {
                prop_assert!(window[0] < window[1], "{:?} not strictly sorted", names);
            }
        }

        /// Property: a linked range never survives extraction filtering, so
        /// it can never reach aggregation
        #[test]
        fn linked_ranges_never_survive(deps in arb_deps()) {
            let filtered = drop_linked(&deps);
            for range in filtered.values() {
                prop_assert!(!range.contains("link"), "linked range {} survived", range);
            }
            // Non-linked entries are all preserved
            let expected = deps.iter().filter(|(_, v)| !v.contains("link")).count();
            prop_assert_eq!(filtered.len(), expected);
        }

        /// Property: filtering with only_conflicts=true returns a subset of
        /// the input, and every surviving name really conflicts
        #[test]
        fn conflict_filter_is_a_conflicting_subset(records in arb_records(), include_dev in any::<bool>()) {
            let all = collect_all(&records, include_dev);
            let filtered = filter_conflicts(&records, all.clone(), true, include_dev);

            for name in &filtered {
                prop_assert!(all.contains(name));
                prop_assert!(has_conflict(&records, name, include_dev));
            }
            for name in &all {
                if !filtered.contains(name) {
                    prop_assert!(!has_conflict(&records, name, include_dev));
                }
            }
        }

        /// Property: filtering with only_conflicts=false is the identity
        #[test]
        fn conflict_filter_disabled_is_identity(records in arb_records(), include_dev in any::<bool>()) {
            let all = collect_all(&records, include_dev);
            let filtered = filter_conflicts(&records, all.clone(), false, include_dev);
            prop_assert_eq!(filtered, all);
        }
    }
}
