//! # Dependency Aggregation
//!
//! Pure functions that combine the extracted `ProjectRecord`s into the data
//! the report renders: the union of dependency names across all projects,
//! and per-name conflict detection (more than one distinct declared version
//! string). Conflict status is always derived on demand, never stored.
//!
//! Linked dependencies are filtered out during extraction, so by the time
//! records reach this module every declared range is a real external
//! version.

use std::collections::BTreeSet;

use crate::manifest::ProjectRecord;

/// Union of dependency names across all records, lexicographically sorted
/// and deduplicated. devDependencies participate when `include_dev` is set.
pub fn collect_all(records: &[ProjectRecord], include_dev: bool) -> Vec<String> {
    let mut names = BTreeSet::new();

    for record in records {
        names.extend(record.dependencies.keys().cloned());
        if include_dev {
            if let Some(dev) = &record.dev_dependencies {
                names.extend(dev.keys().cloned());
            }
        }
    }

    names.into_iter().collect()
}

/// True iff more than one distinct version string is declared for
/// `dependency` across the records (dependencies plus, when `include_dev`,
/// devDependencies).
pub fn has_conflict(records: &[ProjectRecord], dependency: &str, include_dev: bool) -> bool {
    let mut versions = BTreeSet::new();

    for record in records {
        if let Some(range) = record.version_of(dependency) {
            versions.insert(range);
        }
        if include_dev {
            if let Some(range) = record.dev_version_of(dependency) {
                versions.insert(range);
            }
        }
    }

    versions.len() > 1
}

/// Keep only conflicting names when `only_conflicts` is set; otherwise the
/// input is returned unchanged.
pub fn filter_conflicts(
    records: &[ProjectRecord],
    names: Vec<String>,
    only_conflicts: bool,
    include_dev: bool,
) -> Vec<String> {
    if !only_conflicts {
        return names;
    }

    names
        .into_iter()
        .filter(|name| has_conflict(records, name, include_dev))
        .collect()
}
