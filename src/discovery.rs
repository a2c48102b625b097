//! # Project Discovery
//!
//! This module locates the projects that participate in a report. Given the
//! projects root it enumerates the immediate subdirectories, records every
//! directory that carries a `package.json`, and — for projects that declare
//! npm `workspaces` — additionally scans one level into the conventional
//! `packages/` subdirectory so that workspace sub-packages show up as
//! projects of their own.
//!
//! Discovery is deliberately forgiving: a missing root directory or an
//! unreadable entry logs a warning and contributes nothing, it never aborts
//! the run.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::manifest::MANIFEST_FILE;

/// Conventional directory that holds the sub-packages of an npm workspace.
const WORKSPACE_PACKAGES_DIR: &str = "packages";

/// Mapping from project name (directory name) to project directory.
pub type ProjectMap = BTreeMap<String, PathBuf>;

/// Discover all projects under `root`.
///
/// Directory entries are visited in sorted order, so the result is
/// deterministic. When two scan branches produce the same project name
/// (e.g. a workspace sub-package shadowed by a top-level directory), the
/// last one visited wins; this mirrors the behavior of the map insert and
/// is intentional only in the sense that it is documented here.
pub fn discover(root: &Path) -> ProjectMap {
    let mut projects = ProjectMap::new();
    scan_into(root, true, &mut projects);
    debug!("discovered {} project(s) under {}", projects.len(), root.display());
    projects
}

/// Scan one directory level for projects, optionally following `workspaces`
/// declarations one level deeper. The `follow_workspaces` flag caps the
/// descent so a misconfigured tree cannot recurse without bound.
fn scan_into(base: &Path, follow_workspaces: bool, projects: &mut ProjectMap) {
    if !base.is_dir() {
        warn!("projects directory not found: {}", base.display());
        return;
    }

    for entry in WalkDir::new(base)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry under {}: {}", base.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') {
            continue;
        }

        let manifest = entry.path().join(MANIFEST_FILE);
        if !manifest.is_file() {
            continue;
        }

        if follow_workspaces && declares_workspaces(&manifest) {
            scan_into(
                &entry.path().join(WORKSPACE_PACKAGES_DIR),
                false,
                projects,
            );
        }

        projects.insert(name.into_owned(), entry.path().to_path_buf());
    }
}

/// Check whether a manifest declares npm workspaces.
///
/// A textual check is sufficient here: the manifest is fully parsed later
/// during extraction, and a manifest broken enough to confuse this check
/// degrades to an empty record there anyway.
fn declares_workspaces(manifest_path: &Path) -> bool {
    fs::read_to_string(manifest_path)
        .map(|content| content.contains("\"workspaces\""))
        .unwrap_or(false)
}
