//! # Manifest Extraction
//!
//! This module turns a discovered project directory into a `ProjectRecord`:
//! the project's declared `dependencies` (and, when configured,
//! `devDependencies`) with locally-linked entries removed, plus the
//! installed versions resolved from `node_modules` for ranges that are not
//! plain `major.minor.patch` triples.
//!
//! ## Degradation
//!
//! A project whose manifest is missing or unparsable yields an *empty*
//! record and a logged warning. The caller keeps processing the remaining
//! projects; one broken manifest never fails the batch.
//!
//! ## Installed version resolution
//!
//! npm hoists installed packages, so the package actually in use may live in
//! the project's own `node_modules` or in any ancestor's up to the projects
//! root. The resolver performs a bounded iterative ascent: it checks
//! `<dir>/node_modules/<name>/package.json` starting at the project
//! directory and walks parents until the lookup succeeds or the projects
//! root has been checked without success.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::discovery::ProjectMap;
use crate::error::{Error, Result};
use crate::version;

/// File name of the npm package manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// Directory npm installs packages into.
const NODE_MODULES_DIR: &str = "node_modules";

/// The subset of `package.json` this tool cares about. Unknown fields are
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
}

/// One project's extracted dependency data. Immutable once built; lives for
/// a single report generation (or one cache snapshot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Project name (unique key; the directory name from discovery).
    pub name: String,
    /// Project directory.
    pub path: PathBuf,
    /// Declared dependency ranges, linked entries removed.
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    /// Declared devDependency ranges, linked entries removed. `None` when
    /// dev dependencies are excluded by configuration or absent from the
    /// manifest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_dependencies: Option<BTreeMap<String, String>>,
    /// Installed versions resolved from `node_modules` for non-obvious
    /// ranges. A dependency without an entry here was never resolved.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resolved_versions: BTreeMap<String, String>,
}

impl ProjectRecord {
    /// Record with no dependency data, used when a manifest is missing or
    /// unparsable.
    pub fn empty(name: &str, path: &Path) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_path_buf(),
            dependencies: BTreeMap::new(),
            dev_dependencies: None,
            resolved_versions: BTreeMap::new(),
        }
    }

    /// True when the record contributes no dependencies at all; such
    /// projects are omitted from the rendered table.
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
            && self
                .dev_dependencies
                .as_ref()
                .is_none_or(|deps| deps.is_empty())
    }

    /// Declared (production) range for a dependency, if any.
    pub fn version_of(&self, dependency: &str) -> Option<&str> {
        self.dependencies.get(dependency).map(String::as_str)
    }

    /// Declared devDependency range for a dependency, if any.
    pub fn dev_version_of(&self, dependency: &str) -> Option<&str> {
        self.dev_dependencies
            .as_ref()
            .and_then(|deps| deps.get(dependency))
            .map(String::as_str)
    }

    /// Resolved installed version for a dependency, if one was captured.
    pub fn resolved_version_of(&self, dependency: &str) -> Option<&str> {
        self.resolved_versions.get(dependency).map(String::as_str)
    }
}

/// Extract records for every discovered project, in map (name) order.
///
/// Failures are isolated per project: a project with a broken manifest
/// contributes an empty record and the batch continues.
pub fn extract_all(projects: &ProjectMap, config: &Config) -> Vec<ProjectRecord> {
    projects
        .iter()
        .map(|(name, path)| extract(name, path, config))
        .collect()
}

/// Extract a single project's record, degrading to an empty record on any
/// manifest problem.
pub fn extract(project_name: &str, project_dir: &Path, config: &Config) -> ProjectRecord {
    match load_manifest(project_name, project_dir) {
        Ok(manifest) => build_record(project_name, project_dir, manifest, config),
        Err(e) => {
            warn!("{}; continuing with an empty record", e);
            ProjectRecord::empty(project_name, project_dir)
        }
    }
}

/// Read and parse `<dir>/package.json`.
fn load_manifest(project: &str, project_dir: &Path) -> Result<PackageManifest> {
    let path = project_dir.join(MANIFEST_FILE);
    if !path.is_file() {
        return Err(Error::ManifestRead {
            project: project.to_string(),
            message: format!("{} not found in {}", MANIFEST_FILE, project_dir.display()),
        });
    }

    let content = fs::read_to_string(&path).map_err(|e| Error::ManifestRead {
        project: project.to_string(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| Error::ManifestRead {
        project: project.to_string(),
        message: format!("invalid JSON: {}", e),
    })
}

fn build_record(
    project_name: &str,
    project_dir: &Path,
    manifest: PackageManifest,
    config: &Config,
) -> ProjectRecord {
    let dependencies = drop_linked(&manifest.dependencies);
    let dev_dependencies = (config.include_dev_dependencies
        && !manifest.dev_dependencies.is_empty())
    .then(|| drop_linked(&manifest.dev_dependencies));

    let mut record = ProjectRecord {
        name: project_name.to_string(),
        path: project_dir.to_path_buf(),
        dependencies,
        dev_dependencies,
        resolved_versions: BTreeMap::new(),
    };

    if config.resolve_installed {
        record.resolved_versions = resolve_non_obvious(&record, &config.projects_root);
    }

    record
}

/// Drop every entry whose declared range contains the local-link marker.
pub fn drop_linked(ranges: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    ranges
        .iter()
        .filter(|(_, range)| !version::is_linked(range))
        .map(|(name, range)| (name.clone(), range.clone()))
        .collect()
}

/// Resolve installed versions for every non-obvious range in the record.
fn resolve_non_obvious(record: &ProjectRecord, projects_root: &Path) -> BTreeMap<String, String> {
    let mut resolved = BTreeMap::new();

    let declared = record
        .dependencies
        .iter()
        .chain(record.dev_dependencies.iter().flatten());

    for (name, range) in declared {
        if !version::is_non_obvious(range) || resolved.contains_key(name) {
            continue;
        }
        match resolve_installed_version(name, &record.path, projects_root) {
            Some(installed) => {
                resolved.insert(name.clone(), installed);
            }
            None => {
                debug!(
                    "no installed version found for {} (declared {}) in {}",
                    name, range, record.name
                );
            }
        }
    }

    resolved
}

/// Walk `node_modules` directories from `start` up to `boundary`
/// (inclusive), returning the installed version of `dependency` from the
/// first manifest found.
///
/// The ascent is iterative and bounded: a start directory outside the
/// boundary performs no lookups, and the walk stops at the boundary even
/// when nothing was found, so a misconfigured root cannot send it to the
/// filesystem root.
fn resolve_installed_version(dependency: &str, start: &Path, boundary: &Path) -> Option<String> {
    let mut dir = start;
    while dir.starts_with(boundary) {
        let nested = dir
            .join(NODE_MODULES_DIR)
            .join(dependency)
            .join(MANIFEST_FILE);
        if nested.is_file() {
            // The search stops at the first installed copy, found or not
            // readable; that is the copy the project would load.
            return installed_version(&nested);
        }
        if dir == boundary {
            break;
        }
        dir = dir.parent()?;
    }
    None
}

/// Read the `version` field of an installed package's manifest.
fn installed_version(manifest_path: &Path) -> Option<String> {
    let content = fs::read_to_string(manifest_path).ok()?;
    let manifest: PackageManifest = serde_json::from_str(&content).ok()?;
    manifest.version.filter(|v| !v.is_empty())
}
