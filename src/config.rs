//! # Configuration
//!
//! This module defines the `Config` struct that drives a report run. Every
//! entry point in the library (discovery, extraction, caching, generation)
//! receives an explicit `Config` instead of consulting ambient global state,
//! so a run is fully described by one value.
//!
//! Configuration is read from an optional `.depgrid.yaml` file; every field
//! has a default, so a missing file simply means "defaults". Command-line
//! flags are merged on top by the CLI layer.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default name of the configuration file, looked up in the current
/// directory unless an explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = ".depgrid.yaml";

/// Settings for one report run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root directory under which the candidate project directories live.
    pub projects_root: PathBuf,
    /// File name of the generated HTML report, created inside `projects_root`.
    pub output_file: String,
    /// File name of the cache snapshot, resolved relative to `projects_root`.
    pub cache_file: String,
    /// Include `devDependencies` in aggregation and rendering.
    pub include_dev_dependencies: bool,
    /// Render only dependencies that have conflicting versions.
    pub show_only_conflicts: bool,
    /// Reuse a fresh cache snapshot instead of re-reading every manifest.
    pub enable_cache: bool,
    /// Look up installed versions in `node_modules` for non-exact ranges.
    pub resolve_installed: bool,
    /// Open the generated report with the platform opener after writing it.
    pub open_report: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            projects_root: PathBuf::from("."),
            output_file: "dependency-report.html".to_string(),
            cache_file: ".depgrid-cache.json".to_string(),
            include_dev_dependencies: true,
            show_only_conflicts: false,
            enable_cache: true,
            resolve_installed: true,
            open_report: true,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigParse {
            message: format!("cannot read {}: {}", path.display(), e),
            hint: None,
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigParse {
            message: e.to_string(),
            hint: Some(
                "valid keys: projects_root, output_file, cache_file, \
                 include_dev_dependencies, show_only_conflicts, enable_cache, \
                 resolve_installed, open_report"
                    .to_string(),
            ),
        })
    }

    /// Load configuration for a run: an explicit file if given, otherwise
    /// `.depgrid.yaml` in the current directory if present, otherwise
    /// defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Absolute (well, root-relative) path of the cache snapshot file.
    pub fn cache_path(&self) -> PathBuf {
        self.projects_root.join(&self.cache_file)
    }

    /// Path of the generated report file.
    pub fn report_path(&self) -> PathBuf {
        self.projects_root.join(&self.output_file)
    }
}
