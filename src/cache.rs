//! # Report Cache
//!
//! Optional acceleration layer for report generation. A run persists one
//! JSON snapshot file containing a timestamp and, per project, the
//! manifest's modification time alongside the extracted `ProjectRecord`.
//! A later run may reuse the snapshot wholesale instead of re-reading every
//! manifest, provided it is still fresh.
//!
//! A snapshot is considered valid only when caching is enabled, the
//! snapshot is younger than [`MAX_SNAPSHOT_AGE`], and no currently-known
//! project's manifest has been modified since it was recorded. The check
//! iterates the *cached* entries: projects that disappeared since the
//! snapshot are skipped, and projects added since the snapshot are not
//! noticed until the age threshold expires (replicated from the original
//! behavior; see DESIGN.md).
//!
//! Cache failures are never fatal. A snapshot that cannot be read is
//! treated as absent, and a snapshot that cannot be written is logged and
//! dropped — the run simply proceeds uncached.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::discovery::ProjectMap;
use crate::error::{Error, Result};
use crate::manifest::{ProjectRecord, MANIFEST_FILE};

/// A snapshot older than this is always considered stale.
pub const MAX_SNAPSHOT_AGE: Duration = Duration::from_secs(60 * 60);

/// One cached project: the manifest's modification time at snapshot time
/// plus the extracted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Manifest modification time, milliseconds since the Unix epoch.
    pub last_modified: u64,
    pub data: ProjectRecord,
}

/// The persisted cache payload. A new snapshot replaces the previous one
/// wholesale; entries are never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    /// Snapshot creation time, milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub projects: BTreeMap<String, SnapshotEntry>,
}

/// Handle to the on-disk cache file.
#[derive(Debug)]
pub struct ReportCache {
    enabled: bool,
    path: PathBuf,
    snapshot: Option<CacheSnapshot>,
}

impl ReportCache {
    /// Open the cache described by the configuration, loading any existing
    /// snapshot. An unreadable or unparsable snapshot is treated as absent.
    pub fn open(config: &Config) -> Self {
        let path = config.cache_path();
        let snapshot = if config.enable_cache {
            load_snapshot(&path)
        } else {
            None
        };

        Self {
            enabled: config.enable_cache,
            path,
            snapshot,
        }
    }

    /// Location of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The loaded snapshot, if any.
    pub fn snapshot(&self) -> Option<&CacheSnapshot> {
        self.snapshot.as_ref()
    }

    /// Whether the loaded snapshot may be served for the given project map.
    pub fn is_valid(&self, projects: &ProjectMap) -> bool {
        if !self.enabled {
            return false;
        }
        let Some(snapshot) = self.snapshot.as_ref() else {
            return false;
        };

        let age = now_millis().saturating_sub(snapshot.timestamp);
        if age > MAX_SNAPSHOT_AGE.as_millis() as u64 {
            debug!("cache snapshot expired ({} ms old)", age);
            return false;
        }

        for (name, entry) in &snapshot.projects {
            // Cached projects that no longer exist are ignored rather than
            // invalidating the snapshot.
            let Some(project_dir) = projects.get(name) else {
                continue;
            };
            let Some(mtime) = manifest_mtime_millis(project_dir) else {
                continue;
            };
            if mtime > entry.last_modified {
                debug!("cache invalidated by modified manifest in {}", name);
                return false;
            }
        }

        true
    }

    /// The cached records, verbatim and in project-name order. Empty when
    /// no snapshot is loaded.
    pub fn records(&self) -> Vec<ProjectRecord> {
        self.snapshot
            .as_ref()
            .map(|snapshot| {
                snapshot
                    .projects
                    .values()
                    .map(|entry| entry.data.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Replace the snapshot with fresh records and persist it synchronously.
    ///
    /// Records whose manifest cannot be stat-ed get no entry. A persistence
    /// failure is logged and leaves the run uncached; it never propagates.
    pub fn update(&mut self, records: &[ProjectRecord], projects: &ProjectMap) {
        if !self.enabled {
            return;
        }

        let mut snapshot = CacheSnapshot {
            timestamp: now_millis(),
            projects: BTreeMap::new(),
        };

        for record in records {
            let Some(project_dir) = projects.get(&record.name) else {
                continue;
            };
            if let Some(last_modified) = manifest_mtime_millis(project_dir) {
                snapshot.projects.insert(
                    record.name.clone(),
                    SnapshotEntry {
                        last_modified,
                        data: record.clone(),
                    },
                );
            }
        }

        self.snapshot = Some(snapshot);

        if let Err(e) = self.persist() {
            warn!("failed to persist cache snapshot: {}", e);
        }
    }

    /// Delete the snapshot file, if present.
    pub fn clear(&mut self) -> Result<()> {
        self.snapshot = None;
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| Error::Cache {
                message: format!("cannot delete {}: {}", self.path.display(), e),
            })?;
        }
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        let Some(snapshot) = self.snapshot.as_ref() else {
            return Ok(());
        };
        let content = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, content).map_err(|e| Error::Cache {
            message: format!("cannot write {}: {}", self.path.display(), e),
        })
    }
}

fn load_snapshot(path: &Path) -> Option<CacheSnapshot> {
    if !path.is_file() {
        return None;
    }
    match fs::read_to_string(path).map_err(Error::from).and_then(|content| {
        serde_json::from_str::<CacheSnapshot>(&content).map_err(Error::from)
    }) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!("ignoring unreadable cache snapshot {}: {}", path.display(), e);
            None
        }
    }
}

/// Current time in milliseconds since the Unix epoch.
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Modification time of `<project_dir>/package.json` in milliseconds, if
/// the manifest exists.
fn manifest_mtime_millis(project_dir: &Path) -> Option<u64> {
    let metadata = fs::metadata(project_dir.join(MANIFEST_FILE)).ok()?;
    let mtime = metadata.modified().ok()?;
    mtime
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_millis() as u64)
}
