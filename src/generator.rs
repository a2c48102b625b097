//! # Report Generation Pipeline
//!
//! The orchestrator that executes one report run end to end:
//!
//! 1. **Discovery**: build the project map from the projects root.
//! 2. **Cache check**: serve the previous snapshot when it is still fresh,
//!    otherwise extract every project's manifest and replace the snapshot.
//! 3. **Aggregation**: union the dependency names and apply the
//!    only-conflicts filter.
//! 4. **Rendering**: produce the HTML document.
//! 5. **Write**: a single `fs::write` of the report into the projects root.
//!
//! The pipeline is sequential and single-threaded, project by project.
//! Per-project failures degrade (empty records, logged warnings) and never
//! abort the batch; only a failure to write the report itself propagates,
//! to be surfaced once at the CLI boundary.

use std::fs;
use std::path::PathBuf;

use log::{debug, info};

use crate::analysis;
use crate::cache::ReportCache;
use crate::config::Config;
use crate::discovery;
use crate::error::{Error, Result};
use crate::manifest;
use crate::report;

/// Summary of a finished report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    /// Where the report was written.
    pub report_path: PathBuf,
    /// Projects that contributed at least one dependency to the table.
    pub project_count: usize,
    /// Dependency rows rendered (after the only-conflicts filter).
    pub dependency_count: usize,
    /// How many of the rendered dependencies have conflicting versions.
    pub conflict_count: usize,
    /// Whether the records were served from the cache snapshot.
    pub served_from_cache: bool,
}

/// One-shot report generator; construct with a `Config` and call
/// [`ReportGenerator::generate`].
#[derive(Debug)]
pub struct ReportGenerator {
    config: Config,
}

impl ReportGenerator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full pipeline and write the report.
    pub fn generate(&self) -> Result<ReportOutcome> {
        let config = &self.config;

        let projects = discovery::discover(&config.projects_root);
        let mut cache = ReportCache::open(config);

        let (records, served_from_cache) = if cache.is_valid(&projects) {
            info!("serving dependency data from cache snapshot");
            (cache.records(), true)
        } else {
            debug!("extracting manifests for {} project(s)", projects.len());
            let records = manifest::extract_all(&projects, config);
            cache.update(&records, &projects);
            (records, false)
        };

        let include_dev = config.include_dev_dependencies;
        let all_names = analysis::collect_all(&records, include_dev);
        let names = analysis::filter_conflicts(
            &records,
            all_names,
            config.show_only_conflicts,
            include_dev,
        );
        let conflict_count = names
            .iter()
            .filter(|name| analysis::has_conflict(&records, name, include_dev))
            .count();

        let html = report::render(&records, &names, include_dev, |name| {
            analysis::has_conflict(&records, name, include_dev)
        });

        let report_path = config.report_path();
        // One write call: a failure leaves no half-written report behind.
        fs::write(&report_path, html).map_err(|e| Error::Report {
            path: report_path.clone(),
            message: e.to_string(),
        })?;

        Ok(ReportOutcome {
            report_path,
            project_count: records.iter().filter(|r| !r.is_empty()).count(),
            dependency_count: names.len(),
            conflict_count,
            served_from_cache,
        })
    }
}
