//! # Depgrid Library
//!
//! This library provides the core functionality for comparing npm dependency
//! versions across a fleet of related projects. It is designed to be used by
//! the `depgrid` command-line tool but can also be integrated into other
//! applications that need a cross-project dependency inventory.
//!
//! ## Quick Example
//!
//! ```no_run
//! use depgrid::config::Config;
//! use depgrid::generator::ReportGenerator;
//! use std::path::PathBuf;
//!
//! let config = Config {
//!     projects_root: PathBuf::from("/srv/projects"),
//!     ..Config::default()
//! };
//!
//! let outcome = ReportGenerator::new(config).generate().unwrap();
//! println!("report written to {}", outcome.report_path.display());
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: One explicit `Config` value describes a
//!   run; no component reads ambient global state.
//! - **Discovery (`discovery`)**: Locates project directories under the
//!   projects root, following npm workspace declarations one level deep.
//! - **Manifest Extraction (`manifest`)**: Turns each `package.json` into a
//!   `ProjectRecord`, filtering locally-linked entries and resolving
//!   installed versions from `node_modules` for non-exact ranges.
//! - **Caching (`cache`)**: Persists a timestamped snapshot of the extracted
//!   records and validates it against manifest modification times.
//! - **Aggregation (`analysis`)**: Unions dependency names and detects
//!   version conflicts across projects.
//! - **Rendering (`report`)**: A pure transform from aggregated data to a
//!   self-contained HTML comparison table.
//!
//! ## Execution Flow
//!
//! The main entry point is `generator::ReportGenerator`, which executes the
//! pipeline sequentially: discovery, cache check, extraction (or cached
//! records), aggregation, rendering, and a single report write. Per-project
//! failures degrade to empty records with logged warnings; only a failure
//! to write the report itself aborts a run.

pub mod analysis;
pub mod cache;
pub mod config;
pub mod discovery;
pub mod error;
pub mod generator;
pub mod manifest;
pub mod output;
pub mod report;
pub mod version;

#[cfg(test)]
mod analysis_proptest;
