//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `depgrid` application. It uses the `thiserror` library to create an
//! `Error` enum covering the anticipated failure modes, providing clear and
//! descriptive error messages.
//!
//! Most per-project problems (a missing or unparsable `package.json`, a
//! cache file that cannot be read or written) are deliberately *not*
//! represented here: they degrade to empty data and a logged warning so that
//! one broken project never aborts the whole report. The variants below are
//! reserved for failures that genuinely end a run, plus the wrapped I/O and
//! serialization errors they propagate from.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for depgrid operations
#[derive(Error, Debug)]
pub enum Error {
    /// An error occurred while parsing the `.depgrid.yaml` configuration file.
    ///
    /// This error includes the specific parsing issue and optionally a hint
    /// about how to fix it.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A project manifest could not be read or parsed.
    ///
    /// Raised by the low-level manifest reader; callers that process a batch
    /// of projects catch it and substitute an empty record.
    #[error("Manifest error for project '{project}': {message}")]
    ManifestRead { project: String, message: String },

    /// An error occurred with a cache snapshot operation.
    #[error("Cache operation error: {message}")]
    Cache { message: String },

    /// The report could not be produced or written.
    #[error("Report generation error for {path}: {message}")]
    Report { path: PathBuf, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
