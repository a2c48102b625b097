//! Shared test utilities for E2E tests.
//!
//! Provides a fixture that builds a temporary projects root populated with
//! package manifests, plus a prelude re-exporting the commonly used test
//! dependencies.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = ProjectsFixture::new()
//!         .with_project("admin-ui", r#"{"dependencies": {"react": "17.0.2"}}"#);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::PathBuf;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    pub use super::ProjectsFixture;
}

/// A temporary projects root populated with package manifests.
pub struct ProjectsFixture {
    pub root: assert_fs::TempDir,
}

#[allow(dead_code)]
impl ProjectsFixture {
    pub fn new() -> Self {
        Self {
            root: assert_fs::TempDir::new().unwrap(),
        }
    }

    /// Add a project directory containing the given `package.json` content.
    pub fn with_project(self, name: &str, manifest: &str) -> Self {
        self.root
            .child(format!("{}/package.json", name))
            .write_str(manifest)
            .unwrap();
        self
    }

    /// Add an installed package under a project's `node_modules`.
    pub fn with_installed(self, project: &str, package: &str, version: &str) -> Self {
        self.root
            .child(format!("{}/node_modules/{}/package.json", project, package))
            .write_str(&format!(
                r#"{{"name": "{}", "version": "{}"}}"#,
                package, version
            ))
            .unwrap();
        self
    }

    /// Path of the generated report with the default output file name.
    pub fn report_path(&self) -> PathBuf {
        self.root.path().join("dependency-report.html")
    }

    /// Path of the cache snapshot with the default cache file name.
    pub fn cache_path(&self) -> PathBuf {
        self.root.path().join(".depgrid-cache.json")
    }
}
