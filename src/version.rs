//! Version string classification for npm dependency declarations.
//!
//! npm manifests declare freeform version *ranges* (`1.2.3`, `^1.3.0`,
//! `~2.0.0`, `workspace:link:../foo`, ...). The report only needs three
//! distinctions:
//!
//! - **linked**: the range points at a local workspace symlink rather than a
//!   published version, and must be excluded from all aggregation.
//! - **exact**: the range is a plain `major.minor.patch` triple.
//! - **non-obvious**: anything else; the installed version is looked up in
//!   `node_modules` so the report can show what is actually in use.

use regex::Regex;
use std::sync::OnceLock;

/// Marker substring identifying a locally-linked dependency
/// (e.g. `link:../foo` or `workspace:link:../foo`).
const LINK_MARKER: &str = "link";

fn exact_version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("valid version pattern"))
}

/// Returns true when the declared range is a plain `major.minor.patch`
/// triple with no operators, pre-release tags, or build metadata.
pub fn is_exact(version: &str) -> bool {
    exact_version_pattern().is_match(version)
}

/// Returns true when the declared range resolves to a local workspace link
/// rather than a published package version.
pub fn is_linked(version: &str) -> bool {
    version.contains(LINK_MARKER)
}

/// Returns true when the declared range is non-empty and not an exact
/// `major.minor.patch` triple. Such ranges are candidates for installed
/// version resolution and get flagged in the rendered report.
pub fn is_non_obvious(version: &str) -> bool {
    !version.is_empty() && !is_exact(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_exact_plain_triples() {
        assert!(is_exact("1.2.3"));
        assert!(is_exact("0.0.1"));
        assert!(is_exact("10.20.30"));
    }

    #[test]
    fn test_is_exact_rejects_ranges() {
        assert!(!is_exact("^1.2.3"));
        assert!(!is_exact("~1.2.3"));
        assert!(!is_exact(">=1.2.3"));
        assert!(!is_exact("1.2"));
        assert!(!is_exact("1.2.3.4"));
        assert!(!is_exact("1.2.3-beta.1"));
        assert!(!is_exact("1.2.3+build5"));
        assert!(!is_exact("*"));
        assert!(!is_exact("latest"));
        assert!(!is_exact(""));
    }

    #[test]
    fn test_is_linked() {
        assert!(is_linked("link:../foo"));
        assert!(is_linked("workspace:link:../foo"));
        assert!(!is_linked("1.2.3"));
        assert!(!is_linked("^1.3.0"));
    }

    #[test]
    fn test_is_non_obvious() {
        assert!(is_non_obvious("^1.2.3"));
        assert!(is_non_obvious("~0.4.0"));
        assert!(is_non_obvious("latest"));
        assert!(!is_non_obvious("1.2.3"));
        // Empty strings are not flagged; there is nothing to resolve.
        assert!(!is_non_obvious(""));
    }
}
