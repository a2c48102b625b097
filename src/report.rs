//! # HTML Report Rendering
//!
//! A pure string transform from aggregated dependency data to a
//! self-contained HTML document: one sticky header row listing the project
//! names, one row per dependency linking to its npmjs.com page, and one
//! cell per project showing the declared range (production and dev ranges
//! joined with a comma when both exist) plus the resolved installed version
//! in parentheses when one was captured.
//!
//! Rows alternate a zebra background. A row whose dependency has
//! conflicting versions, and any cell whose displayed value is not an exact
//! `major.minor.patch` triple, get the highlight style. Projects that
//! contribute no dependencies at all are omitted from the table.
//!
//! The renderer performs no filesystem or network access.

use crate::manifest::ProjectRecord;
use crate::version;

/// Render the full HTML document.
///
/// `has_conflict` is the conflict predicate derived from the same record
/// set (see `analysis::has_conflict`); it is passed in so the renderer
/// stays a pure function of its inputs.
pub fn render<F>(
    records: &[ProjectRecord],
    dependencies: &[String],
    include_dev: bool,
    has_conflict: F,
) -> String
where
    F: Fn(&str) -> bool,
{
    let visible: Vec<&ProjectRecord> = records.iter().filter(|r| !r.is_empty()).collect();

    let head = table_head(&visible);
    let rows: String = dependencies
        .iter()
        .enumerate()
        .map(|(index, name)| table_row(&visible, name, index, include_dev, has_conflict(name)))
        .collect();

    wrap_html(&format!("{}{}", head, rows))
}

fn table_head(visible: &[&ProjectRecord]) -> String {
    let columns: String = visible
        .iter()
        .map(|record| format!("<th>{}</th>", escape(&record.name)))
        .collect();
    format!(r#"<tr class="header"><th>Package</th>{}</tr>"#, columns)
}

fn table_row(
    visible: &[&ProjectRecord],
    dependency: &str,
    index: usize,
    include_dev: bool,
    conflicting: bool,
) -> String {
    let first_column = format!(
        r#"<td><a href="https://www.npmjs.com/package/{0}" target="_blank">{0}</a></td>"#,
        escape(dependency)
    );

    let other_columns: String = visible
        .iter()
        .map(|record| version_cell(&display_version(record, dependency, include_dev)))
        .collect();

    format!(
        r#"<tr class="{} {}">{}{}</tr>"#,
        if conflicting { "highlighted" } else { "" },
        if index % 2 == 0 { "odd-row" } else { "" },
        first_column,
        other_columns
    )
}

/// The value shown in one project's cell for one dependency.
fn display_version(record: &ProjectRecord, dependency: &str, include_dev: bool) -> String {
    let version = record.version_of(dependency).unwrap_or("");
    let dev_version = if include_dev {
        record.dev_version_of(dependency).unwrap_or("")
    } else {
        ""
    };

    let mut display = if !version.is_empty() && !dev_version.is_empty() {
        format!("{}, {}", version, dev_version)
    } else if !version.is_empty() {
        version.to_string()
    } else {
        dev_version.to_string()
    };

    if !display.is_empty() {
        if let Some(installed) = record.resolved_version_of(dependency) {
            display = format!("{} ({})", display, installed);
        }
    }

    display
}

fn version_cell(display: &str) -> String {
    format!(
        r#"<td class="{}">{}</td>"#,
        if version::is_non_obvious(display) {
            "highlighted"
        } else {
            ""
        },
        escape(display)
    )
}

/// Wrap the table body in a complete HTML document with inline styles.
fn wrap_html(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Project dependency report</title>
  <style>
    body {{
      margin: 0;
      padding: 20px;
      font-family: monospace;
    }}

    table {{
      border-spacing: 4px;
      border-collapse: separate;
      border: 1px solid #ddd;
      width: 100%;
    }}

    th, td {{
      padding: 8px;
      text-align: center;
      border: 1px solid #ddd;
    }}

    th:first-child, td:first-child {{
      text-align: left;
    }}

    th {{
      position: sticky;
      top: 0;
      background-color: #F9CB85;
    }}

    .odd-row {{
      background-color: #f0ece3;
    }}

    .highlighted {{
      background-color: #EB4C4F;
      color: white;
    }}

    a {{
      color: #0066cc;
      text-decoration: none;
    }}

    a:hover {{
      text-decoration: underline;
    }}
  </style>
</head>
<body>
<table cellspacing="4px">
{}
</table>
</body>
</html>"#,
        body
    )
}

/// Minimal HTML escaping for text and attribute positions.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn record(name: &str, deps: &[(&str, &str)]) -> ProjectRecord {
        let mut record = ProjectRecord::empty(name, Path::new(name));
        record.dependencies = deps
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect();
        record
    }

    #[test]
    fn test_render_is_a_complete_document() {
        let html = render(&[], &[], false, |_| false);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</html>"));
        assert!(html.contains("<table"));
    }

    #[test]
    fn test_conflicting_dependency_flags_row_and_inexact_cell() {
        let records = vec![
            record("a-ui", &[("left-pad", "1.2.3")]),
            record("b-ui", &[("left-pad", "^1.3.0")]),
        ];
        let names = vec!["left-pad".to_string()];

        let html = render(&records, &names, false, |name| name == "left-pad");

        // Conflicting row carries the highlight class
        assert!(html.contains(r#"<tr class="highlighted odd-row">"#));
        // The caret range is flagged, the exact triple is not
        assert!(html.contains(r#"<td class="highlighted">^1.3.0</td>"#));
        assert!(html.contains(r#"<td class="">1.2.3</td>"#));
    }

    #[test]
    fn test_non_conflicting_row_is_unflagged() {
        let records = vec![
            record("a-ui", &[("react", "17.0.2")]),
            record("b-ui", &[("react", "17.0.2")]),
        ];
        let names = vec!["react".to_string()];

        let html = render(&records, &names, false, |_| false);
        assert!(html.contains(r#"<tr class=" odd-row">"#));
        assert!(!html.contains("highlighted odd-row"));
    }

    #[test]
    fn test_rows_alternate_zebra_style() {
        let records = vec![record("a-ui", &[("aaa", "1.0.0"), ("bbb", "1.0.0")])];
        let names = vec!["aaa".to_string(), "bbb".to_string()];

        let html = render(&records, &names, false, |_| false);
        // First row (index 0) zebra-striped, second not
        let first = html.find(r#"<tr class=" odd-row">"#).unwrap();
        let second = html.find(r#"<tr class=" ">"#).unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_empty_projects_are_omitted_from_the_table() {
        let records = vec![
            record("busy-ui", &[("react", "17.0.2")]),
            record("empty-ui", &[]),
        ];
        let names = vec!["react".to_string()];

        let html = render(&records, &names, false, |_| false);
        assert!(html.contains("<th>busy-ui</th>"));
        assert!(!html.contains("empty-ui"));
    }

    #[test]
    fn test_prod_and_dev_ranges_are_joined() {
        let mut a = record("a-ui", &[("typescript", "5.3.3")]);
        a.dev_dependencies = Some(
            [("typescript".to_string(), "^5.4.0".to_string())]
                .into_iter()
                .collect(),
        );
        let names = vec!["typescript".to_string()];

        let html = render(&[a], &names, true, |_| false);
        assert!(html.contains("5.3.3, ^5.4.0"));
    }

    #[test]
    fn test_dev_range_hidden_when_dev_excluded() {
        let mut a = record("a-ui", &[("typescript", "5.3.3")]);
        a.dev_dependencies = Some(
            [("typescript".to_string(), "^5.4.0".to_string())]
                .into_iter()
                .collect(),
        );
        let names = vec!["typescript".to_string()];

        let html = render(&[a], &names, false, |_| false);
        assert!(html.contains(r#"<td class="">5.3.3</td>"#));
        assert!(!html.contains("^5.4.0"));
    }

    #[test]
    fn test_resolved_version_shown_in_parentheses() {
        let mut a = record("a-ui", &[("lodash", "^4.17.0")]);
        a.resolved_versions
            .insert("lodash".to_string(), "4.17.21".to_string());
        let names = vec!["lodash".to_string()];

        let html = render(&[a], &names, false, |_| false);
        assert!(html.contains("^4.17.0 (4.17.21)"));
    }

    #[test]
    fn test_dependency_links_to_npmjs() {
        let records = vec![record("a-ui", &[("left-pad", "1.2.3")])];
        let names = vec!["left-pad".to_string()];

        let html = render(&records, &names, false, |_| false);
        assert!(html.contains(r#"href="https://www.npmjs.com/package/left-pad""#));
    }

    #[test]
    fn test_missing_declaration_renders_an_empty_unflagged_cell() {
        let records = vec![
            record("a-ui", &[("left-pad", "1.2.3")]),
            record("b-ui", &[("react", "17.0.2")]),
        ];
        let names = vec!["left-pad".to_string(), "react".to_string()];

        let html = render(&records, &names, false, |_| false);
        assert!(html.contains(r#"<td class=""></td>"#));
    }

    #[test]
    fn test_html_is_escaped() {
        let records = vec![record("a<script>", &[("bad&name", "1.0.0")])];
        let names = vec!["bad&name".to_string()];

        let html = render(&records, &names, false, |_| false);
        assert!(html.contains("a&lt;script&gt;"));
        assert!(html.contains("bad&amp;name"));
        assert!(!html.contains("a<script>"));
    }
}
