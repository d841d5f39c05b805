//! Markdown report generation
//!
//! This module renders an analysis report as a human-readable markdown
//! document: overall statistics, a per-URL overview table, and one detail
//! section per URL.

use crate::output::{AnalysisReport, AnalysisStatistics, OutputResult};
use crate::state::{AnalysisResult, AnalysisStatus};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown report to `output_path`
///
/// # Arguments
///
/// * `report` - The analysis report
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to write the report
pub fn write_markdown_report(report: &AnalysisReport, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_report(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats an analysis report as markdown
///
/// # Arguments
///
/// * `report` - The analysis report
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_report(report: &AnalysisReport) -> String {
    let stats = AnalysisStatistics::from_report(report);
    let mut md = String::new();

    md.push_str("# Web Analysis Report\n\n");
    md.push_str(&format!(
        "- **Generated**: {}\n",
        report.generated_at.to_rfc3339()
    ));
    md.push_str(&format!("- **URLs**: {}\n", stats.total_urls));
    md.push_str(&format!("- **Success Rate**: {:.2}%\n", stats.success_rate()));
    md.push_str(&format!("- **Error Rate**: {:.2}%\n\n", stats.error_rate()));

    md.push_str("## Status Breakdown\n\n");
    md.push_str("| Status | Count |\n");
    md.push_str("|--------|-------|\n");
    for status in AnalysisStatus::all_statuses() {
        md.push_str(&format!("| {} | {} |\n", status, stats.count(status)));
    }
    md.push('\n');

    if report.is_empty() {
        return md;
    }

    md.push_str("## Overview\n\n");
    md.push_str("| URL | Status | HTML Version | Internal | External | Broken | Login Form |\n");
    md.push_str("|-----|--------|--------------|----------|----------|--------|------------|\n");
    for (url, result) in &report.results {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} |\n",
            url,
            result.status,
            result.html_version,
            result.internal_links,
            result.external_links,
            result.broken_links,
            login_form_label(result)
        ));
    }
    md.push('\n');

    for (url, result) in &report.results {
        md.push_str(&format_details(url, result));
    }

    md
}

fn format_details(url: &str, result: &AnalysisResult) -> String {
    let mut md = format!("## {}\n\n", url);
    md.push_str(&format!("- **Status**: {}\n", result.status));

    match result.status {
        AnalysisStatus::Error => {
            if let Some(message) = &result.message {
                md.push_str(&format!("- **Message**: {}\n", message));
            }
        }
        AnalysisStatus::Completed => {
            md.push_str(&format!("- **Title**: {}\n", result.title));
            md.push_str(&format!("- **HTML Version**: {}\n", result.html_version));
            md.push_str(&format!("- **Login Form**: {}\n", login_form_label(result)));

            if !result.headings.is_empty() {
                md.push_str("\n| Heading | Count |\n");
                md.push_str("|---------|-------|\n");
                for (tag, count) in &result.headings {
                    md.push_str(&format!("| {} | {} |\n", tag, count));
                }
            }
        }
        AnalysisStatus::Pending | AnalysisStatus::InProgress => {}
    }

    md.push('\n');
    md
}

fn login_form_label(result: &AnalysisResult) -> &'static str {
    if result.login_form_present {
        "Present"
    } else {
        "Not Present"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn create_test_report() -> AnalysisReport {
        let mut headings = BTreeMap::new();
        headings.insert("h1".to_string(), 1);
        headings.insert("h2".to_string(), 3);

        let completed = AnalysisResult {
            status: AnalysisStatus::Completed,
            html_version: "HTML5".to_string(),
            title: "Test Page".to_string(),
            headings,
            internal_links: 4,
            external_links: 2,
            broken_links: 1,
            login_form_present: true,
            message: None,
        };

        let mut results = BTreeMap::new();
        results.insert("https://a.test".to_string(), completed);
        results.insert(
            "https://b.test".to_string(),
            AnalysisResult::error("Failed to fetch URL: https://b.test answered with HTTP 404"),
        );

        AnalysisReport {
            generated_at: Utc::now(),
            results,
        }
    }

    #[test]
    fn test_format_markdown_report() {
        let markdown = format_markdown_report(&create_test_report());

        assert!(markdown.contains("# Web Analysis Report"));
        assert!(markdown.contains("Status Breakdown"));
        assert!(markdown.contains("| Completed | 1 |"));
        assert!(markdown.contains("| Error | 1 |"));
        assert!(markdown.contains("| https://a.test | Completed | HTML5 | 4 | 2 | 1 | Present |"));
    }

    #[test]
    fn test_markdown_details() {
        let markdown = format_markdown_report(&create_test_report());

        assert!(markdown.contains("## https://a.test"));
        assert!(markdown.contains("- **Title**: Test Page"));
        assert!(markdown.contains("| h2 | 3 |"));
        assert!(markdown.contains("- **Message**: Failed to fetch URL"));
    }

    #[test]
    fn test_empty_report_has_no_overview() {
        let report = AnalysisReport {
            generated_at: Utc::now(),
            results: BTreeMap::new(),
        };
        let markdown = format_markdown_report(&report);

        assert!(markdown.contains("- **URLs**: 0"));
        assert!(!markdown.contains("## Overview"));
    }

    #[test]
    fn test_write_markdown_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");

        write_markdown_report(&create_test_report(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Web Analysis Report"));
    }
}
