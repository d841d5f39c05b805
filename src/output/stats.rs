//! Aggregate statistics over an analysis report
//!
//! This module provides functionality for summarizing a report and
//! displaying the summary on the terminal.

use crate::output::AnalysisReport;
use crate::state::AnalysisStatus;
use std::collections::HashMap;

/// Analysis statistics summary
#[derive(Debug, Clone, Default)]
pub struct AnalysisStatistics {
    /// Total number of URLs in the report
    pub total_urls: u64,

    /// Count of URLs by status
    pub urls_by_status: HashMap<AnalysisStatus, u64>,

    /// Internal anchors across completed analyses
    pub internal_links: u64,

    /// External anchors across completed analyses
    pub external_links: u64,

    /// Broken distinct links across completed analyses
    pub broken_links: u64,

    /// Completed pages carrying a login form
    pub login_forms: u64,
}

impl AnalysisStatistics {
    /// Summarizes every record in `report`
    pub fn from_report(report: &AnalysisReport) -> Self {
        let mut stats = Self {
            total_urls: report.len() as u64,
            ..Self::default()
        };

        for result in report.results.values() {
            *stats.urls_by_status.entry(result.status).or_insert(0) += 1;

            if result.status.is_success() {
                stats.internal_links += u64::from(result.internal_links);
                stats.external_links += u64::from(result.external_links);
                stats.broken_links += u64::from(result.broken_links);
                if result.login_form_present {
                    stats.login_forms += 1;
                }
            }
        }

        stats
    }

    /// Number of URLs currently in `status`
    pub fn count(&self, status: AnalysisStatus) -> u64 {
        self.urls_by_status.get(&status).copied().unwrap_or(0)
    }

    /// Percentage of URLs that completed successfully
    pub fn success_rate(&self) -> f64 {
        if self.total_urls == 0 {
            return 0.0;
        }
        self.count(AnalysisStatus::Completed) as f64 / self.total_urls as f64 * 100.0
    }

    /// Percentage of URLs that ended in Error
    pub fn error_rate(&self) -> f64 {
        if self.total_urls == 0 {
            return 0.0;
        }
        self.count(AnalysisStatus::Error) as f64 / self.total_urls as f64 * 100.0
    }
}

/// Prints statistics to stderr in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &AnalysisStatistics) {
    eprintln!("=== Analysis Statistics ===\n");

    eprintln!("Overview:");
    eprintln!("  URLs analyzed: {}", stats.total_urls);
    eprintln!("  Success rate: {:.1}%", stats.success_rate());
    eprintln!();

    eprintln!("URLs by Status:");
    for status in AnalysisStatus::all_statuses() {
        let count = stats.count(status);
        if count > 0 {
            eprintln!("  {}: {}", status, count);
        }
    }
    eprintln!();

    eprintln!("Links:");
    eprintln!("  Internal: {}", stats.internal_links);
    eprintln!("  External: {}", stats.external_links);
    eprintln!("  Broken: {}", stats.broken_links);
    eprintln!("  Pages with login form: {}", stats.login_forms);
}
