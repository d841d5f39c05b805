//! Output module for analysis reports
//!
//! This module handles:
//! - Snapshotting every submitted URL with its current record
//! - Rendering the snapshot as JSON or markdown
//! - Aggregate statistics across all records

mod markdown;
pub mod stats;

pub use markdown::{format_markdown_report, write_markdown_report};
pub use stats::{print_statistics, AnalysisStatistics};

use crate::state::AnalysisResult;
use crate::storage::AnalysisStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Point-in-time snapshot of every submitted URL and its record
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// When the snapshot was taken
    pub generated_at: DateTime<Utc>,

    /// URL to record, ordered by URL
    pub results: BTreeMap<String, AnalysisResult>,
}

impl AnalysisReport {
    /// Number of URLs in the report
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True if nothing was submitted
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// True once every record has reached Completed or Error
    pub fn is_settled(&self) -> bool {
        self.results.values().all(|r| r.status.is_terminal())
    }
}

/// Collects a report from the store
///
/// # Arguments
///
/// * `store` - The store holding the analysis records
///
/// # Returns
///
/// A report containing every submitted URL that has a record
pub fn collect_report(store: &dyn AnalysisStore) -> AnalysisReport {
    let results = store
        .list_submitted_urls()
        .into_iter()
        .filter_map(|url| store.get_result(&url).map(|result| (url, result)))
        .collect();

    AnalysisReport {
        generated_at: Utc::now(),
        results,
    }
}

/// Serializes a report as pretty-printed JSON
///
/// # Errors
///
/// Returns `OutputError::Format` if serialization fails.
pub fn render_json(report: &AnalysisReport) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
