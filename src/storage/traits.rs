//! Storage traits and error types
//!
//! This module defines the trait interface for analysis stores and
//! associated error types.

use crate::state::{AnalysisResult, AnalysisStatus};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid transition for {url}: {from:?} -> {to:?}")]
    InvalidTransition {
        url: String,
        from: Option<AnalysisStatus>,
        to: AnalysisStatus,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Keyed store for analysis records and the submitted-URL set
///
/// Implementations must be safe to share across any number of concurrent
/// analysis tasks. Readers never observe a partially written record: each
/// write replaces the whole record for its URL.
pub trait AnalysisStore: Send + Sync {
    // ===== Submissions =====

    /// Adds `url` to the submitted set; repeated calls have no further effect
    fn record_submission(&self, url: &str);

    /// Snapshot of every URL ever submitted, in no particular order
    fn list_submitted_urls(&self) -> Vec<String>;

    // ===== Records =====

    /// Unconditionally replaces the record for `url`
    fn set_result(&self, url: &str, result: AnalysisResult);

    /// Returns the current record, or `None` if the URL was never claimed
    fn get_result(&self, url: &str) -> Option<AnalysisResult>;

    /// Atomically starts a new analysis cycle for `url`
    ///
    /// Returns `false` without touching the record when a cycle is already
    /// active (Pending or InProgress). Otherwise writes a Pending placeholder
    /// and returns `true`; the caller now owns the cycle.
    fn try_claim(&self, url: &str) -> bool;

    /// Replaces the record only if the status change is a legal forward transition
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidTransition` when the new status would
    /// regress the current one, or when no cycle has been claimed.
    fn advance(&self, url: &str, result: AnalysisResult) -> StorageResult<()>;
}
