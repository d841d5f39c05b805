//! Analysis status definitions for tracking per-URL progress
//!
//! This module defines every state an analysis record can be in and the
//! forward-only transitions between them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the current state of a URL's analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalysisStatus {
    // ===== Active States =====
    /// Submission accepted, waiting for a worker slot
    Pending,

    /// Document is being fetched and analyzed
    #[serde(rename = "In progress")]
    InProgress,

    // ===== Terminal States =====
    /// Analysis finished successfully
    Completed,

    /// Fetch or parse failed
    Error,
}

impl AnalysisStatus {
    /// Returns true if this is a terminal state (no further processing in this cycle)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }

    /// Returns true if an analysis cycle is still running for this record
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }

    /// Returns true if this represents a successful completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns true if a record may move from `self` to `next` within one cycle
    ///
    /// Pending may fail straight to Error when the worker pool is gone before
    /// the cycle starts. Terminal states never move; a new cycle replaces them
    /// through a fresh claim instead.
    pub fn can_transition_to(&self, next: AnalysisStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::InProgress)
                | (Self::Pending, Self::Error)
                | (Self::InProgress, Self::Completed)
                | (Self::InProgress, Self::Error)
        )
    }

    /// Human-readable label, identical to the serialized form
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
            Self::Error => "Error",
        }
    }

    /// Returns all possible statuses
    pub fn all_statuses() -> [Self; 4] {
        [Self::Pending, Self::InProgress, Self::Completed, Self::Error]
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
