//! In-memory storage implementation
//!
//! Records live for the lifetime of the process. A single mutex guards both
//! the record map and the submission set, so every operation is atomic with
//! respect to every other.

use crate::state::AnalysisResult;
use crate::storage::traits::{AnalysisStore, StorageError, StorageResult};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Inner {
    results: HashMap<String, AnalysisResult>,
    submitted: HashSet<String>,
}

/// Process-local analysis store
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // Records are replaced whole, so a poisoned guard still holds consistent data
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AnalysisStore for MemoryStore {
    fn record_submission(&self, url: &str) {
        let newly_added = self.lock().submitted.insert(url.to_string());
        if newly_added {
            tracing::info!(url, "New URL added to submissions");
        }
    }

    fn list_submitted_urls(&self) -> Vec<String> {
        self.lock().submitted.iter().cloned().collect()
    }

    fn set_result(&self, url: &str, result: AnalysisResult) {
        self.lock().results.insert(url.to_string(), result);
    }

    fn get_result(&self, url: &str) -> Option<AnalysisResult> {
        self.lock().results.get(url).cloned()
    }

    fn try_claim(&self, url: &str) -> bool {
        let mut inner = self.lock();
        if let Some(current) = inner.results.get(url) {
            if current.status.is_active() {
                return false;
            }
        }
        inner
            .results
            .insert(url.to_string(), AnalysisResult::pending());
        true
    }

    fn advance(&self, url: &str, result: AnalysisResult) -> StorageResult<()> {
        let mut inner = self.lock();
        let from = inner.results.get(url).map(|current| current.status);

        match from {
            Some(current) if current.can_transition_to(result.status) => {
                inner.results.insert(url.to_string(), result);
                Ok(())
            }
            _ => Err(StorageError::InvalidTransition {
                url: url.to_string(),
                from,
                to: result.status,
            }),
        }
    }
}
