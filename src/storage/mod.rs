//! Storage module for analysis records
//!
//! This module holds the per-URL analysis records and the set of submitted
//! URLs. Records are kept in memory only; nothing survives a restart.

mod memory;
mod traits;

pub use memory::MemoryStore;
pub use traits::{AnalysisStore, StorageError, StorageResult};

use std::sync::Arc;

/// Creates a fresh shared in-memory store
pub fn open_memory_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}
