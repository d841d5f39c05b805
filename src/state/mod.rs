//! State module for tracking analysis progress
//!
//! # Components
//!
//! - `AnalysisStatus`: lifecycle of a URL's analysis (pending, in progress, completed, error)
//! - `AnalysisResult`: the record stored per URL, with its public JSON shape

mod result;
mod status;

// Re-export main types
pub use result::AnalysisResult;
pub use status::AnalysisStatus;
