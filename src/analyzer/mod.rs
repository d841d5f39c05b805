//! Analyzer module: fetching, inspection, link verification, orchestration
//!
//! This module contains:
//! - The document fetcher and link verifier capabilities
//! - HTML parsing, feature extraction, and markup version detection
//! - The orchestrator driving each URL through its analysis cycle

mod features;
mod fetcher;
mod link_checker;
mod orchestrator;
mod parser;
mod version;

pub use features::{extract_features, DocumentFeatures};
pub use fetcher::{build_http_client, FetchedPage, Fetcher, HttpFetcher};
pub use link_checker::{build_probe_client, HttpLinkVerifier, LinkVerifier};
pub use orchestrator::{AnalysisOrchestrator, Submission};
pub use parser::{inspect_document, parse_document, DocumentSummary};
pub use version::{classify_version, HtmlVersion};
