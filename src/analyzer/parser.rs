//! HTML parsing front door
//!
//! Turns fetched bytes into a `scraper` document and runs the synchronous
//! inspections over it. `scraper::Html` is not `Send`, so callers receive
//! only owned, thread-safe summaries and the tree is dropped before any
//! await point.

use crate::analyzer::features::{extract_features, DocumentFeatures};
use crate::analyzer::version::{classify_version, HtmlVersion};
use crate::ParseError;
use scraper::Html;

/// Everything the analysis needs from one parsed document
#[derive(Debug, Clone)]
pub struct DocumentSummary {
    pub features: DocumentFeatures,
    pub version: HtmlVersion,
}

/// Parses raw document bytes
///
/// html5ever recovers from any malformed markup, so the only hard failure is
/// a body that is not valid UTF-8.
pub fn parse_document(body: &[u8]) -> Result<Html, ParseError> {
    let text = std::str::from_utf8(body)?;
    Ok(Html::parse_document(text))
}

/// Parses `body` and extracts features and markup version in one go
pub fn inspect_document(body: &[u8], base_url: &str) -> Result<DocumentSummary, ParseError> {
    let document = parse_document(body)?;
    Ok(DocumentSummary {
        features: extract_features(&document, base_url),
        version: classify_version(&document),
    })
}
