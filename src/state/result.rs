//! The per-URL analysis record and its wire shape

use crate::state::AnalysisStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of analyzing one URL
///
/// Serializes to the public JSON shape (`"Status"`, `"HTML Version"`,
/// `"Login Form": "Present" | "Not Present"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "Status")]
    pub status: AnalysisStatus,

    /// Markup version label; empty until the analysis completes
    #[serde(rename = "HTML Version", default)]
    pub html_version: String,

    #[serde(rename = "Title", default)]
    pub title: String,

    /// Heading tag name ("h1".."h6") to occurrence count
    #[serde(rename = "Headings", default)]
    pub headings: BTreeMap<String, u32>,

    #[serde(rename = "Internal Links", default)]
    pub internal_links: u32,

    #[serde(rename = "External Links", default)]
    pub external_links: u32,

    #[serde(rename = "Broken Links", default)]
    pub broken_links: u32,

    #[serde(rename = "Login Form", with = "login_form", default)]
    pub login_form_present: bool,

    /// Diagnostic, only set on Error
    #[serde(rename = "Message", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AnalysisResult {
    /// Placeholder written when a submission claims the URL
    pub fn pending() -> Self {
        Self::placeholder(AnalysisStatus::Pending)
    }

    /// Placeholder written when the fetch is about to begin
    pub fn in_progress() -> Self {
        Self::placeholder(AnalysisStatus::InProgress)
    }

    /// Terminal failure record carrying a diagnostic message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::placeholder(AnalysisStatus::Error)
        }
    }

    fn placeholder(status: AnalysisStatus) -> Self {
        Self {
            status,
            html_version: String::new(),
            title: String::new(),
            headings: BTreeMap::new(),
            internal_links: 0,
            external_links: 0,
            broken_links: 0,
            login_form_present: false,
            message: None,
        }
    }

    /// Total anchors with an href, duplicates included
    pub fn total_links(&self) -> u32 {
        self.internal_links + self.external_links
    }

    /// Count for one heading level, zero when absent
    pub fn heading_count(&self, tag: &str) -> u32 {
        self.headings.get(tag).copied().unwrap_or(0)
    }
}

mod login_form {
    use serde::{Deserialize, Deserializer, Serializer};

    const PRESENT: &str = "Present";
    const NOT_PRESENT: &str = "Not Present";

    pub fn serialize<S: Serializer>(present: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *present { PRESENT } else { NOT_PRESENT })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let value = String::deserialize(deserializer)?;
        match value.as_str() {
            PRESENT => Ok(true),
            NOT_PRESENT => Ok(false),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &[PRESENT, NOT_PRESENT],
            )),
        }
    }
}
