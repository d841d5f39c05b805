//! URL handling module for Web-Analyzer
//!
//! This module provides href classification, naive href resolution against
//! the analyzed page, and validation of URLs submitted for analysis.

mod links;
mod target;

// Re-export main functions
pub use links::resolve_href;
pub use target::validate_target_url;

/// Link classification types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// Relative reference, resolved against the analyzed page
    Internal,
    /// Absolute reference carrying its own scheme
    External,
}

impl LinkKind {
    /// Classifies an href by its prefix
    ///
    /// Anything starting with "http" (which covers "https") is external;
    /// everything else, including protocol-relative and `mailto:` hrefs, is
    /// internal.
    ///
    /// # Examples
    ///
    /// ```
    /// use web_analyzer::url::LinkKind;
    ///
    /// assert_eq!(LinkKind::classify("https://example.com"), LinkKind::External);
    /// assert_eq!(LinkKind::classify("/about"), LinkKind::Internal);
    /// ```
    pub fn classify(href: &str) -> Self {
        if href.starts_with("http") {
            Self::External
        } else {
            Self::Internal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_external() {
        assert_eq!(LinkKind::classify("http://ext.com"), LinkKind::External);
        assert_eq!(LinkKind::classify("https://ext.com/a"), LinkKind::External);
    }

    #[test]
    fn test_classify_internal() {
        assert_eq!(LinkKind::classify("/x"), LinkKind::Internal);
        assert_eq!(LinkKind::classify("page.html"), LinkKind::Internal);
        assert_eq!(LinkKind::classify("#top"), LinkKind::Internal);
        assert_eq!(LinkKind::classify(""), LinkKind::Internal);
    }

    #[test]
    fn test_classify_is_case_sensitive_prefix() {
        // Only the literal lowercase prefix counts
        assert_eq!(LinkKind::classify("HTTP://EXT.COM"), LinkKind::Internal);
        assert_eq!(LinkKind::classify("//cdn.example.com"), LinkKind::Internal);
    }
}
