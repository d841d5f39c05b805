//! Markup version detection from the document type declaration

use scraper::Html;
use std::fmt;

/// Markup version declared by a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HtmlVersion {
    Html5,
    Html401Strict,
    Html401Transitional,
    Html401Frameset,
    Html40Strict,
    Html40Transitional,
    Html40Frameset,
    Html32,
    Html20,
    Xhtml10Strict,
    Xhtml10Transitional,
    Xhtml10Frameset,
    Xhtml11,
    /// `<!DOCTYPE html ...>` with identifiers we do not recognize
    UnknownVersion,
    /// A doctype whose name is not `html`
    UnknownDocumentType,
    /// No doctype directly under the document root
    NoDoctype,
}

impl HtmlVersion {
    /// Looks up a DTD public identifier (case-insensitive)
    pub fn from_public_identifier(public_id: &str) -> Option<Self> {
        let version = match public_id.to_ascii_uppercase().as_str() {
            "-//W3C//DTD HTML 4.01//EN" => Self::Html401Strict,
            "-//W3C//DTD HTML 4.01 TRANSITIONAL//EN" => Self::Html401Transitional,
            "-//W3C//DTD HTML 4.01 FRAMESET//EN" => Self::Html401Frameset,
            "-//W3C//DTD HTML 4.0//EN" => Self::Html40Strict,
            "-//W3C//DTD HTML 4.0 TRANSITIONAL//EN" => Self::Html40Transitional,
            "-//W3C//DTD HTML 4.0 FRAMESET//EN" => Self::Html40Frameset,
            "-//W3C//DTD HTML 3.2 FINAL//EN" => Self::Html32,
            "-//IETF//DTD HTML//EN" => Self::Html20,
            "-//W3C//DTD XHTML 1.0 STRICT//EN" => Self::Xhtml10Strict,
            "-//W3C//DTD XHTML 1.0 TRANSITIONAL//EN" => Self::Xhtml10Transitional,
            "-//W3C//DTD XHTML 1.0 FRAMESET//EN" => Self::Xhtml10Frameset,
            "-//W3C//DTD XHTML 1.1//EN" => Self::Xhtml11,
            _ => return None,
        };
        Some(version)
    }

    /// Human-readable label stored in the analysis record
    pub fn label(&self) -> &'static str {
        match self {
            Self::Html5 => "HTML5",
            Self::Html401Strict => "HTML 4.01 Strict",
            Self::Html401Transitional => "HTML 4.01 Transitional",
            Self::Html401Frameset => "HTML 4.01 Frameset",
            Self::Html40Strict => "HTML 4.0 Strict",
            Self::Html40Transitional => "HTML 4.0 Transitional",
            Self::Html40Frameset => "HTML 4.0 Frameset",
            Self::Html32 => "HTML 3.2",
            Self::Html20 => "HTML 2.0",
            Self::Xhtml10Strict => "XHTML 1.0 Strict",
            Self::Xhtml10Transitional => "XHTML 1.0 Transitional",
            Self::Xhtml10Frameset => "XHTML 1.0 Frameset",
            Self::Xhtml11 => "XHTML 1.1",
            Self::UnknownVersion => "Unknown HTML version",
            Self::UnknownDocumentType => "Unknown document type",
            Self::NoDoctype => "No DOCTYPE found",
        }
    }
}

impl fmt::Display for HtmlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies the markup version of a parsed document
///
/// Only a doctype that is a direct child of the document root is considered.
/// A bare `<!DOCTYPE html>` (no public or system identifier) is HTML5.
pub fn classify_version(document: &Html) -> HtmlVersion {
    let doctype = document
        .tree
        .root()
        .children()
        .find_map(|node| node.value().as_doctype());

    let Some(doctype) = doctype else {
        return HtmlVersion::NoDoctype;
    };

    if !doctype.name().eq_ignore_ascii_case("html") {
        return HtmlVersion::UnknownDocumentType;
    }

    // html5ever stores a missing identifier as an empty string, so
    // `PUBLIC ""` and `SYSTEM ""` are indistinguishable from a bare doctype
    // and classify as HTML5.
    let public_id = doctype.public_id();
    if public_id.is_empty() {
        if doctype.system_id().is_empty() {
            HtmlVersion::Html5
        } else {
            HtmlVersion::UnknownVersion
        }
    } else {
        HtmlVersion::from_public_identifier(public_id).unwrap_or(HtmlVersion::UnknownVersion)
    }
}
