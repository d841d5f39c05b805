//! Single-pass feature extraction over a parsed document
//!
//! The walk collects:
//! - the page title (last `<title>` with a leading text node wins)
//! - a histogram of `h1`..`h6` elements
//! - internal/external anchor counts, duplicates included
//! - the distinct resolved link targets, in first-occurrence order
//! - whether any `<form>` contains a password input

use crate::url::{resolve_href, LinkKind};
use scraper::{ElementRef, Html};
use std::collections::{BTreeMap, HashSet};

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Structural features of one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFeatures {
    pub title: String,
    pub headings: BTreeMap<String, u32>,
    pub internal_links: u32,
    pub external_links: u32,
    /// Distinct resolved hrefs, each listed once, in document order
    pub links: Vec<String>,
    pub login_form_present: bool,
}

/// Walks `document` once and extracts its features
///
/// Internal hrefs are resolved against `base_url` with
/// [`resolve_href`](crate::url::resolve_href).
///
/// # Example
///
/// ```
/// use scraper::Html;
/// use web_analyzer::analyzer::extract_features;
///
/// let html = Html::parse_document(r#"<title>Hi</title><a href="/a">a</a><a href="/a">again</a>"#);
/// let features = extract_features(&html, "https://site.com");
/// assert_eq!(features.title, "Hi");
/// assert_eq!(features.internal_links, 2);
/// assert_eq!(features.links, vec!["https://site.com/a".to_string()]);
/// ```
pub fn extract_features(document: &Html, base_url: &str) -> DocumentFeatures {
    let mut visitor = FeatureVisitor::new(base_url);
    // descendants() is a pre-order walk driven by an explicit cursor, so
    // deeply nested markup cannot overflow the stack
    for node in document.tree.root().descendants() {
        if let Some(element) = ElementRef::wrap(node) {
            visitor.visit(element);
        }
    }
    visitor.finish()
}

/// Traversal context carried across the walk
struct FeatureVisitor<'a> {
    base_url: &'a str,
    features: DocumentFeatures,
    seen: HashSet<String>,
}

impl<'a> FeatureVisitor<'a> {
    fn new(base_url: &'a str) -> Self {
        Self {
            base_url,
            features: DocumentFeatures::default(),
            seen: HashSet::new(),
        }
    }

    fn visit(&mut self, element: ElementRef<'_>) {
        let name = element.value().name();
        match name {
            "title" => self.visit_title(element),
            "a" => {
                if let Some(href) = element.value().attr("href") {
                    self.visit_link(href);
                }
            }
            "form" => {
                if !self.features.login_form_present && contains_password_input(element) {
                    self.features.login_form_present = true;
                }
            }
            _ if HEADING_TAGS.contains(&name) => {
                *self.features.headings.entry(name.to_string()).or_insert(0) += 1;
            }
            _ => {}
        }
    }

    fn visit_title(&mut self, element: ElementRef<'_>) {
        let text = element
            .first_child()
            .and_then(|child| child.value().as_text());
        if let Some(text) = text {
            self.features.title = text.trim().to_string();
        }
    }

    fn visit_link(&mut self, href: &str) {
        match LinkKind::classify(href) {
            LinkKind::Internal => self.features.internal_links += 1,
            LinkKind::External => self.features.external_links += 1,
        }

        let resolved = resolve_href(self.base_url, href);
        if self.seen.insert(resolved.clone()) {
            self.features.links.push(resolved);
        }
    }

    fn finish(self) -> DocumentFeatures {
        self.features
    }
}

/// True if any `<input type="password">` sits inside `form`
fn contains_password_input(form: ElementRef<'_>) -> bool {
    form.descendants()
        .filter_map(ElementRef::wrap)
        .any(|el| el.value().name() == "input" && el.value().attr("type") == Some("password"))
}
