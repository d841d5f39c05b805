use crate::url::LinkKind;

/// Resolves an href found on `base_url` into the URL that gets probed
///
/// External hrefs are returned unchanged. Internal hrefs are appended to the
/// base URL verbatim: no RFC 3986 resolution, no slash de-duplication, no
/// `../` handling. Link counts depend on this exact behavior.
///
/// # Examples
///
/// ```
/// use web_analyzer::url::resolve_href;
///
/// assert_eq!(resolve_href("https://site.com", "/x"), "https://site.com/x");
/// assert_eq!(resolve_href("https://site.com/", "/x"), "https://site.com//x");
/// assert_eq!(resolve_href("https://site.com", "http://ext.com"), "http://ext.com");
/// ```
pub fn resolve_href(base_url: &str, href: &str) -> String {
    match LinkKind::classify(href) {
        LinkKind::External => href.to_string(),
        LinkKind::Internal => format!("{}{}", base_url, href),
    }
}
