use crate::{UrlError, UrlResult};
use url::Url;

/// Validates a URL submitted for analysis
///
/// The URL must parse, use the `http` or `https` scheme and carry a host.
/// The caller keeps using the original string as the record key; the parsed
/// form is returned for inspection only.
///
/// # Errors
///
/// * `UrlError::Empty` - blank input
/// * `UrlError::Parse` - not a URL at all (including a missing scheme)
/// * `UrlError::InvalidScheme` - anything other than http/https
/// * `UrlError::MissingDomain` - no host component
pub fn validate_target_url(input: &str) -> UrlResult<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlError::Parse(format!("{}: {}", trimmed, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlError::InvalidScheme(other.to_string())),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingDomain),
    }
}
