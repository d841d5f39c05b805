//! HTTP fetcher implementation
//!
//! This module handles retrieving documents for analysis, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests to fetch page content
//! - Error classification (timeout, transport, non-success status)

use crate::config::{Config, FetcherConfig, UserAgentConfig};
use crate::FetchError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// A successfully retrieved document
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value
    pub content_type: Option<String>,
    /// Raw page body
    pub body: Vec<u8>,
}

/// Retrieves raw document bytes for a URL
///
/// Implementations report transport failures and non-2xx answers as errors;
/// a returned page always carries a success status.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// Builds the HTTP client used to download documents
///
/// # Example
///
/// ```no_run
/// use web_analyzer::analyzer::build_http_client;
/// use web_analyzer::config::{FetcherConfig, UserAgentConfig};
///
/// let client = build_http_client(&UserAgentConfig::default(), &FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    config: &FetcherConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// `reqwest`-backed document fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an already configured client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher from the analyzer configuration
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        build_http_client(&config.user_agent, &config.fetcher).map(Self::new)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| classify_error(url, e))?;

        tracing::debug!(
            "Fetched {} ({} bytes, status {}, final URL {})",
            url,
            body.len(),
            status.as_u16(),
            final_url
        );

        Ok(FetchedPage {
            final_url,
            status_code: status.as_u16(),
            content_type,
            body: body.to_vec(),
        })
    }
}

fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            source: error,
        }
    }
}
