//! Analysis orchestrator - per-URL submission and analysis cycle
//!
//! This module ties the capabilities together:
//! - Deduplicating submissions against in-flight work
//! - Dispatching each accepted submission onto a bounded task pool
//! - Fetching, parsing, and inspecting the document
//! - Verifying every distinct link
//! - Committing the terminal record to the store

use crate::analyzer::fetcher::{Fetcher, HttpFetcher};
use crate::analyzer::link_checker::{HttpLinkVerifier, LinkVerifier};
use crate::analyzer::parser::inspect_document;
use crate::config::{AnalysisConfig, Config, LinkCheckerConfig};
use crate::state::{AnalysisResult, AnalysisStatus};
use crate::storage::AnalysisStore;
use crate::AnalyzerError;
use futures::future;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Acknowledgment returned by [`AnalysisOrchestrator::submit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// A new analysis cycle was started
    Accepted,
    /// A cycle for this URL is already pending or running; nothing was started
    Coalesced,
}

/// Coordinates fetch, inspection, and link verification for submitted URLs
///
/// Cloning is cheap: every clone shares the same store, capabilities, and
/// worker pool.
#[derive(Clone)]
pub struct AnalysisOrchestrator {
    store: Arc<dyn AnalysisStore>,
    fetcher: Arc<dyn Fetcher>,
    verifier: Arc<dyn LinkVerifier>,
    /// Bounds the number of cycles running at once
    permits: Arc<Semaphore>,
    link_concurrency: usize,
}

impl AnalysisOrchestrator {
    /// Creates an orchestrator with default pool limits
    pub fn new(
        store: Arc<dyn AnalysisStore>,
        fetcher: Arc<dyn Fetcher>,
        verifier: Arc<dyn LinkVerifier>,
    ) -> Self {
        Self {
            store,
            fetcher,
            verifier,
            permits: Arc::new(Semaphore::new(
                AnalysisConfig::default().max_concurrent_analyses,
            )),
            link_concurrency: LinkCheckerConfig::default().concurrency,
        }
    }

    /// Builds an orchestrator with HTTP capabilities from the configuration
    ///
    /// # Errors
    ///
    /// Fails when either HTTP client cannot be constructed.
    pub fn from_config(
        config: &Config,
        store: Arc<dyn AnalysisStore>,
    ) -> Result<Self, AnalyzerError> {
        let fetcher = HttpFetcher::from_config(config)?;
        let verifier = HttpLinkVerifier::from_config(config)?;

        Ok(Self::new(store, Arc::new(fetcher), Arc::new(verifier))
            .with_max_concurrent_analyses(config.analysis.max_concurrent_analyses)
            .with_link_concurrency(config.link_checker.concurrency))
    }

    /// Sets how many analyses may run at the same time (minimum 1)
    pub fn with_max_concurrent_analyses(mut self, limit: usize) -> Self {
        self.permits = Arc::new(Semaphore::new(limit.max(1)));
        self
    }

    /// Sets how many link probes one analysis keeps in flight (minimum 1)
    pub fn with_link_concurrency(mut self, limit: usize) -> Self {
        self.link_concurrency = limit.max(1);
        self
    }

    /// The store this orchestrator commits into
    pub fn store(&self) -> &Arc<dyn AnalysisStore> {
        &self.store
    }

    /// Submits `url` for analysis and returns immediately
    ///
    /// The URL is recorded as submitted either way. If no cycle is active for
    /// it, a Pending record is written and the cycle is spawned onto the
    /// tokio runtime; progress is observable only through
    /// [`get_result`](Self::get_result).
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, url: &str) -> Submission {
        self.store.record_submission(url);

        if !self.store.try_claim(url) {
            tracing::info!("Analysis already in progress for {}", url);
            return Submission::Coalesced;
        }

        tracing::info!("URL submitted for analysis: {}", url);
        let this = self.clone();
        let url = url.to_string();
        tokio::spawn(async move {
            this.run_cycle(&url).await;
        });

        Submission::Accepted
    }

    /// Runs the full submission protocol inline and returns the resulting record
    ///
    /// When a cycle is already active the in-flight record is returned as is.
    pub async fn analyze(&self, url: &str) -> Option<AnalysisResult> {
        self.store.record_submission(url);

        if self.store.try_claim(url) {
            self.run_cycle(url).await;
        } else {
            tracing::info!("Analysis already in progress for {}", url);
        }

        self.store.get_result(url)
    }

    /// Current record for `url`, `None` if it was never submitted
    pub fn get_result(&self, url: &str) -> Option<AnalysisResult> {
        self.store.get_result(url)
    }

    /// Every URL ever submitted, in no particular order
    pub fn list_submitted_urls(&self) -> Vec<String> {
        self.store.list_submitted_urls()
    }

    /// Polls until the record for `url` is terminal
    ///
    /// Returns `None` immediately if the URL has no record.
    pub async fn wait_for(&self, url: &str, poll_interval: Duration) -> Option<AnalysisResult> {
        loop {
            match self.store.get_result(url) {
                Some(result) if result.status.is_terminal() => return Some(result),
                Some(_) => tokio::time::sleep(poll_interval).await,
                None => return None,
            }
        }
    }

    /// Drives a claimed URL from Pending to a terminal record
    async fn run_cycle(&self, url: &str) {
        let _permit = match self.permits.acquire().await {
            Ok(permit) => permit,
            Err(_) => {
                self.commit(url, AnalysisResult::error("Analysis pool is shut down"));
                return;
            }
        };

        self.commit(url, AnalysisResult::in_progress());
        let result = self.execute(url).await;
        tracing::info!("Analysis of {} finished with status {}", url, result.status);
        self.commit(url, result);
    }

    /// Fetch, parse, inspect, verify; never fails, errors become Error records
    async fn execute(&self, url: &str) -> AnalysisResult {
        tracing::info!("Starting analysis of {}", url);

        let page = match self.fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!("Failed to fetch {}: {}", url, e);
                return AnalysisResult::error(format!("Failed to fetch URL: {}", e));
            }
        };

        tracing::debug!(
            "Received {} bytes from {} (status {}, content type {})",
            page.body.len(),
            page.final_url,
            page.status_code,
            page.content_type.as_deref().unwrap_or("unknown")
        );

        let summary = match inspect_document(&page.body, url) {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!("Failed to parse HTML from {}: {}", url, e);
                return AnalysisResult::error(format!("Failed to parse HTML: {}", e));
            }
        };

        let features = summary.features;
        tracing::debug!(
            "Verifying {} distinct links found on {}",
            features.links.len(),
            url
        );
        let broken_links = self.count_broken_links(&features.links).await;

        AnalysisResult {
            status: AnalysisStatus::Completed,
            html_version: summary.version.to_string(),
            title: features.title,
            headings: features.headings,
            internal_links: features.internal_links,
            external_links: features.external_links,
            broken_links,
            login_form_present: features.login_form_present,
            message: None,
        }
    }

    /// Probes each link once; with concurrency 1 the probes run strictly in order
    async fn count_broken_links(&self, links: &[String]) -> u32 {
        let broken = stream::iter(links.to_vec())
            .map(|link| {
                let verifier = Arc::clone(&self.verifier);
                async move { verifier.is_broken(&link).await }
            })
            .buffered(self.link_concurrency)
            .filter(|is_broken| future::ready(*is_broken))
            .count()
            .await;
        broken as u32
    }

    fn commit(&self, url: &str, result: AnalysisResult) {
        let status = result.status;
        if let Err(e) = self.store.advance(url, result) {
            tracing::warn!("Dropping {} record for {}: {}", status, url, e);
        }
    }
}
