//! Link liveness probing
//!
//! A link is broken when a HEAD request to it fails outright (connection
//! error, DNS failure, timeout) or answers with a status code of 400 or above.

use crate::config::{Config, LinkCheckerConfig, UserAgentConfig};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Decides whether a resolved URL is dead
#[async_trait]
pub trait LinkVerifier: Send + Sync {
    async fn is_broken(&self, url: &str) -> bool;
}

/// Builds the client used for HEAD probes
pub fn build_probe_client(
    user_agent: &UserAgentConfig,
    config: &LinkCheckerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
}

/// HEAD-request link verifier
#[derive(Debug, Clone)]
pub struct HttpLinkVerifier {
    client: Client,
}

impl HttpLinkVerifier {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a verifier honoring `[link-checker] timeout-secs`
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        build_probe_client(&config.user_agent, &config.link_checker).map(Self::new)
    }
}

#[async_trait]
impl LinkVerifier for HttpLinkVerifier {
    async fn is_broken(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(response) if response.status().as_u16() >= 400 => {
                tracing::debug!(url, status = response.status().as_u16(), "Broken link detected");
                true
            }
            Ok(_) => false,
            Err(e) => {
                tracing::debug!(url, error = %e, "Link check failed");
                true
            }
        }
    }
}
