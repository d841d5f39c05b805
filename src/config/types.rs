use serde::Deserialize;

/// Main configuration structure for Web-Analyzer
///
/// Every section is optional; missing sections fall back to their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(rename = "link-checker", default)]
    pub link_checker: LinkCheckerConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Product name sent in the User-Agent header
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Product version sent in the User-Agent header
    #[serde(default = "default_agent_version")]
    pub version: String,

    /// URL with information about the analyzer, appended as a comment
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `Name/Version` or `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!("{}/{} (+{})", self.name, self.version, contact),
            None => format!("{}/{}", self.name, self.version),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            version: default_agent_version(),
            contact_url: None,
        }
    }
}

/// Document fetcher configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_fetch_timeout")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Maximum number of redirects followed before giving up
    #[serde(rename = "max-redirects", default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            max_redirects: default_max_redirects(),
        }
    }
}

/// Link liveness probe configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LinkCheckerConfig {
    /// Per-link HEAD probe timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_link_timeout")]
    pub timeout_secs: u64,

    /// Number of probes in flight per analysis (1 = strictly sequential)
    #[serde(default = "default_link_concurrency")]
    pub concurrency: usize,
}

impl Default for LinkCheckerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_link_timeout(),
            concurrency: default_link_concurrency(),
        }
    }
}

/// Orchestration configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Maximum number of analyses running at the same time
    #[serde(
        rename = "max-concurrent-analyses",
        default = "default_max_concurrent_analyses"
    )]
    pub max_concurrent_analyses: usize,

    /// Interval between status polls while waiting for results (milliseconds)
    #[serde(rename = "poll-interval-ms", default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_concurrent_analyses: default_max_concurrent_analyses(),
            poll_interval_ms: default_poll_interval(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Path to the markdown report file
    #[serde(rename = "summary-path", default)]
    pub summary_path: Option<String>,
}

fn default_agent_name() -> String {
    "WebAnalyzer".to_string()
}

fn default_agent_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_max_redirects() -> usize {
    10
}

fn default_link_timeout() -> u64 {
    5
}

fn default_link_concurrency() -> usize {
    1
}

fn default_max_concurrent_analyses() -> usize {
    8
}

fn default_poll_interval() -> u64 {
    250
}
