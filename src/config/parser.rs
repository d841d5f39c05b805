use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use web_analyzer::config::load_config;
///
/// let config = load_config(Path::new("analyzer.toml")).unwrap();
/// println!("Link probe timeout: {}s", config.link_checker.timeout_secs);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from a TOML string
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// The hash is logged at startup so that runs can be matched to the exact
/// configuration they used.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[user-agent]
name = "TestAnalyzer"
version = "2.0"
contact-url = "https://example.com/about"

[fetcher]
timeout-secs = 20
connect-timeout-secs = 5

[link-checker]
timeout-secs = 3
concurrency = 4

[analysis]
max-concurrent-analyses = 2
poll-interval-ms = 50

[output]
summary-path = "./report.md"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.user_agent.name, "TestAnalyzer");
        assert_eq!(config.fetcher.timeout_secs, 20);
        assert_eq!(config.fetcher.max_redirects, 10);
        assert_eq!(config.link_checker.timeout_secs, 3);
        assert_eq!(config.link_checker.concurrency, 4);
        assert_eq!(config.analysis.max_concurrent_analyses, 2);
        assert_eq!(config.output.summary_path.as_deref(), Some("./report.md"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.link_checker.timeout_secs, 5);
        assert_eq!(config.link_checker.concurrency, 1);
        assert_eq!(config.analysis.max_concurrent_analyses, 8);
        assert!(config.output.summary_path.is_none());
    }

    #[test]
    fn test_user_agent_header_value() {
        let config = parse_config(
            r#"
[user-agent]
name = "Probe"
version = "0.3"
contact-url = "https://example.com/bot"
"#,
        )
        .unwrap();
        assert_eq!(
            config.user_agent.header_value(),
            "Probe/0.3 (+https://example.com/bot)"
        );
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/analyzer.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[analysis]
max-concurrent-analyses = 0
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
