//! Runtime configuration loaded from a TOML file.
//!
//! Every field has a default, so a missing file or a partial one still
//! yields a usable [`Config`].

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::defaults;
use crate::source::NewsSource;

/// Config file read when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "livescroll.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    /// Sources the registry starts with. Falls back to the built-in list
    /// when the file names none.
    #[serde(default)]
    pub sources: Vec<NewsSource>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Seed the feed with the welcome item before the first fetch lands.
    #[serde(default = "default_placeholder")]
    pub placeholder: bool,
}

fn default_interval_secs() -> u64 { 300 }
fn default_placeholder() -> bool { true }

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            placeholder: default_placeholder(),
        }
    }
}

impl RefreshConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_ms() -> u64 { 10_000 }
fn default_user_agent() -> String {
    concat!("livescroll-news/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpConfig {
    /// Build the shared HTTP client for fetchers and discovery.
    pub fn client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .timeout(Duration::from_millis(self.timeout_ms))
            .build()
            .context("Failed to build HTTP client")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DiscoveryConfig {
    /// Web pages scanned for advertised RSS feeds.
    #[serde(default = "defaults::seed_pages")]
    pub seed_pages: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            seed_pages: defaults::seed_pages(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .with_context(|| "Failed to parse config TOML")?;
        if config.refresh.interval_secs == 0 {
            bail!("refresh.interval_secs must be greater than zero");
        }
        Ok(config)
    }

    /// The registry contents to start with.
    pub fn initial_sources(&self) -> Vec<NewsSource> {
        if self.sources.is_empty() {
            defaults::default_sources()
        } else {
            self.sources.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.refresh.interval(), Duration::from_secs(300));
        assert!(config.refresh.placeholder);
        assert_eq!(config.http.timeout_ms, 10_000);
        assert!(config.http.user_agent.starts_with("livescroll-news/"));
        assert_eq!(config.discovery.seed_pages, defaults::seed_pages());
        assert_eq!(config.initial_sources(), defaults::default_sources());
    }

    #[test]
    fn parses_all_sections() {
        let config = Config::parse(
            r#"
[refresh]
interval_secs = 60
placeholder = false

[http]
timeout_ms = 2500
user_agent = "test-agent"

[discovery]
seed_pages = ["https://example.com"]

[[sources]]
url = "https://example.com/a.xml"
name = "A"
category = "tech"

[[sources]]
url = "https://example.com/b.xml"
name = "B"
"#,
        )
        .unwrap();

        assert_eq!(config.refresh.interval(), Duration::from_secs(60));
        assert!(!config.refresh.placeholder);
        assert_eq!(config.http.timeout_ms, 2500);
        assert_eq!(config.http.user_agent, "test-agent");
        assert_eq!(config.discovery.seed_pages, vec!["https://example.com"]);

        let sources = config.initial_sources();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0], NewsSource::new("https://example.com/a.xml", "A").with_category("tech"));
        assert_eq!(sources[1].category, None);
    }

    #[test]
    fn rejects_zero_interval() {
        let err = Config::parse("[refresh]\ninterval_secs = 0\n").unwrap_err();
        assert!(err.to_string().contains("interval_secs"));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(Config::parse("[refresh\n").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default(Path::new("/nonexistent/livescroll.toml")).unwrap();
        assert_eq!(config.refresh.interval_secs, 300);
    }

    #[test]
    fn http_client_builds_from_defaults() {
        assert!(HttpConfig::default().client().is_ok());
    }
}
