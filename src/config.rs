//! Crawler configuration.
//!
//! A [`CrawlerConfig`] is built once in `main` (from an optional YAML file plus
//! command-line overrides) and handed to every component that needs it. There
//! is no global configuration state.
//!
//! # Example `config.yaml`
//!
//! ```yaml
//! root: /data/naver
//! version: "1.2"
//! sleep_ms: 200
//! article_delay_ms: 50
//! article_jitter_ms: 100
//! verbose: true
//! ```

use crate::error::CrawlError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument};

/// Settings shared by the listing crawler, article scraper and batch runner.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Root directory for corpus and article output.
    pub root: PathBuf,
    /// Version string stamped on every record as `crawlerVersion`.
    pub version: String,
    /// Pause after each listing-page fetch, in milliseconds.
    pub sleep_ms: u64,
    /// Pause before each article fetch, in milliseconds.
    pub article_delay_ms: u64,
    /// Upper bound of the random jitter added to `article_delay_ms`.
    pub article_jitter_ms: u64,
    /// Stop paginating each category early.
    pub debug: bool,
    /// Log per-page and per-category progress at `info`.
    pub verbose: bool,
    /// Label used in progress logs.
    pub name: String,
    /// Also write every successful record as JSON under `root/articles`.
    pub save_articles: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./data"),
            version: "0.0".to_string(),
            sleep_ms: 100,
            article_delay_ms: 0,
            article_jitter_ms: 0,
            debug: false,
            verbose: false,
            name: String::new(),
            save_articles: false,
        }
    }
}

impl CrawlerConfig {
    /// Load a configuration from a YAML file. Missing keys take their defaults.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CrawlError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: CrawlerConfig = serde_yaml::from_str(&raw)?;
        info!(root = %config.root.display(), version = %config.version, "Loaded configuration");
        Ok(config)
    }

    /// Interval between listing-page requests.
    pub fn sleep(&self) -> Duration {
        Duration::from_millis(self.sleep_ms)
    }

    /// Base interval between article requests.
    pub fn article_delay(&self) -> Duration {
        Duration::from_millis(self.article_delay_ms)
    }
}
