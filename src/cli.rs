//! Command-line interface definitions.
//!
//! Every option except `--date` can also come from a YAML config file given
//! with `--config`; flags given on the command line win over the file.

use crate::config::CrawlerConfig;
use crate::error::CrawlError;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Crawl one day into ./data
/// naver_news_corpus --date 2018-03-05
///
/// # Quick run over the first listing pages only
/// naver_news_corpus --date 2018-03-05 --debug --verbose
///
/// # Settings from a file, output root overridden
/// naver_news_corpus --date 2018-03-05 -c config.yaml --root /data/naver
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Date to crawl, as YYYY-MM-DD
    #[arg(short, long)]
    pub date: String,

    /// Optional path to a config.yaml file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output root directory
    #[arg(short, long, env = "NAVER_CORPUS_ROOT")]
    pub root: Option<PathBuf>,

    /// Pause after each listing page, in milliseconds
    #[arg(long)]
    pub sleep_ms: Option<u64>,

    /// Version string recorded on every article
    #[arg(long)]
    pub crawler_version: Option<String>,

    /// Label shown in progress logs
    #[arg(long)]
    pub name: Option<String>,

    /// Only crawl the first listing pages of each section
    #[arg(long)]
    pub debug: bool,

    /// Log per-page and per-section progress
    #[arg(short, long)]
    pub verbose: bool,

    /// Also save every article as JSON
    #[arg(long)]
    pub save_articles: bool,
}

impl Cli {
    /// The crawl date.
    ///
    /// # Returns
    ///
    /// The `--date` value parsed as `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlError::Config`] if the value is not a valid date.
    pub fn date(&self) -> Result<NaiveDate, CrawlError> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|e| CrawlError::Config(format!("invalid date {:?}: {e}", self.date)))
    }

    /// Apply command-line overrides on top of `config`.
    ///
    /// Options that were given replace the file values; boolean flags can
    /// only switch a setting on.
    ///
    /// # Arguments
    ///
    /// * `config` - Settings loaded from the config file, or the defaults
    ///
    /// # Returns
    ///
    /// The configuration with every given flag applied.
    pub fn apply(&self, mut config: CrawlerConfig) -> CrawlerConfig {
        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        if let Some(sleep_ms) = self.sleep_ms {
            config.sleep_ms = sleep_ms;
        }
        if let Some(version) = &self.crawler_version {
            config.version = version.clone();
        }
        if let Some(name) = &self.name {
            config.name = name.clone();
        }
        config.debug |= self.debug;
        config.verbose |= self.verbose;
        config.save_articles |= self.save_articles;
        config
    }

    /// Resolve the effective configuration: file (if any), then flags.
    ///
    /// # Returns
    ///
    /// The defaults, overlaid by the `--config` file when given, overlaid by
    /// the command-line flags.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlError::Io`] or [`CrawlError::Yaml`] if the config file
    /// cannot be read or parsed.
    pub fn load_config(&self) -> Result<CrawlerConfig, CrawlError> {
        let base = match &self.config {
            Some(path) => CrawlerConfig::load(path)?,
            None => CrawlerConfig::default(),
        };
        Ok(self.apply(base))
    }
}
