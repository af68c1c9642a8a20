//! Daily corpus assembly.
//!
//! [`BatchRunner`] feeds every link the listing crawler finds for one date
//! through the article scraper, and folds each article with body text into a
//! [`CorpusBatch`]. Articles without content are skipped silently; they are
//! neither appended nor counted.

use crate::config::CrawlerConfig;
use crate::models::{ArticleRecord, CorpusBatch};
use crate::outputs::json::write_article;
use crate::scrapers::article::ArticleScraper;
use crate::scrapers::listing::ListingCrawler;
use crate::scrapers::source::PageSource;
use crate::utils::{storage_path_key, throttle};
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use tracing::{info, instrument, warn};

const PROGRESS_EVERY: usize = 1000;

/// Builds the corpus of one date.
#[derive(Debug)]
pub struct BatchRunner<'a, S> {
    source: &'a S,
    config: &'a CrawlerConfig,
    date: NaiveDate,
}

impl<'a, S: PageSource> BatchRunner<'a, S> {
    pub fn new(source: &'a S, config: &'a CrawlerConfig, date: NaiveDate) -> Self {
        Self {
            source,
            config,
            date,
        }
    }

    /// Crawl the listing for the date and scrape every link found.
    #[instrument(level = "info", skip(self), fields(date = %self.date))]
    pub async fn scrape_a_day_as_corpus(&self) -> CorpusBatch {
        let urls = ListingCrawler::new(self.source, self.config)
            .crawl_all_categories(self.date)
            .await;
        self.scrape_urls(urls.into_iter().collect()).await
    }

    /// Scrape `urls` in order and collect those with content.
    pub async fn scrape_urls(&self, urls: Vec<String>) -> CorpusBatch {
        let scraper = ArticleScraper::new(self.source, self.config.version.clone());
        let scraper = &scraper;
        let total = urls.len();

        let batch = stream::iter(urls.into_iter().enumerate())
            .then(|(i, url)| async move {
                throttle(self.config.article_delay(), self.config.article_jitter_ms).await;
                (i, url.clone(), scraper.scrape(&url).await)
            })
            .fold(CorpusBatch::default(), |mut batch, (i, url, record)| async move {
                self.append(&mut batch, &url, &record).await;
                if i % PROGRESS_EVERY == PROGRESS_EVERY - 1 {
                    info!(
                        name = %self.config.name,
                        processed = i + 1,
                        total,
                        successes = batch.successes,
                        "Scraping progress"
                    );
                }
                batch
            })
            .await;

        info!(
            name = %self.config.name,
            total,
            successes = batch.successes,
            "Scraped news"
        );
        batch
    }

    async fn append(&self, batch: &mut CorpusBatch, url: &str, record: &ArticleRecord) {
        let Some(content) = record.get("content") else {
            return;
        };
        let (Some(oid), Some(aid)) = (record.get("oid"), record.get("aid")) else {
            warn!(%url, "Article has content but no oid/aid; skipping");
            return;
        };

        let key = storage_path_key(
            oid,
            &self.date.format("%Y").to_string(),
            &self.date.format("%m").to_string(),
            &self.date.format("%d").to_string(),
            aid,
        );
        let index_line = [
            key.as_str(),
            record.get("sid1").unwrap_or(""),
            record.get("writtenTime").unwrap_or(""),
            record.get("title").unwrap_or(""),
        ]
        .iter()
        .join("\t");
        let doc = content
            .replace("\r\n", "  ")
            .replace('\n', "  ")
            .trim()
            .to_string();

        if self.config.save_articles {
            if let Err(e) = write_article(&self.config.root, &key, record).await {
                warn!(%url, error = %e, "Failed to save article JSON");
            }
        }

        batch.push(doc, index_line, oid.to_string(), aid.to_string());
    }
}
