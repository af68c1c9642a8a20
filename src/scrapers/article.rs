//! Single-article scraping.
//!
//! [`ArticleScraper::scrape`] normalizes the URL, fetches the resolved page,
//! extracts it with the template matching the URL and returns a whitelisted
//! [`ArticleRecord`]. It never fails: any error is logged with the offending
//! URL and an empty record is returned instead.

use crate::error::CrawlError;
use crate::models::ArticleRecord;
use crate::scrapers::extractor::{PageVariant, extract};
use crate::scrapers::normalize::normalize;
use crate::scrapers::source::PageSource;
use crate::utils::{current_timestamp, truncate_for_log};
use itertools::Itertools;
use scraper::Html;
use tracing::{debug, instrument, warn};

/// Scrapes article pages through a [`PageSource`].
#[derive(Debug)]
pub struct ArticleScraper<'a, S> {
    source: &'a S,
    version: String,
}

impl<'a, S: PageSource> ArticleScraper<'a, S> {
    /// `version` is stamped on every record as `crawlerVersion`.
    pub fn new(source: &'a S, version: impl Into<String>) -> Self {
        Self {
            source,
            version: version.into(),
        }
    }

    /// Scrape one article.
    ///
    /// # Arguments
    ///
    /// * `url` - Article URL as found on a listing page, before redirects
    ///
    /// # Returns
    ///
    /// The whitelisted record of the article. Any failure along the way is
    /// logged with the URL and yields an empty record instead.
    #[instrument(level = "debug", skip(self))]
    pub async fn scrape(&self, url: &str) -> ArticleRecord {
        match self.try_scrape(url).await {
            Ok(record) => {
                debug!(count = record.len(), fields = %record.keys().join(","), "Scraped article");
                record
            }
            Err(e) => {
                warn!(%url, error = %truncate_for_log(&e.to_string(), 300), "Article scrape failed");
                ArticleRecord::default()
            }
        }
    }

    async fn try_scrape(&self, url: &str) -> Result<ArticleRecord, CrawlError> {
        let (resolved, attrs) = normalize(self.source, url).await?;
        let html = self.source.fetch_html(&resolved).await?;

        let extracted = {
            let document = Html::parse_document(&html);
            extract(&document, PageVariant::classify(&resolved))?
        };

        let overlay = [
            ("url", Some(resolved)),
            ("crawlerVersion", Some(self.version.clone())),
            ("crawledTime", Some(current_timestamp())),
        ];
        let fields = extracted
            .into_fields()
            .into_iter()
            .chain(attrs.into_fields())
            .chain(overlay);

        Ok(ArticleRecord::from_fields(fields))
    }
}
