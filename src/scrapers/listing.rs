//! Breaking-news listing crawler.
//!
//! For each section (`sid1` 100 through 110) the crawler walks the day's
//! listing pages and collects article links. The listing never says when it
//! runs out: past the last page it keeps serving the last page again, so a
//! category is exhausted as soon as a page yields exactly the links the
//! previous page did.

use crate::config::CrawlerConfig;
use crate::error::CrawlError;
use crate::scrapers::extractor::parse_selector;
use crate::scrapers::source::PageSource;
use chrono::NaiveDate;
use scraper::Html;
use std::collections::BTreeSet;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument};

const LISTING_URL: &str = "http://news.naver.com/main/list.nhn?mode=LSD&mid=sec";
const LINK_SELECTOR: &str = "div[class^=list] a[href^=http]";
const SITE_DOMAIN: &str = "naver.com";
const ARTICLE_MARKER: &str = "read.nhn?";

/// Pages at or above this number are never fetched.
pub const PAGE_CEILING: u32 = 1000;
/// In debug mode pagination stops once the page counter reaches this value.
pub const DEBUG_PAGE_LIMIT: u32 = 3;

/// Section codes crawled for every date, in order.
pub fn categories() -> Vec<String> {
    (100..=110).map(|sid1| sid1.to_string()).collect()
}

/// URL of one listing page.
pub fn listing_url(sid1: &str, date: NaiveDate, page: u32) -> String {
    format!(
        "{LISTING_URL}&sid1={sid1}&date={}&page={page}",
        date.format("%Y%m%d")
    )
}

/// Article links on one listing page.
///
/// Links must be absolute, on the site domain, and point at an article.
pub fn extract_links(html: &str) -> Result<BTreeSet<String>, CrawlError> {
    let selector = parse_selector(LINK_SELECTOR)?;
    let document = Html::parse_document(html);

    let links = document
        .select(&selector)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.contains(SITE_DOMAIN) && href.contains(ARTICLE_MARKER))
        .map(str::to_string)
        .collect();
    Ok(links)
}

/// Walks listing pages through a [`PageSource`].
#[derive(Debug)]
pub struct ListingCrawler<'a, S> {
    source: &'a S,
    config: &'a CrawlerConfig,
}

impl<'a, S: PageSource> ListingCrawler<'a, S> {
    pub fn new(source: &'a S, config: &'a CrawlerConfig) -> Self {
        Self { source, config }
    }

    /// Collect every article link of one category on `date`.
    ///
    /// Pages are fetched from 1 upward until a page repeats the previous
    /// page's links, the page ceiling is reached, or (in debug mode) the
    /// debug page limit is reached.
    ///
    /// # Arguments
    ///
    /// * `sid1` - Section code, `"100"` through `"110"`
    /// * `date` - Listing date
    ///
    /// # Returns
    ///
    /// The union of the links found on every page crawled.
    ///
    /// # Errors
    ///
    /// A failed listing page aborts the category with [`CrawlError::Fetch`].
    #[instrument(level = "debug", skip(self))]
    pub async fn crawl_category(
        &self,
        sid1: &str,
        date: NaiveDate,
    ) -> Result<BTreeSet<String>, CrawlError> {
        let mut links_in_category = BTreeSet::new();
        let mut last_links = BTreeSet::new();
        let mut page = 1;

        while page < PAGE_CEILING {
            let html = self.source.fetch_html(&listing_url(sid1, date, page)).await?;
            let links = extract_links(&html)?;

            if links == last_links {
                debug!(page, "Listing repeated the previous page");
                break;
            }

            links_in_category.extend(links.iter().cloned());
            last_links = links;

            if self.config.verbose {
                info!(sid1, page, links = links_in_category.len(), "Listing page crawled");
            } else {
                debug!(sid1, page, links = links_in_category.len(), "Listing page crawled");
            }

            page += 1;
            if self.config.debug && page >= DEBUG_PAGE_LIMIT {
                break;
            }
            sleep(self.config.sleep()).await;
        }

        Ok(links_in_category)
    }

    /// Collect article links of every category on `date`.
    ///
    /// A category whose listing fails is logged and skipped; the others still run.
    #[instrument(level = "info", skip(self))]
    pub async fn crawl_all_categories(&self, date: NaiveDate) -> BTreeSet<String> {
        let mut links_in_all = BTreeSet::new();

        for sid1 in categories() {
            match self.crawl_category(&sid1, date).await {
                Ok(links) => {
                    if self.config.verbose {
                        info!(%sid1, links = links.len(), "Category crawled");
                    } else {
                        debug!(%sid1, links = links.len(), "Category crawled");
                    }
                    links_in_all.extend(links);
                }
                Err(e) => {
                    error!(%sid1, error = %e, "Category crawl aborted");
                }
            }
        }

        info!(date = %date.format("%Y%m%d"), count = links_in_all.len(), "Collected article links");
        links_in_all
    }
}
