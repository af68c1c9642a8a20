//! Page transport.
//!
//! [`PageSource`] is the seam between the crawl logic and the network: the
//! listing crawler and article scraper only ever ask for a page's HTML or a
//! URL's post-redirect location. [`HttpPageSource`] is the reqwest-backed
//! implementation used in production.

use crate::error::CrawlError;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};
use url::Url;

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Something that can fetch pages.
pub trait PageSource {
    /// Fetch `url`, following redirects, and return the body as text.
    async fn fetch_html(&self, url: &str) -> Result<String, CrawlError>;

    /// Fetch `url` and return the URL it finally resolved to.
    ///
    /// Returns `url` unchanged when no redirect happened.
    async fn resolve_redirect(&self, url: &str) -> Result<String, CrawlError>;
}

/// [`PageSource`] over a shared reqwest [`Client`].
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn new() -> Result<Self, CrawlError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| CrawlError::Config(format!("http client: {e}")))?;
        Ok(Self { client })
    }
}

impl PageSource for HttpPageSource {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_html(&self, url: &str) -> Result<String, CrawlError> {
        let t0 = Instant::now();
        let fetch_err = |e: reqwest::Error| CrawlError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let body = self
            .client
            .get(url)
            .send()
            .await
            .map_err(fetch_err)?
            .text()
            .await
            .map_err(fetch_err)?;

        debug!(bytes = body.len(), elapsed_ms = t0.elapsed().as_millis() as u64, "Fetched page");
        Ok(body)
    }

    #[instrument(level = "debug", skip(self))]
    async fn resolve_redirect(&self, url: &str) -> Result<String, CrawlError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(error = %e, "Redirect resolution failed");
            CrawlError::Redirect {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(redirected_or_original(url, response.url()))
    }
}

/// The final URL as a string, or `original` verbatim if nothing changed.
fn redirected_or_original(original: &str, final_url: &Url) -> String {
    match Url::parse(original) {
        Ok(parsed) if &parsed == final_url => original.to_string(),
        _ => final_url.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory [`PageSource`] for tests.

    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    pub struct FakePageSource {
        pages: HashMap<String, String>,
        redirects: HashMap<String, String>,
        broken: Vec<String>,
        pub fetched: RefCell<Vec<String>>,
    }

    impl FakePageSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }

        pub fn with_redirect(mut self, from: &str, to: &str) -> Self {
            self.redirects.insert(from.to_string(), to.to_string());
            self
        }

        /// Any fetch or redirect of `url` fails.
        pub fn with_broken(mut self, url: &str) -> Self {
            self.broken.push(url.to_string());
            self
        }

        pub fn fetch_count(&self) -> usize {
            self.fetched.borrow().len()
        }
    }

    impl PageSource for FakePageSource {
        async fn fetch_html(&self, url: &str) -> Result<String, CrawlError> {
            self.fetched.borrow_mut().push(url.to_string());
            if self.broken.iter().any(|b| b == url) {
                return Err(CrawlError::Fetch {
                    url: url.to_string(),
                    reason: "connection reset".to_string(),
                });
            }
            Ok(self.pages.get(url).cloned().unwrap_or_default())
        }

        async fn resolve_redirect(&self, url: &str) -> Result<String, CrawlError> {
            if self.broken.iter().any(|b| b == url) {
                return Err(CrawlError::Redirect {
                    url: url.to_string(),
                    reason: "dns failure".to_string(),
                });
            }
            Ok(self
                .redirects
                .get(url)
                .cloned()
                .unwrap_or_else(|| url.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirected_or_original_keeps_input_when_unchanged() {
        // Url normalizes a bare host to a trailing slash; the input must survive as-is.
        let original = "http://news.naver.com";
        let final_url = Url::parse("http://news.naver.com/").unwrap();
        assert_eq!(redirected_or_original(original, &final_url), original);
    }

    #[test]
    fn test_redirected_or_original_uses_final() {
        let final_url = Url::parse("https://sports.news.naver.com/news.nhn?oid=1&aid=2").unwrap();
        assert_eq!(
            redirected_or_original("http://news.naver.com/main/read.nhn?oid=1&aid=2", &final_url),
            "https://sports.news.naver.com/news.nhn?oid=1&aid=2"
        );
    }

    #[test]
    fn test_http_page_source_builds() {
        assert!(HttpPageSource::new().is_ok());
    }
}
