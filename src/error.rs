//! Error types for the crawler.
//!
//! Missing selector matches are not errors: extraction reports them as `None`
//! and they flow through to the record as absent fields.

use thiserror::Error;

/// Errors raised while crawling listing pages or scraping articles.
#[derive(Error, Debug)]
pub enum CrawlError {
    /// Transport failure while following an article URL's redirects.
    #[error("redirection error for {url}: {reason}")]
    Redirect { url: String, reason: String },

    /// Transport or decoding failure while fetching a page.
    #[error("fetch error for {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// A CSS selector failed to parse.
    #[error("invalid selector: {0}")]
    Selector(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid configuration or command-line input.
    #[error("configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_error_mentions_url() {
        let e = CrawlError::Redirect {
            url: "http://news.naver.com/x".into(),
            reason: "connection refused".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("http://news.naver.com/x"));
        assert!(msg.contains("connection refused"));
    }
}
