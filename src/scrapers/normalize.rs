//! Article URL normalization.
//!
//! Resolves an article URL's redirects and reads the site/section/article
//! identifiers from its query string. Legacy links spell the identifiers
//! `office_id` and `article_id`; they are read as `oid` and `aid`.
//!
//! Sports and entertainment articles redirect to their own sites, where the
//! numeric `sid1` is meaningless, so it is replaced with `sport` or
//! `entertain` based on the resolved URL.

use crate::error::CrawlError;
use crate::models::UrlAttributes;
use crate::scrapers::source::PageSource;
use std::collections::HashMap;
use tracing::{debug, instrument};

const SPORTS_SITE_MARKER: &str = "sports.news";
const ENTERTAIN_SITE_MARKER: &str = "entertain";

/// Resolve `url` and derive its [`UrlAttributes`].
///
/// Returns the post-redirect URL, which is the authoritative article URL.
///
/// # Errors
///
/// Returns [`CrawlError::Redirect`] when the redirect cannot be followed.
#[instrument(level = "debug", skip(source))]
pub async fn normalize<S: PageSource>(
    source: &S,
    url: &str,
) -> Result<(String, UrlAttributes), CrawlError> {
    let mut attrs = parse_url_attributes(url);
    let resolved = source.resolve_redirect(url).await?;
    attrs.sid1 = mask_sid1(&resolved, attrs.sid1);

    debug!(%resolved, ?attrs, "Normalized article URL");
    Ok((resolved, attrs))
}

/// Read `sid1`, `sid2`, `oid` and `aid` from the query string of `url`.
///
/// The query is the segment between the first and second `?`, and a value
/// ends at the next `=`. Pairs without `=` are ignored and empty values count
/// as absent.
pub fn parse_url_attributes(url: &str) -> UrlAttributes {
    let url = url.replace("office_id", "oid").replace("article_id", "aid");
    let mut pairs: HashMap<&str, &str> = HashMap::new();

    if let Some(query) = url.split('?').nth(1) {
        for part in query.split('&') {
            let mut pieces = part.split('=');
            if let (Some(key), Some(value)) = (pieces.next(), pieces.next()) {
                pairs.insert(key, value);
            }
        }
    }

    let take = |key: &str| {
        pairs
            .get(key)
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
    };
    UrlAttributes {
        sid1: take("sid1"),
        sid2: take("sid2"),
        oid: take("oid"),
        aid: take("aid"),
    }
}

/// Replace a present `sid1` with `sport` or `entertain` for those sites.
pub fn mask_sid1(resolved_url: &str, sid1: Option<String>) -> Option<String> {
    let sid1 = sid1?;
    if resolved_url.contains(SPORTS_SITE_MARKER) {
        Some("sport".to_string())
    } else if resolved_url.contains(ENTERTAIN_SITE_MARKER) {
        Some("entertain".to_string())
    } else {
        Some(sid1)
    }
}
