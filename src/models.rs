//! Data models shared by the crawl pipeline.
//!
//! - [`ArticleRecord`]: the normalized, whitelisted output of one article scrape
//! - [`UrlAttributes`]: identifiers parsed from an article URL's query string
//! - [`CorpusBatch`]: the three index-aligned corpus sequences for one date
//!
//! Field names are camelCase to keep the records compatible with the JSON the
//! corpus consumers already read.

use serde::Serialize;
use std::collections::BTreeMap;

/// The only keys an [`ArticleRecord`] may carry.
pub const RECORD_FIELDS: [&str; 12] = [
    "sid1",
    "sid2",
    "oid",
    "aid",
    "url",
    "office",
    "title",
    "contentHtml",
    "content",
    "crawledTime",
    "writtenTime",
    "crawlerVersion",
];

/// A scraped article as a flat map of whitelisted field names to non-empty values.
///
/// Records are built once through [`ArticleRecord::from_fields`] and never
/// mutated afterwards. An empty record stands for a failed scrape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArticleRecord(BTreeMap<String, String>);

impl ArticleRecord {
    /// Build a record from `(key, value)` pairs.
    ///
    /// Later pairs overwrite earlier ones with the same key, including with
    /// `None`. After merging, keys outside [`RECORD_FIELDS`] and keys whose
    /// value is absent or empty are dropped.
    pub fn from_fields<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: Into<String>,
    {
        let mut merged: BTreeMap<String, Option<String>> = BTreeMap::new();
        for (key, value) in fields {
            merged.insert(key.into(), value);
        }

        let kept = merged
            .into_iter()
            .filter(|(key, _)| RECORD_FIELDS.contains(&key.as_str()))
            .filter_map(|(key, value)| match value {
                Some(v) if !v.is_empty() => Some((key, v)),
                _ => None,
            })
            .collect();
        Self(kept)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Site, section and article identifiers taken from an article URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlAttributes {
    /// Primary section code, masked to `sport`/`entertain` for those sites.
    pub sid1: Option<String>,
    /// Secondary section code.
    pub sid2: Option<String>,
    /// Office (publisher) identifier.
    pub oid: Option<String>,
    /// Article identifier.
    pub aid: Option<String>,
}

impl UrlAttributes {
    /// The attributes as record fields, absent values included.
    pub fn into_fields(self) -> [(&'static str, Option<String>); 4] {
        [
            ("sid1", self.sid1),
            ("sid2", self.sid2),
            ("oid", self.oid),
            ("aid", self.aid),
        ]
    }
}

/// The corpus for one date: three sequences aligned by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusBatch {
    /// One line of body text per article.
    pub docs: Vec<String>,
    /// One tab-separated metadata line per article.
    pub index_lines: Vec<String>,
    /// `(oid, aid)` per article.
    pub oid_aids: Vec<(String, String)>,
    /// Number of articles appended.
    pub successes: usize,
}

impl CorpusBatch {
    pub fn push(&mut self, doc: String, index_line: String, oid: String, aid: String) {
        self.docs.push(doc);
        self.index_lines.push(index_line);
        self.oid_aids.push((oid, aid));
        self.successes += 1;
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}
