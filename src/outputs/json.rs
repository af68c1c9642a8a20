//! Per-article JSON output.
//!
//! When `save_articles` is on, every article that makes it into the corpus is
//! also written as a pretty-printed JSON object under `{root}/articles`, at
//! the path given by its storage key.

use crate::error::CrawlError;
use crate::models::ArticleRecord;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, instrument};

/// Write one article record as pretty-printed JSON.
///
/// Parent directories are created as needed and an existing file is
/// overwritten.
///
/// # Arguments
///
/// * `root` - Output root directory
/// * `key` - Storage key of the article, used as its relative path
/// * `record` - The article to write
///
/// # Returns
///
/// The path written, `{root}/articles/{key}`.
///
/// # Errors
///
/// Returns [`CrawlError::Json`] if serialization fails and [`CrawlError::Io`]
/// if the directory or file cannot be written.
#[instrument(level = "debug", skip(root, record))]
pub async fn write_article(
    root: &Path,
    key: &str,
    record: &ArticleRecord,
) -> Result<PathBuf, CrawlError> {
    let json = serde_json::to_string_pretty(record)?;
    let path = root.join("articles").join(key);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(&path, json).await?;
    debug!(path = %path.display(), "Wrote article JSON");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_article_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let record = ArticleRecord::from_fields([
            ("oid", Some("001".to_string())),
            ("title", Some("제목".to_string())),
        ]);

        let path = write_article(dir.path(), "001/2018/03/05/1.json", &record)
            .await
            .unwrap();
        assert_eq!(path, dir.path().join("articles/001/2018/03/05/1.json"));

        let back: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(back["title"], "제목");
        assert_eq!(back["oid"], "001");
    }

    #[tokio::test]
    async fn test_write_article_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let first = ArticleRecord::from_fields([("title", Some("old".to_string()))]);
        let second = ArticleRecord::from_fields([("title", Some("new".to_string()))]);

        write_article(dir.path(), "001/1.json", &first).await.unwrap();
        let path = write_article(dir.path(), "001/1.json", &second).await.unwrap();

        let back: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(back["title"], "new");
    }
}
