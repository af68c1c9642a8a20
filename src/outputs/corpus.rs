//! Corpus file output.
//!
//! A day's [`CorpusBatch`] becomes two files side by side: the documents,
//! one per line, and the index lines describing them, aligned by line number.

use crate::error::CrawlError;
use crate::models::CorpusBatch;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Paths of the corpus and index files for `date` under `root`.
///
/// Both live in `{root}/corpus/YYYY/` and are named `YYYY-MM-DD.txt` and
/// `YYYY-MM-DD.index`.
pub fn corpus_paths(root: &Path, date: NaiveDate) -> (PathBuf, PathBuf) {
    let dir = root.join("corpus").join(date.format("%Y").to_string());
    let stem = date.format("%Y-%m-%d").to_string();
    (
        dir.join(format!("{stem}.txt")),
        dir.join(format!("{stem}.index")),
    )
}

/// Write the documents and index lines of `batch`.
///
/// Documents and index lines are joined with `\n`, so line `i` of the index
/// describes line `i` of the corpus. An empty batch writes empty files.
///
/// # Arguments
///
/// * `root` - Output root directory
/// * `date` - The crawled date, which names the files
/// * `batch` - Documents and index lines collected for `date`
///
/// # Returns
///
/// The `(corpus, index)` paths written.
///
/// # Errors
///
/// Returns [`CrawlError::Io`] if the directory or either file cannot be written.
#[instrument(level = "info", skip(root, batch), fields(root = %root.display(), docs = batch.len()))]
pub async fn write_corpus(
    root: &Path,
    date: NaiveDate,
    batch: &CorpusBatch,
) -> Result<(PathBuf, PathBuf), CrawlError> {
    let (corpus_path, index_path) = corpus_paths(root, date);
    if let Some(dir) = corpus_path.parent() {
        fs::create_dir_all(dir).await?;
    }

    fs::write(&corpus_path, batch.docs.join("\n")).await?;
    fs::write(&index_path, batch.index_lines.join("\n")).await?;

    info!(
        corpus = %corpus_path.display(),
        index = %index_path.display(),
        "Wrote corpus"
    );
    Ok((corpus_path, index_path))
}
