//! Utility functions for timestamps, storage keys, throttling and file system checks.
//!
//! - Capture-time timestamps for `crawledTime`
//! - Storage keys for the corpus index lines
//! - Log-friendly truncation of long values
//! - Output directory validation

use chrono::Local;
use rand::{Rng, rng};
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tokio::time::sleep;
use tracing::{debug, info, instrument};

/// Current local time, used as the `crawledTime` of an article.
///
/// # Returns
///
/// The time formatted as `YYYY-MM-DD HH:MM:SS`.
pub fn current_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Deterministic storage key of one article.
///
/// This is the first column of a corpus index line and the relative path of
/// the article's JSON file when articles are saved.
///
/// # Arguments
///
/// * `oid` - Office (publisher) identifier
/// * `year`, `month`, `day` - Crawled date parts, zero-padded
/// * `aid` - Article identifier
///
/// # Returns
///
/// The key `{oid}/{year}/{month}/{day}/{aid}.json`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(storage_path_key("001", "2018", "03", "05", "0009"), "001/2018/03/05/0009.json");
/// ```
pub fn storage_path_key(oid: &str, year: &str, month: &str, day: &str, aid: &str) -> String {
    format!("{oid}/{year}/{month}/{day}/{aid}.json")
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (on a char boundary) with an
/// ellipsis and byte count appended.
///
/// # Arguments
///
/// * `s` - The string to potentially truncate
/// * `max` - Maximum number of bytes to keep
///
/// # Returns
///
/// The original string if it fits in `max` bytes, otherwise the cut string
/// with `"…(+N bytes)"` appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Sleep for `base` plus a random jitter of up to `jitter_ms` milliseconds.
///
/// # Arguments
///
/// * `base` - Fixed part of the delay
/// * `jitter_ms` - Upper bound (inclusive) of the random extra delay
///
/// Returns immediately when both are zero.
pub async fn throttle(base: Duration, jitter_ms: u64) {
    let jitter = if jitter_ms > 0 {
        Duration::from_millis(rng().random_range(0..=jitter_ms))
    } else {
        Duration::ZERO
    };
    let delay = base + jitter;
    if !delay.is_zero() {
        debug!(?delay, "Throttling");
        sleep(delay).await;
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then creates and removes a scratch file
/// to confirm write access.
///
/// # Arguments
///
/// * `path` - The directory path to validate
///
/// # Returns
///
/// `Ok(())` if the directory exists and is writable, or an error describing
/// the failure.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let scratch_path = path.join("..__write_check__");
    match stdfs::File::create(&scratch_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&scratch_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
