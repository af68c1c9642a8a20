//! # Naver News Corpus
//!
//! Crawls one day of Naver News "breaking news" listings, scrapes every
//! article found and writes the day's plain-text corpus with its index.
//!
//! ## Usage
//!
//! ```sh
//! naver_news_corpus --date 2018-03-05 --root ./data
//! ```
//!
//! ## Architecture
//!
//! The pipeline runs strictly sequentially:
//! 1. **Listing**: page through each section's listing until it repeats
//! 2. **Scraping**: resolve, fetch and parse each article into a record
//! 3. **Assembly**: keep articles with body text as documents and index lines
//! 4. **Output**: write the corpus and index files (and optional article JSON)

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod batch;
mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod scrapers;
mod utils;

use batch::BatchRunner;
use cli::Cli;
use outputs::corpus::write_corpus;
use scrapers::source::HttpPageSource;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!(version = env!("CARGO_PKG_VERSION"), "naver_news_corpus starting up");

    let args = Cli::parse();
    let date = args.date()?;
    let config = args.load_config()?;
    debug!(?config, %date, "Resolved configuration");

    // Fail before crawling if the output cannot be written.
    if let Err(e) = ensure_writable_dir(&config.root).await {
        error!(
            path = %config.root.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different root)"
        );
        return Err(e);
    }

    let source = HttpPageSource::new()?;
    let batch = BatchRunner::new(&source, &config, date)
        .scrape_a_day_as_corpus()
        .await;

    if batch.is_empty() {
        warn!(%date, "No article with body text was collected; writing an empty corpus");
    }

    if let Err(e) = write_corpus(&config.root, date, &batch).await {
        error!(error = %e, "Failed to write corpus");
        return Err(e.into());
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        documents = batch.successes,
        %date,
        "Execution complete"
    );

    Ok(())
}
