//! # China Daily Bilingual
//!
//! Crawls the China Daily language-learning site and collects aligned
//! English/Chinese sentence pairs into a tab-separated file.
//!
//! ## Usage
//!
//! ```sh
//! china_daily_bilingual crawl --layout news
//! china_daily_bilingual crawl --layout pure-english -o pure.tsv
//! ```
//!
//! ## Architecture
//!
//! 1. **Indexing**: read list page `n` of the chosen layout
//! 2. **Fetching**: download that page's articles concurrently
//! 3. **Pairing**: align English and Chinese paragraphs
//! 4. **Output**: append `en<TAB>zh` rows, flushing after each page
//!
//! The loop ends at the first list page without items.

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod models;
mod outputs;
mod pairing;
mod scrapers;
mod utils;

use cli::{Cli, Command, GlobalOpts};
use models::Layout;
use outputs::tsv::TsvWriter;
use scrapers::chinadaily::{CrawlConfig, Crawler};
use utils::{ensure_parent_dir, normalize_base_url};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    // Logs go to stderr so `article` output on stdout stays clean TSV.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    match args.command {
        Command::Crawl {
            layout,
            output,
            max_pages,
        } => {
            let output = output.unwrap_or_else(|| PathBuf::from(layout.default_output()));
            run_crawl(&args.global, layout, output, max_pages).await
        }
        Command::Article { layout, url } => run_article(&args.global, layout, &url).await,
    }
}

fn crawl_config(
    global: &GlobalOpts,
    layout: Layout,
    max_pages: Option<u32>,
) -> Result<CrawlConfig, Box<dyn Error>> {
    Ok(CrawlConfig {
        base_url: normalize_base_url(&global.base_url)?,
        layout,
        concurrency: global.concurrency,
        timeout: Duration::from_secs(global.timeout_secs),
        max_pages,
    })
}

#[instrument(level = "info", skip(global), fields(output = %output.display()))]
async fn run_crawl(
    global: &GlobalOpts,
    layout: Layout,
    output: PathBuf,
    max_pages: Option<u32>,
) -> Result<(), Box<dyn Error>> {
    let start_time = std::time::Instant::now();
    info!("Crawl starting up");

    // Early check: fail before any request if the output can't be written
    if let Err(e) = ensure_parent_dir(&output).await {
        error!(
            path = %output.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let crawler = Crawler::new(crawl_config(global, layout, max_pages)?)?;
    let mut sink = TsvWriter::create(&output).await?;
    let stats = crawler.crawl(&mut sink).await?;
    let rows = sink.rows();
    sink.into_inner().await?;

    let elapsed = start_time.elapsed();
    info!(
        pages = stats.pages,
        articles = stats.articles,
        failed_articles = stats.failed_articles,
        pairs = stats.pairs,
        rows,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

#[instrument(level = "info", skip(global))]
async fn run_article(global: &GlobalOpts, layout: Layout, url: &str) -> Result<(), Box<dyn Error>> {
    let crawler = Crawler::new(crawl_config(global, layout, None)?)?;
    let pairs = crawler.fetch_article(url).await?;

    let mut sink = TsvWriter::new(tokio::io::stdout());
    sink.write_pairs(&pairs).await?;
    sink.flush().await?;
    info!(pairs = pairs.len(), "Article done");
    Ok(())
}
