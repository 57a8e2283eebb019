//! Command-line interface definitions.
//!
//! Every global option can also be given through an environment variable.

use crate::models::Layout;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the China Daily bilingual crawler.
///
/// # Examples
///
/// ```sh
/// # Crawl every bilingual news page into china_daily_bilingual.tsv
/// china_daily_bilingual crawl --layout news
///
/// # Crawl the first five pure-English pages into a custom file
/// china_daily_bilingual crawl --layout pure-english --max-pages 5 -o pure.tsv
///
/// # Check the pairing on a single article
/// china_daily_bilingual article --layout news \
///     https://language.chinadaily.com.cn/a/202011/18/WS5fb4a679a31024ad0ba94eb2.html
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by all subcommands.
#[derive(Args, Debug)]
pub struct GlobalOpts {
    /// Site root to crawl
    #[arg(
        long,
        global = true,
        env = "CHINA_DAILY_BASE_URL",
        default_value = "https://language.chinadaily.com.cn/"
    )]
    pub base_url: String,

    /// Maximum concurrent article requests per list page
    #[arg(long, global = true, env = "CHINA_DAILY_CONCURRENCY", default_value_t = 16)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "CHINA_DAILY_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Crawl list pages until one has no items and write all pairs as TSV
    Crawl {
        /// Article layout to crawl
        #[arg(short, long, value_enum)]
        layout: Layout,

        /// Output TSV file (defaults to a per-layout file name)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Stop after this many list pages
        #[arg(long)]
        max_pages: Option<u32>,
    },
    /// Fetch one article and print its pairs as TSV on stdout
    Article {
        /// Article layout of the page
        #[arg(short, long, value_enum)]
        layout: Layout,

        /// Article URL
        url: String,
    },
}
