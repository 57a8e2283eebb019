//! Data models shared by the crawler, the pairing heuristics and the TSV sink.
//!
//! - [`SentencePair`]: one aligned English/Chinese row
//! - [`Layout`]: which of the two China Daily page layouts is being crawled
//! - [`CrawlStats`]: counters reported once a crawl finishes

use clap::ValueEnum;
use std::fmt;
use url::Url;

use crate::pairing;

/// An aligned English/Chinese sentence pair.
///
/// Both fields are trimmed and non-empty when produced by [`crate::pairing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentencePair {
    /// The English fragment.
    pub en: String,
    /// The Chinese fragment.
    pub zh: String,
}

impl SentencePair {
    pub fn new(en: impl Into<String>, zh: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            zh: zh.into(),
        }
    }
}

/// The two article layouts published on the site.
///
/// | Layout | List pages | Pairing |
/// |--------|------------|---------|
/// | `News` | `news_bilingual/page_{n}.html` | English and Chinese in alternating `<p>` |
/// | `PureEnglish` | `pureenglish.html`, `pureenglish_{n}.html` | Chinese inline after English in one `<p>` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    /// Bilingual news: each English paragraph is followed by its translation.
    News,
    /// Pure English articles with the Chinese translation inlined.
    PureEnglish,
}

impl Layout {
    /// URL of list page `page` (1-based) relative to the site root.
    pub fn list_url(self, base: &Url, page: u32) -> Result<Url, url::ParseError> {
        let path = match self {
            Layout::News => format!("news_bilingual/page_{page}.html"),
            Layout::PureEnglish if page <= 1 => "pureenglish.html".to_string(),
            Layout::PureEnglish => format!("pureenglish_{page}.html"),
        };
        base.join(&path)
    }

    /// CSS selector for article links on a list page.
    pub fn item_selector(self) -> &'static str {
        match self {
            Layout::News => ".gy_box_txt2 a",
            Layout::PureEnglish => ".busBox1 h3 a",
        }
    }

    /// CSS selector for the text paragraphs of an article.
    pub fn paragraph_selector(self) -> &'static str {
        match self {
            Layout::News => ".image ~ p",
            Layout::PureEnglish => "#Content p",
        }
    }

    /// File written when no output path is given.
    pub fn default_output(self) -> &'static str {
        match self {
            Layout::News => "china_daily_bilingual.tsv",
            Layout::PureEnglish => "china_daily_pure.tsv",
        }
    }

    /// Run the pairing heuristic matching this layout.
    pub fn pair(self, paragraphs: &[String]) -> Vec<SentencePair> {
        match self {
            Layout::News => pairing::pair_parallel_paragraphs(paragraphs),
            Layout::PureEnglish => pairing::split_inline_paragraphs(paragraphs),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::News => f.write_str("news"),
            Layout::PureEnglish => f.write_str("pure-english"),
        }
    }
}

/// Totals for one crawl run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CrawlStats {
    /// List pages that yielded at least one article link.
    pub pages: u32,
    /// Articles fetched successfully.
    pub articles: usize,
    /// Articles whose fetch failed and were skipped.
    pub failed_articles: usize,
    /// Rows written to the sink.
    pub pairs: usize,
}
