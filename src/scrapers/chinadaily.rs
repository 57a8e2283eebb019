//! China Daily language-learning site crawler.
//!
//! Walks the numbered list pages of one [`Layout`], fetches the articles linked
//! from each page and turns their paragraphs into [`SentencePair`]s.
//!
//! # URL Pattern
//!
//! List pages live directly under the site root (see [`Layout::list_url`]).
//! Bilingual news pages link articles with protocol-relative URLs such as
//! `//language.chinadaily.com.cn/a/202011/18/WS5fb4a679a31024ad0ba94eb2.html`;
//! they are resolved against the list page, so they inherit its scheme.

use crate::models::{CrawlStats, Layout, SentencePair};
use crate::outputs::tsv::TsvWriter;
use futures::stream::{self, StreamExt};
use reqwest::{Client, Response};
use scraper::{Html, Selector};
use std::error::Error;
use std::time::Duration;
use tokio::io::AsyncWrite;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Settings for one crawl.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Site root; must end with `/`.
    pub base_url: Url,
    pub layout: Layout,
    /// Maximum number of article requests in flight for one list page.
    pub concurrency: usize,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Stop after this many list pages even if more exist.
    pub max_pages: Option<u32>,
}

/// Crawler bound to a single layout and a shared HTTP client.
pub struct Crawler {
    client: Client,
    config: CrawlConfig,
}

impl Crawler {
    pub fn new(config: CrawlConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// Index list page `page` and return its article URLs.
    ///
    /// An HTTP error status marks the end of pagination and yields an empty
    /// list. Transport failures are returned as errors.
    #[instrument(level = "info", skip(self), fields(layout = %self.config.layout))]
    pub async fn index_page(&self, page: u32) -> Result<Vec<String>, Box<dyn Error>> {
        let url = self.config.layout.list_url(&self.config.base_url, page)?;
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status();
        if status.is_client_error() || status.is_server_error() {
            warn!(%url, %status, "List page returned an error status; treating it as the last page");
            return Ok(Vec::new());
        }

        let html = read_utf8(resp).await?;
        let article_urls = extract_links(&html, self.config.layout.item_selector(), &url)?;
        info!(
            count = article_urls.len(),
            source = %url,
            "Indexed article URLs"
        );
        debug!(urls = ?article_urls, "Article URLs");
        Ok(article_urls)
    }

    /// Fetch a single article and pair its paragraphs.
    #[instrument(level = "info", skip(self), fields(layout = %self.config.layout))]
    pub async fn fetch_article(&self, url: &str) -> Result<Vec<SentencePair>, Box<dyn Error>> {
        let resp = self.client.get(url).send().await?.error_for_status()?;
        let html = read_utf8(resp).await?;
        let paragraphs = extract_paragraphs(&html, self.config.layout.paragraph_selector())?;
        let pairs = self.config.layout.pair(&paragraphs);
        info!(
            paragraphs = paragraphs.len(),
            pairs = pairs.len(),
            "Parsed article"
        );
        Ok(pairs)
    }

    /// Fetch all articles of one list page concurrently.
    ///
    /// Results keep the order of `urls`. Failed fetches are logged and
    /// skipped; their count is returned alongside the successful results.
    #[instrument(level = "info", skip_all, fields(count = urls.len()))]
    pub async fn fetch_articles(&self, urls: Vec<String>) -> (Vec<Vec<SentencePair>>, usize) {
        let results: Vec<Option<Vec<SentencePair>>> = stream::iter(urls)
            .map(|url| async move {
                match self.fetch_article(&url).await {
                    Ok(pairs) => {
                        if pairs.is_empty() {
                            warn!(%url, "Article produced no sentence pairs");
                        }
                        Some(pairs)
                    }
                    Err(e) => {
                        error!(error = %e, %url, "Article fetch failed");
                        None
                    }
                }
            })
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        let failed = results.iter().filter(|r| r.is_none()).count();
        let articles: Vec<Vec<SentencePair>> = results.into_iter().flatten().collect();
        info!(fetched = articles.len(), failed, "Fetched article contents");
        (articles, failed)
    }

    /// Crawl list pages 1, 2, … until one has no items, writing every pair to
    /// `sink` in page and article order.
    ///
    /// The sink is flushed after each page, so an interrupted crawl keeps the
    /// rows of every completed page.
    #[instrument(level = "info", skip_all, fields(layout = %self.config.layout, base = %self.config.base_url))]
    pub async fn crawl<W>(&self, sink: &mut TsvWriter<W>) -> Result<CrawlStats, Box<dyn Error>>
    where
        W: AsyncWrite + Unpin,
    {
        let mut stats = CrawlStats::default();
        let mut page = 0u32;
        loop {
            page += 1;
            if self.config.max_pages.is_some_and(|max| page > max) {
                info!(pages = stats.pages, "Reached page limit");
                break;
            }

            let urls = self.index_page(page).await?;
            if urls.is_empty() {
                info!(page, "List page has no items; crawl finished");
                break;
            }
            stats.pages += 1;

            let requested = urls.len();
            let (articles, failed) = self.fetch_articles(urls).await;
            stats.articles += requested - failed;
            stats.failed_articles += failed;

            let mut page_pairs = 0;
            for pairs in &articles {
                page_pairs += sink.write_pairs(pairs).await?;
            }
            sink.flush().await?;
            stats.pairs += page_pairs;

            info!(
                page,
                pairs = page_pairs,
                total_pairs = stats.pairs,
                "Page complete"
            );
        }
        Ok(stats)
    }
}

/// Read a response body as UTF-8, replacing invalid sequences.
async fn read_utf8(resp: Response) -> Result<String, reqwest::Error> {
    let bytes = resp.bytes().await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Collect the `href` of every element matching `selector`, resolved against
/// `page_url`. Empty and unresolvable links are skipped.
pub fn extract_links(
    html: &str,
    selector: &'static str,
    page_url: &Url,
) -> Result<Vec<String>, Box<dyn Error>> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(selector)?;

    let mut links = Vec::new();
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href").map(str::trim) else {
            continue;
        };
        if href.is_empty() {
            continue;
        }
        match page_url.join(href) {
            Ok(resolved) => links.push(resolved.to_string()),
            Err(e) => debug!(%href, error = %e, "Skipping unresolvable link"),
        }
    }
    Ok(links)
}

/// Full text content of every element matching `selector`, in document order.
pub fn extract_paragraphs(html: &str, selector: &'static str) -> Result<Vec<String>, Box<dyn Error>> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(selector)?;
    Ok(document
        .select(&selector)
        .map(|element| element.text().collect::<String>())
        .collect())
}
