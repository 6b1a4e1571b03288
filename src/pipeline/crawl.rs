// src/pipeline/crawl.rs

//! Crawl loop.
//!
//! Drives fetcher and parsers over a listing range or a single article.
//! Per-page and per-article failures are isolated: they are logged,
//! counted and skipped. Only output write failures end a range run.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use futures::stream::{self, StreamExt};

use crate::error::Result;
use crate::models::{CrawlStats, CrawlerConfig, ItemRecord, LinkRef, OutputConfig};
use crate::services::{ArticleParser, FetchOutcome, ListingParser, PageSource, RateLimiter};
use crate::storage::{ERROR_MARKER, RecordSink, WriteMode, to_pretty_json, write_text};
use crate::utils::url::{article_url, listing_url};

/// Why an article produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Non-200 response
    InvalidUrl { status: u16, url: String },
    /// Connection, TLS or body read failure
    Transport(String),
    /// Markup did not have the expected shape
    Unparsable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrl { status, url } => write!(f, "invalid url: {url} (status {status})"),
            Self::Transport(message) => write!(f, "request failed: {message}"),
            Self::Unparsable(message) => write!(f, "unparsable: {message}"),
        }
    }
}

/// Result of processing one article inside a range crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Parsed(ItemRecord),
    Skipped(SkipReason),
}

/// Result of a single-article crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SingleOutcome {
    /// Record written as the whole file
    Written(ItemRecord),
    /// Page not fetched; the error marker was written instead
    InvalidUrl { status: u16, url: String },
}

/// Sequential crawler over one site.
pub struct Crawler<S> {
    source: S,
    limiter: RateLimiter,
    listing: ListingParser,
    article: ArticleParser,
    base_url: String,
    max_concurrent: usize,
    dedupe: bool,
}

impl<S: PageSource> Crawler<S> {
    /// Create a crawler fetching through `source`.
    pub fn new(source: S, crawler: &CrawlerConfig, output: &OutputConfig) -> Result<Self> {
        Ok(Self {
            source,
            limiter: RateLimiter::from_millis(crawler.request_delay_ms),
            listing: ListingParser::new(&crawler.base_url)?,
            article: ArticleParser::new()?,
            base_url: crawler.base_url.clone(),
            max_concurrent: crawler.max_concurrent.max(1),
            dedupe: output.dedupe,
        })
    }

    /// Crawl listing pages `start..=end` of `board` into `sink`.
    ///
    /// Articles are emitted in listing order, pages in ascending order.
    pub async fn run_range(
        &self,
        board: &str,
        start: u32,
        end: u32,
        sink: &mut dyn RecordSink,
    ) -> Result<CrawlStats> {
        let mut stats = CrawlStats::started();
        let mut seen = HashSet::new();

        sink.begin().await?;

        for index in start..=end {
            stats.pages_total += 1;
            log::info!("Processing index: {}", index);

            let Some(links) = self.fetch_listing(board, index).await else {
                stats.pages_failed += 1;
                continue;
            };

            let links: Vec<LinkRef> = if self.dedupe {
                links
                    .into_iter()
                    .filter(|link| {
                        let fresh = seen.insert(link.item_id.clone());
                        if !fresh {
                            log::debug!("Duplicate article {} skipped", link.item_id);
                            stats.duplicates_skipped += 1;
                        }
                        fresh
                    })
                    .collect()
            } else {
                links
            };
            stats.items_total += links.len();

            // `buffered` yields in input order regardless of completion order.
            let mut outcomes = stream::iter(links)
                .map(|link| async move {
                    let outcome = self.process_item(board, &link).await;
                    (link, outcome)
                })
                .buffered(self.max_concurrent);

            while let Some((link, outcome)) = outcomes.next().await {
                match outcome {
                    ItemOutcome::Parsed(record) => {
                        sink.append(&record).await?;
                        stats.items_written += 1;
                    }
                    ItemOutcome::Skipped(reason) => {
                        log::warn!("Skipping article {}: {}", link.item_id, reason);
                        stats.items_skipped += 1;
                    }
                }
            }
        }

        sink.finish().await?;
        stats.finish();
        stats.log_summary();
        Ok(stats)
    }

    /// Fetch and parse one listing page. `None` when the page is skipped.
    async fn fetch_listing(&self, board: &str, index: u32) -> Option<Vec<LinkRef>> {
        let url = listing_url(&self.base_url, board, index);
        self.limiter.wait().await;

        match self.source.fetch(&url).await.and_then(FetchOutcome::into_body) {
            Ok(body) => {
                let links = self.listing.parse(&body);
                log::debug!("Index {} lists {} articles", index, links.len());
                Some(links)
            }
            Err(e) => {
                log::warn!("Skipping index {}: {}", index, e);
                None
            }
        }
    }

    /// Fetch and parse one article, classifying every failure as a skip.
    pub async fn process_item(&self, board: &str, link: &LinkRef) -> ItemOutcome {
        log::info!("Processing article: {}", link.item_id);
        self.limiter.wait().await;

        let body = match self.source.fetch(&link.url).await {
            Ok(FetchOutcome::Success { body, .. }) => body,
            Ok(FetchOutcome::Failure { status, url }) => {
                return ItemOutcome::Skipped(SkipReason::InvalidUrl { status, url });
            }
            Err(e) => return ItemOutcome::Skipped(SkipReason::Transport(e.to_string())),
        };

        match self.article.parse(&body, &link.item_id, board) {
            Ok(record) => ItemOutcome::Parsed(record),
            Err(e) => ItemOutcome::Skipped(SkipReason::Unparsable(e.to_string())),
        }
    }

    /// Crawl one article and write it as the entire content of `path`.
    ///
    /// A non-200 response writes the error marker. Transport, parse and
    /// write errors are returned.
    pub async fn run_single(&self, board: &str, item_id: &str, path: &Path) -> Result<SingleOutcome> {
        let url = article_url(&self.base_url, board, item_id);
        log::info!("Processing article: {}", item_id);
        self.limiter.wait().await;

        match self.source.fetch(&url).await? {
            FetchOutcome::Failure { status, url } => {
                log::warn!("invalid url: {} (status {})", url, status);
                write_text(path, ERROR_MARKER, WriteMode::Truncate).await?;
                Ok(SingleOutcome::InvalidUrl { status, url })
            }
            FetchOutcome::Success { body, .. } => {
                let record = self.article.parse(&body, item_id, board)?;
                write_text(path, &to_pretty_json(&record)?, WriteMode::Truncate).await?;
                Ok(SingleOutcome::Written(record))
            }
        }
    }
}
