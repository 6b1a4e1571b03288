//! Pipeline entry points.
//!
//! - `run_crawler`: crawl a listing range or a single article into a file

pub mod crawl;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{Config, CrawlTarget};
use crate::services::PageFetcher;
use crate::storage::JsonArrayWriter;

pub use crawl::{Crawler, ItemOutcome, SingleOutcome, SkipReason};

/// Crawl `target` over HTTP and write the result into `output_dir`.
///
/// Returns the path of the written file.
pub async fn run_crawler(config: &Config, target: &CrawlTarget, output_dir: &Path) -> Result<PathBuf> {
    let fetcher = PageFetcher::new(&config.crawler)?;
    let crawler = Crawler::new(fetcher, &config.crawler, &config.output)?;
    let path = target.output_path(output_dir);

    match target {
        CrawlTarget::Range { board, start, end } => {
            log::info!(
                "Crawling {} index {}..={} into {}",
                board,
                start,
                end,
                path.display()
            );
            let mut writer = JsonArrayWriter::new(&path);
            crawler.run_range(board, *start, *end, &mut writer).await?;
        }
        CrawlTarget::Single { board, item_id } => {
            log::info!("Crawling {} article {} into {}", board, item_id, path.display());
            crawler.run_single(board, item_id, &path).await?;
        }
    }

    Ok(path)
}
