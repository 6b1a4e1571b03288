//! Crawl run statistics.

use chrono::{DateTime, Utc};

/// Counters collected over a range crawl.
#[derive(Debug, Clone)]
pub struct CrawlStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub pages_total: usize,
    pub pages_failed: usize,
    pub items_total: usize,
    pub items_written: usize,
    pub items_skipped: usize,
    pub duplicates_skipped: usize,
}

impl CrawlStats {
    /// Start a fresh counter set at the current time.
    pub fn started() -> Self {
        let now = Utc::now();
        Self {
            start_time: now,
            end_time: now,
            pages_total: 0,
            pages_failed: 0,
            items_total: 0,
            items_written: 0,
            items_skipped: 0,
            duplicates_skipped: 0,
        }
    }

    pub fn finish(&mut self) {
        self.end_time = Utc::now();
    }

    pub fn elapsed_secs(&self) -> f64 {
        (self.end_time - self.start_time).num_milliseconds() as f64 / 1000.0
    }

    /// Log a one-block summary of the run.
    pub fn log_summary(&self) {
        log::info!("[SUMMARY] Crawl finished in {:.1}s", self.elapsed_secs());
        log::info!(
            "    pages: {} fetched, {} failed",
            self.pages_total - self.pages_failed,
            self.pages_failed
        );
        log::info!(
            "    articles: {} seen, {} written, {} skipped, {} duplicates",
            self.items_total,
            self.items_written,
            self.items_skipped,
            self.duplicates_skipped
        );
    }
}
