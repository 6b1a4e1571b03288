//! Service layer for the crawler.
//!
//! This module contains the building blocks of the extraction pipeline:
//! - Request pacing (`RateLimiter`)
//! - Page fetching (`PageFetcher`, `PageSource`)
//! - Listing page parsing (`ListingParser`)
//! - Article page parsing (`ArticleParser`)

pub mod article;
pub mod document;
mod fetcher;
mod listing;
mod rate_limit;
pub mod sanitize;

pub use article::ArticleParser;
pub use fetcher::{FetchOutcome, PageFetcher, PageSource};
pub use listing::ListingParser;
pub use rate_limit::RateLimiter;
