// src/models/mod.rs

//! Domain models for the crawler.
//!
//! This module contains the data structures passed between the fetcher,
//! the parsers, the crawl loop and the output writer.

mod article;
mod config;
mod link;
mod stats;
mod target;

// Re-export all public types
pub use article::{BOO_TAG, Comment, ItemRecord, PUSH_TAG, Reaction, ReactionTally};
pub use config::{Config, CrawlerConfig, OutputConfig};
pub use link::LinkRef;
pub use stats::CrawlStats;
pub use target::CrawlTarget;
