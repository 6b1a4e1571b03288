//! Page fetcher.
//!
//! Issues GET requests and classifies the response. Retry and skip policy
//! is left to the crawl loop.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;
use crate::utils::http::create_async_client;

/// Classified response of a single GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 200 response
    Success { body: String, final_url: String },

    /// Any other status; must not be parsed
    Failure { status: u16, url: String },
}

impl FetchOutcome {
    /// The page body, or `AppError::Fetch` for a non-200 response.
    pub fn into_body(self) -> Result<String> {
        match self {
            Self::Success { body, .. } => Ok(body),
            Self::Failure { status, url } => Err(AppError::Fetch { status, url }),
        }
    }
}

/// Source of raw page markup.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch `url`. Transport errors are `Err`; HTTP statuses are outcomes.
    async fn fetch(&self, url: &str) -> Result<FetchOutcome>;
}

/// reqwest-backed fetcher carrying the age-gate cookie.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
        })
    }
}

#[async_trait]
impl PageSource for PageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutcome> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let final_url = response.url().to_string();

        if status != StatusCode::OK {
            return Ok(FetchOutcome::Failure {
                status: status.as_u16(),
                url: final_url,
            });
        }

        let body = response.text().await?;
        Ok(FetchOutcome::Success { body, final_url })
    }
}
