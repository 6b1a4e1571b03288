// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::header::{COOKIE, HeaderMap, HeaderValue};

use crate::error::Result;
use crate::models::CrawlerConfig;

/// Cookie that passes the board's age gate.
pub const AGE_GATE_COOKIE: &str = "over18=1";

/// Create a configured asynchronous HTTP client.
///
/// Every request carries the age-gate cookie. TLS verification follows
/// `config.verify_tls`.
pub fn create_async_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_static(AGE_GATE_COOKIE));

    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .danger_accept_invalid_certs(!config.verify_tls)
        .build()?;
    Ok(client)
}
