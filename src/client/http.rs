//! Reqwest-backed implementation of the HTTP client capability
//!
//! This module handles:
//! - Building the reqwest client with timeouts and compression
//! - Per-request header rotation
//! - Classifying transport failures

use crate::client::{ApiRequest, ApiResponse, FetchError, HeaderRotation, HttpClient};
use crate::config::ClientConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The client configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &ClientConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Production [`HttpClient`] over reqwest
pub struct ReqwestClient {
    client: Client,
    base_url: String,
    headers: HeaderRotation,
}

impl ReqwestClient {
    /// Creates a client from configuration
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers: HeaderRotation::new(&config.user_agents),
        })
    }

    fn url_for(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.base_url, request.path)
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get_json(&self, request: &ApiRequest) -> Result<ApiResponse, FetchError> {
        let url = self.url_for(request);
        tracing::trace!("GET {} {:?}", url, request.query);

        let response = self
            .client
            .get(&url)
            .query(&request.query)
            .headers(self.headers.next_headers())
            .send()
            .await
            .map_err(|e| classify_error(&url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Ok(ApiResponse::status(status.as_u16()));
        }

        match response.json::<Value>().await {
            Ok(payload) => Ok(ApiResponse::ok(payload)),
            Err(e) if e.is_timeout() => Err(FetchError::Timeout { url }),
            Err(e) => Err(FetchError::MalformedPayload {
                url,
                message: e.to_string(),
            }),
        }
    }
}

/// Maps a reqwest send error onto [`FetchError`]
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Connect {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
