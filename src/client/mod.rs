//! HTTP client capability for the harvesting strategies
//!
//! Strategies never talk to reqwest directly. They hand an [`ApiRequest`] to
//! an [`HttpClient`] and get back a status code plus parsed JSON, which keeps
//! them testable against scripted clients.
//!
//! - `ReqwestClient`: production client with user-agent and header rotation
//! - `HeaderRotation`: per-request header variety

mod headers;
mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use headers::HeaderRotation;
pub use http::{build_http_client, ReqwestClient};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Transport-level failures reported by an [`HttpClient`]
///
/// Non-200 statuses are not errors here; they come back as an
/// [`ApiResponse`] so callers can treat 429 specially.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}")]
    Connect { url: String },

    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Malformed payload from {url}: {message}")]
    MalformedPayload { url: String, message: String },
}

/// A GET request relative to the client's base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Path starting with `/`, e.g. `/r/rust/hot.json`
    pub path: String,

    /// Query parameters in insertion order
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Appends a query parameter
    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Returns the first value for `key`, if present
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Status code plus parsed body of a completed request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,

    /// Parsed JSON for 200 responses, `Value::Null` otherwise
    pub payload: Value,
}

impl ApiResponse {
    pub fn ok(payload: Value) -> Self {
        Self {
            status: 200,
            payload,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            payload: Value::Null,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }
}

/// Capability for issuing JSON GET requests
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issues one request
    ///
    /// # Returns
    ///
    /// * `Ok(ApiResponse)` - The server answered (any status)
    /// * `Err(FetchError)` - Transport failure, or a 200 whose body is not JSON
    async fn get_json(&self, request: &ApiRequest) -> Result<ApiResponse, FetchError>;
}
