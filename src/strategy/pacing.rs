//! Paced request issuing shared by all strategies
//!
//! Every outbound request goes through [`paced_fetch`]: sleep for the rate
//! controller's delay, send, classify the outcome, and report it back to the
//! controller.

use crate::client::{ApiRequest, HttpClient};
use crate::rate::RateController;
use crate::strategy::listing::{parse_listing, ListingPage};

/// Bound on retries of a single page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after an HTTP 429 on the same page
    pub max_rate_limit_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_rate_limit_retries: 1,
        }
    }
}

/// How a paced request failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RequestFailure {
    /// HTTP 429
    RateLimited,
    /// Anything else: transport, non-200, malformed payload
    Failed,
}

/// Sleeps, sends one request, and records the outcome
///
/// `delay_factor` scales the controller's delay for endpoints that deserve
/// extra spacing (search).
pub(crate) async fn paced_fetch(
    client: &dyn HttpClient,
    rate: &mut RateController,
    request: &ApiRequest,
    delay_factor: f64,
) -> Result<ListingPage, RequestFailure> {
    let delay = rate.get_delay().mul_f64(delay_factor);
    tokio::time::sleep(delay).await;

    let response = match client.get_json(request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Request to {} failed: {}", request.path, e);
            rate.record_other_error();
            return Err(RequestFailure::Failed);
        }
    };

    if response.is_rate_limited() {
        rate.record_rate_limited();
        return Err(RequestFailure::RateLimited);
    }

    if !response.is_success() {
        tracing::warn!("Request to {} returned HTTP {}", request.path, response.status);
        rate.record_other_error();
        return Err(RequestFailure::Failed);
    }

    match parse_listing(&response.payload) {
        Ok(page) => {
            rate.record_success();
            Ok(page)
        }
        Err(e) => {
            tracing::warn!("Request to {}: {}", request.path, e);
            rate.record_other_error();
            Err(RequestFailure::Failed)
        }
    }
}
