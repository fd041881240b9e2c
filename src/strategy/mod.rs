//! Harvesting strategies
//!
//! A strategy turns a [`Target`] and a quota into an ordered, duplicate-free
//! list of [`CandidateId`]s. Strategies never fail: network trouble ends the
//! strategy early and the reason is recorded in [`StrategyResult::stop`].
//!
//! - `PaginatedStrategy`: walks one sorted listing by cursor
//! - `TimeRangeStrategy`: walks "top" listings over successive time windows
//! - `SearchStrategy`: one search request per keyword

mod endpoint;
mod listing;
mod pacing;
mod paginated;
mod progress;
mod search;
mod time_range;
mod types;

pub use endpoint::{listing_request, search_request};
pub use listing::{parse_listing, ListingError, ListingPage, PERMALINK_BASE};
pub use pacing::RetryPolicy;
pub use paginated::PaginatedStrategy;
pub use progress::{Progress, ProgressError};
pub use search::SearchStrategy;
pub use time_range::TimeRangeStrategy;
pub use types::{CandidateId, SortMode, StopReason, StrategyKind, StrategyResult, TimeWindow};

use crate::rate::RateController;
use crate::target::Target;
use async_trait::async_trait;

/// A way of discovering posts for a target
///
/// Implementations issue every request through the shared
/// [`RateController`] and check
/// [`should_skip_strategy`](RateController::should_skip_strategy) before
/// each one.
#[async_trait]
pub trait Strategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Collects up to `quota` candidates
    ///
    /// # Arguments
    ///
    /// * `rate` - Session pacing state, shared across strategies
    /// * `target` - Subreddit or user to harvest
    /// * `quota` - Upper bound on returned candidates
    /// * `progress` - Optional hook, called at most once per batch
    async fn fetch(
        &self,
        rate: &mut RateController,
        target: &Target,
        quota: usize,
        progress: Option<&Progress>,
    ) -> StrategyResult;
}
