use crate::client::HttpClient;
use crate::config::HarvestConfig;
use crate::rate::RateController;
use crate::strategy::endpoint::listing_request;
use crate::strategy::listing::ListingPage;
use crate::strategy::pacing::{paced_fetch, RequestFailure, RetryPolicy};
use crate::strategy::progress::report;
use crate::strategy::{
    CandidateId, Progress, SortMode, StopReason, Strategy, StrategyKind, StrategyResult, TimeWindow,
};
use crate::target::Target;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

/// Walks a cursor-paginated listing page by page
///
/// # Termination
///
/// | Condition | Stop reason |
/// |-----------|-------------|
/// | quota reached (even mid-page) | `QuotaReached` |
/// | empty page or no next cursor | `Exhausted` |
/// | `max_pages` pages fetched | `PageLimit` |
/// | rate controller advises skipping | `SkipAdvised` |
/// | 429 again after the allowed retry | `RateLimited` |
/// | transport error, non-200, malformed payload | `Failed` |
pub struct PaginatedStrategy {
    client: Arc<dyn HttpClient>,
    sort: SortMode,
    time_filter: Option<TimeWindow>,
    page_size: usize,
    max_pages: usize,
    retry: RetryPolicy,
}

impl PaginatedStrategy {
    pub fn new(client: Arc<dyn HttpClient>, sort: SortMode, config: &HarvestConfig) -> Self {
        Self {
            client,
            sort,
            time_filter: None,
            page_size: config.page_size.max(1),
            max_pages: config.max_pages,
            retry: RetryPolicy::default(),
        }
    }

    /// Scopes the listing to a time window (`t=` parameter)
    pub fn with_time_filter(mut self, window: TimeWindow) -> Self {
        self.time_filter = Some(window);
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn label(&self) -> String {
        match self.time_filter {
            Some(window) => format!("{}({})", self.sort, window),
            None => self.sort.to_string(),
        }
    }

    /// Fetches one page, retrying after a 429 as the retry policy allows
    async fn fetch_page(
        &self,
        rate: &mut RateController,
        target: &Target,
        limit: usize,
        after: Option<&str>,
        requests: &mut usize,
    ) -> Result<ListingPage, StopReason> {
        let request = listing_request(target, self.sort, self.time_filter, limit, after);
        let mut retries = 0;

        loop {
            *requests += 1;
            match paced_fetch(self.client.as_ref(), rate, &request, 1.0).await {
                Ok(page) => return Ok(page),
                Err(RequestFailure::RateLimited) if retries < self.retry.max_rate_limit_retries => {
                    retries += 1;
                    tracing::info!(
                        "{} {}: rate limited, retrying page after {:?}",
                        target,
                        self.label(),
                        rate.current_delay()
                    );
                }
                Err(RequestFailure::RateLimited) => return Err(StopReason::RateLimited),
                Err(RequestFailure::Failed) => return Err(StopReason::Failed),
            }
        }
    }
}

#[async_trait]
impl Strategy for PaginatedStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Paginated
    }

    async fn fetch(
        &self,
        rate: &mut RateController,
        target: &Target,
        quota: usize,
        progress: Option<&Progress>,
    ) -> StrategyResult {
        let mut candidates: Vec<CandidateId> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut after: Option<String> = None;
        let mut pages = 0;
        let mut requests = 0;

        let stop = loop {
            if candidates.len() >= quota {
                break StopReason::QuotaReached;
            }
            if pages >= self.max_pages {
                break StopReason::PageLimit;
            }
            if rate.should_skip_strategy() {
                break StopReason::SkipAdvised;
            }

            let limit = self.page_size.min(quota - candidates.len());
            let page = match self
                .fetch_page(rate, target, limit, after.as_deref(), &mut requests)
                .await
            {
                Ok(page) => page,
                Err(reason) => break reason,
            };
            pages += 1;

            if page.is_empty() {
                break StopReason::Exhausted;
            }

            let before = candidates.len();
            for candidate in page.candidates {
                if candidates.len() >= quota {
                    break;
                }
                if seen.insert(candidate.id.clone()) {
                    candidates.push(candidate);
                }
            }

            tracing::debug!(
                "{} {} page {}: +{} ({}/{})",
                target,
                self.label(),
                pages,
                candidates.len() - before,
                candidates.len(),
                quota
            );
            report(
                progress,
                candidates.len(),
                quota,
                &format!("{} page {}", self.label(), pages),
            );

            match page.after {
                Some(next) => after = Some(next),
                None if candidates.len() >= quota => break StopReason::QuotaReached,
                None => break StopReason::Exhausted,
            }
        };

        tracing::info!(
            "{} {}: {} candidates from {} pages ({})",
            target,
            self.label(),
            candidates.len(),
            pages,
            stop
        );

        StrategyResult {
            kind: StrategyKind::Paginated,
            candidates,
            stop,
            requests,
        }
    }
}
