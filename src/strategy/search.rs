use crate::client::HttpClient;
use crate::config::HarvestConfig;
use crate::rate::RateController;
use crate::strategy::endpoint::search_request;
use crate::strategy::pacing::{paced_fetch, RequestFailure};
use crate::strategy::progress::report;
use crate::strategy::{CandidateId, Progress, StopReason, Strategy, StrategyKind, StrategyResult};
use crate::target::Target;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

/// Keyword search within a target, the lowest-priority strategy
///
/// Issues one request per keyword, spaced wider than listing requests. The
/// quota is split evenly across keywords (at least one each). A failed
/// keyword is logged and the next one is tried.
pub struct SearchStrategy {
    client: Arc<dyn HttpClient>,
    keywords: Vec<String>,
    page_size: usize,
    delay_factor: f64,
}

impl SearchStrategy {
    /// Blank keywords are dropped
    pub fn new(client: Arc<dyn HttpClient>, keywords: &[String], config: &HarvestConfig) -> Self {
        let keywords = keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            client,
            keywords,
            page_size: config.page_size.max(1),
            delay_factor: config.search_delay_factor,
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

#[async_trait]
impl Strategy for SearchStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Search
    }

    async fn fetch(
        &self,
        rate: &mut RateController,
        target: &Target,
        quota: usize,
        progress: Option<&Progress>,
    ) -> StrategyResult {
        if self.keywords.is_empty() {
            return StrategyResult::empty(StrategyKind::Search, StopReason::NoKeywords);
        }
        if rate.should_skip_strategy() {
            tracing::info!("{} search: skipped, pacing advises backing off", target);
            return StrategyResult::empty(StrategyKind::Search, StopReason::SkipAdvised);
        }

        let per_keyword = (quota / self.keywords.len()).max(1);
        let limit = per_keyword.min(self.page_size);

        let mut candidates: Vec<CandidateId> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut requests = 0;
        let mut stop = StopReason::Exhausted;

        for (index, keyword) in self.keywords.iter().enumerate() {
            if candidates.len() >= quota {
                stop = StopReason::QuotaReached;
                break;
            }
            if rate.should_skip_strategy() {
                stop = StopReason::SkipAdvised;
                break;
            }

            let request = search_request(target, keyword, limit);
            requests += 1;

            let page = match paced_fetch(self.client.as_ref(), rate, &request, self.delay_factor)
                .await
            {
                Ok(page) => page,
                Err(RequestFailure::RateLimited) => {
                    tracing::warn!("{} search '{}': rate limited, moving on", target, keyword);
                    continue;
                }
                Err(RequestFailure::Failed) => {
                    tracing::warn!("{} search '{}': request failed, moving on", target, keyword);
                    continue;
                }
            };

            let before = candidates.len();
            for candidate in page.candidates.into_iter().take(per_keyword) {
                if candidates.len() >= quota {
                    break;
                }
                if seen.insert(candidate.id.clone()) {
                    candidates.push(candidate);
                }
            }

            tracing::debug!(
                "{} search '{}' ({}/{}): +{}",
                target,
                keyword,
                index + 1,
                self.keywords.len(),
                candidates.len() - before
            );
            report(
                progress,
                candidates.len(),
                quota,
                &format!("search '{}'", keyword),
            );
        }

        if candidates.len() >= quota && stop == StopReason::Exhausted {
            stop = StopReason::QuotaReached;
        }

        tracing::info!(
            "{} search: {} candidates from {} keywords ({})",
            target,
            candidates.len(),
            self.keywords.len(),
            stop
        );

        StrategyResult {
            kind: StrategyKind::Search,
            candidates,
            stop,
            requests,
        }
    }
}
