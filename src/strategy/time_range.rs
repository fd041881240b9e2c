use crate::client::HttpClient;
use crate::config::HarvestConfig;
use crate::rate::RateController;
use crate::strategy::progress::report;
use crate::strategy::{
    CandidateId, PaginatedStrategy, Progress, SortMode, StopReason, Strategy, StrategyKind,
    StrategyResult,
};
use crate::target::Target;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

/// Runs "top" listings over successive time windows
///
/// Each window is walked with a fresh [`PaginatedStrategy`] asked only for
/// what is still missing, so a quota met in an early window leaves the later
/// ones untouched. Windows are tried in configuration order, which
/// validation keeps in increasing granularity (day before week).
///
/// Progress is reported once per window with the merged count against the
/// strategy's own quota, so it never moves backwards between windows.
pub struct TimeRangeStrategy {
    client: Arc<dyn HttpClient>,
    config: HarvestConfig,
}

impl TimeRangeStrategy {
    pub fn new(client: Arc<dyn HttpClient>, config: &HarvestConfig) -> Self {
        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl Strategy for TimeRangeStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::TimeRange
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
        let mut requests = 0;
        let mut stop = StopReason::Exhausted;

        for &window in &self.config.time_windows {
            if candidates.len() >= quota {
                stop = StopReason::QuotaReached;
                break;
            }
            if rate.should_skip_strategy() {
                stop = StopReason::SkipAdvised;
                break;
            }

            let deficit = quota - candidates.len();
            let pass = PaginatedStrategy::new(self.client.clone(), SortMode::Top, &self.config)
                .with_time_filter(window);
            let result = pass.fetch(rate, target, deficit, None).await;
            requests += result.requests;

            let before = candidates.len();
            for candidate in result.candidates {
                if candidates.len() >= quota {
                    break;
                }
                if seen.insert(candidate.id.clone()) {
                    candidates.push(candidate);
                }
            }

            tracing::debug!(
                "{} top({}): +{} new ({})",
                target,
                window,
                candidates.len() - before,
                result.stop
            );
            report(
                progress,
                candidates.len(),
                quota,
                &format!("top({})", window),
            );

            if result.stop == StopReason::SkipAdvised {
                stop = StopReason::SkipAdvised;
                break;
            }
        }

        if candidates.len() >= quota && stop == StopReason::Exhausted {
            stop = StopReason::QuotaReached;
        }

        StrategyResult {
            kind: StrategyKind::TimeRange,
            candidates,
            stop,
            requests,
        }
    }
}
