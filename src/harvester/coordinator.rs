//! Strategy ordering and cross-strategy merging for one target
//!
//! The coordinator runs strategies in a fixed priority order:
//!
//! 1. the paginated listing in the caller's sort mode
//! 2. "top" over successive time windows (skipped when the sort is already top)
//! 3. keyword search (skipped without keywords)
//!
//! Each strategy is asked only for the outstanding deficit, and the plan
//! stops as soon as the quota is met.

use crate::client::HttpClient;
use crate::config::HarvestConfig;
use crate::rate::RateController;
use crate::strategy::{
    CandidateId, PaginatedStrategy, Progress, SearchStrategy, SortMode, StopReason, Strategy,
    StrategyKind, TimeRangeStrategy,
};
use crate::target::Target;
use std::collections::HashSet;
use std::sync::Arc;

/// What one strategy contributed to a harvest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategySummary {
    pub kind: StrategyKind,
    /// Candidates the strategy returned
    pub produced: usize,
    /// Candidates not already found by an earlier strategy
    pub added: usize,
    pub stop: StopReason,
    pub requests: usize,
}

/// Merged output of a strategy plan, in priority order
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub candidates: Vec<CandidateId>,
    pub summaries: Vec<StrategySummary>,
}

/// Per-harvest strategy driver
///
/// Owns the session's [`RateController`]; build a new coordinator for every
/// harvest.
pub struct Coordinator {
    client: Arc<dyn HttpClient>,
    config: HarvestConfig,
    rate: RateController,
}

impl Coordinator {
    pub fn new(client: Arc<dyn HttpClient>, config: HarvestConfig, rate: RateController) -> Self {
        Self {
            client,
            config,
            rate,
        }
    }

    /// Pacing state after (or during) a run
    pub fn rate(&self) -> &RateController {
        &self.rate
    }

    /// Builds the strategy list for a sort mode and keyword set
    pub fn plan(&self, sort: SortMode, keywords: &[String]) -> Vec<Box<dyn Strategy>> {
        let mut strategies: Vec<Box<dyn Strategy>> = vec![Box::new(PaginatedStrategy::new(
            self.client.clone(),
            sort,
            &self.config,
        ))];

        if sort != SortMode::Top {
            strategies.push(Box::new(TimeRangeStrategy::new(
                self.client.clone(),
                &self.config,
            )));
        }

        let search = SearchStrategy::new(self.client.clone(), keywords, &self.config);
        if !search.keywords().is_empty() {
            strategies.push(Box::new(search));
        }

        strategies
    }

    /// Plans and runs all strategies for `target`
    pub async fn collect(
        &mut self,
        target: &Target,
        sort: SortMode,
        keywords: &[String],
        quota: usize,
        progress: Option<&Progress>,
    ) -> Collection {
        let strategies = self.plan(sort, keywords);
        self.run_plan(&strategies, target, quota, progress).await
    }

    /// Runs `strategies` in order, merging by id until `quota` is met
    pub async fn run_plan(
        &mut self,
        strategies: &[Box<dyn Strategy>],
        target: &Target,
        quota: usize,
        progress: Option<&Progress>,
    ) -> Collection {
        let mut collection = Collection::default();
        let mut seen: HashSet<String> = HashSet::new();

        for strategy in strategies {
            let deficit = quota.saturating_sub(collection.candidates.len());
            if deficit == 0 {
                break;
            }

            tracing::info!(
                "{}: running {} strategy for {} more",
                target,
                strategy.kind(),
                deficit
            );
            let result = strategy.fetch(&mut self.rate, target, deficit, progress).await;
            let produced = result.len();

            let before = collection.candidates.len();
            for candidate in result.candidates {
                if collection.candidates.len() >= quota {
                    break;
                }
                if seen.insert(candidate.id.clone()) {
                    collection.candidates.push(candidate);
                }
            }
            let added = collection.candidates.len() - before;

            tracing::info!(
                "{}: {} strategy produced {}, {} new, {} requests ({}); total {}/{}",
                target,
                result.kind,
                produced,
                added,
                result.requests,
                result.stop,
                collection.candidates.len(),
                quota
            );

            collection.summaries.push(StrategySummary {
                kind: result.kind,
                produced,
                added,
                stop: result.stop,
                requests: result.requests,
            });
        }

        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockClient;
    use crate::client::ApiResponse;
    use crate::config::RateConfig;
    use crate::strategy::StrategyResult;
    use async_trait::async_trait;
    use std::sync::Mutex;

    type Quotas = Arc<Mutex<Vec<usize>>>;

    /// Returns a fixed id list whatever quota it is given
    struct Scripted {
        kind: StrategyKind,
        ids: Vec<&'static str>,
        quotas: Quotas,
    }

    impl Scripted {
        fn boxed(kind: StrategyKind, ids: Vec<&'static str>) -> (Box<dyn Strategy>, Quotas) {
            let quotas = Arc::new(Mutex::new(Vec::new()));
            let strategy = Self {
                kind,
                ids,
                quotas: quotas.clone(),
            };
            (Box::new(strategy), quotas)
        }
    }

    #[async_trait]
    impl Strategy for Scripted {
        fn kind(&self) -> StrategyKind {
            self.kind
        }

        async fn fetch(
            &self,
            _rate: &mut RateController,
            _target: &Target,
            quota: usize,
            _progress: Option<&Progress>,
        ) -> StrategyResult {
            self.quotas.lock().unwrap().push(quota);
            StrategyResult {
                kind: self.kind,
                candidates: self
                    .ids
                    .iter()
                    .map(|id| CandidateId::new(format!("https://www.reddit.com/comments/{}", id), *id))
                    .collect(),
                stop: StopReason::Exhausted,
                requests: 1,
            }
        }
    }

    fn coordinator() -> (Coordinator, Arc<MockClient>) {
        let mock = Arc::new(MockClient::new(|_, _| Ok(ApiResponse::status(500))));
        let rate = RateController::with_seed(RateConfig::default(), 0);
        (
            Coordinator::new(mock.clone(), HarvestConfig::default(), rate),
            mock,
        )
    }

    fn ids_of(collection: &Collection) -> Vec<&str> {
        collection.candidates.iter().map(|c| c.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_full_primary_skips_fallbacks() {
        let (mut coordinator, _) = coordinator();
        let primary_ids = vec!["p0", "p1", "p2", "p3", "p4", "p5", "p6", "p7", "p8", "p9"];
        let (primary, _) = Scripted::boxed(StrategyKind::Paginated, primary_ids.clone());
        let (time_range, time_calls) = Scripted::boxed(StrategyKind::TimeRange, vec!["t0"]);
        let (search, search_calls) = Scripted::boxed(StrategyKind::Search, vec!["s0"]);

        let target = Target::subreddit("test").unwrap();
        let collection = coordinator
            .run_plan(&[primary, time_range, search], &target, 10, None)
            .await;

        assert_eq!(ids_of(&collection), primary_ids);
        assert!(time_calls.lock().unwrap().is_empty());
        assert!(search_calls.lock().unwrap().is_empty());
        assert_eq!(collection.summaries.len(), 1);
    }

    #[tokio::test]
    async fn test_fallback_receives_deficit_and_dedups() {
        let (mut coordinator, _) = coordinator();
        let (primary, _) = Scripted::boxed(StrategyKind::Paginated, vec!["a", "b", "c", "d"]);
        let (time_range, time_quotas) = Scripted::boxed(
            StrategyKind::TimeRange,
            vec!["b", "e", "a", "f", "g", "d", "h", "i"],
        );

        let target = Target::subreddit("test").unwrap();
        let collection = coordinator
            .run_plan(&[primary, time_range], &target, 10, None)
            .await;

        assert_eq!(
            ids_of(&collection),
            vec!["a", "b", "c", "d", "e", "f", "g", "h", "i"]
        );
        assert_eq!(*time_quotas.lock().unwrap(), vec![6]);

        let summary = &collection.summaries[1];
        assert_eq!(summary.kind, StrategyKind::TimeRange);
        assert_eq!(summary.produced, 8);
        assert_eq!(summary.added, 5);
    }

    #[tokio::test]
    async fn test_output_unique_and_bounded() {
        let (mut coordinator, _) = coordinator();
        let (first, _) = Scripted::boxed(StrategyKind::Paginated, vec!["x", "y", "x", "z"]);
        let (second, _) = Scripted::boxed(StrategyKind::TimeRange, vec!["z", "w", "v", "u"]);
        let (third, _) = Scripted::boxed(StrategyKind::Search, vec!["u", "t", "s"]);

        let target = Target::subreddit("test").unwrap();
        let collection = coordinator
            .run_plan(&[first, second, third], &target, 5, None)
            .await;

        let ids = ids_of(&collection);
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.len() <= 5);
        assert_eq!(ids, vec!["x", "y", "z", "w", "v"]);
    }

    #[test]
    fn test_plan_shapes() {
        let (coordinator, _) = coordinator();

        let kinds = |plan: Vec<Box<dyn Strategy>>| -> Vec<StrategyKind> {
            plan.iter().map(|s| s.kind()).collect()
        };

        assert_eq!(
            kinds(coordinator.plan(SortMode::Hot, &[])),
            vec![StrategyKind::Paginated, StrategyKind::TimeRange]
        );
        assert_eq!(
            kinds(coordinator.plan(SortMode::Top, &[])),
            vec![StrategyKind::Paginated]
        );
        assert_eq!(
            kinds(coordinator.plan(SortMode::New, &["rust".to_string()])),
            vec![
                StrategyKind::Paginated,
                StrategyKind::TimeRange,
                StrategyKind::Search
            ]
        );
        assert_eq!(
            kinds(coordinator.plan(SortMode::New, &["  ".to_string()])).len(),
            2
        );
    }
}
