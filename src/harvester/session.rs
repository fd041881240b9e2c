use crate::client::HttpClient;
use crate::config::{validate, Config};
use crate::harvester::{Coordinator, ExistingFilter, HarvestRequest, HarvestResult};
use crate::rate::RateController;
use crate::store::PostStore;
use crate::strategy::SortMode;
use crate::target::{normalize_target, Target};
use crate::{HarvestError, Result};
use std::sync::Arc;

/// Harvests new post ids for one target at a time
///
/// Holds no pacing state between calls: every [`harvest`](Self::harvest)
/// builds a fresh [`RateController`] and [`Coordinator`].
pub struct Harvester<S: PostStore> {
    config: Config,
    client: Arc<dyn HttpClient>,
    store: S,
}

impl<S: PostStore> Harvester<S> {
    pub fn new(config: Config, client: Arc<dyn HttpClient>, store: S) -> Self {
        Self {
            config,
            client,
            store,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs one harvest
    ///
    /// # Returns
    ///
    /// * `Ok(HarvestResult)` - Up to `quota` new candidates; fewer is not an error
    /// * `Err(HarvestError)` - Invalid configuration, invalid target, zero
    ///   quota, unknown sort, or a store failure during filtering
    pub async fn harvest(&self, request: HarvestRequest) -> Result<HarvestResult> {
        validate(&self.config)?;
        let (target, sort) = validate_request(&request)?;

        tracing::info!(
            "Harvesting up to {} posts from {} (sort {}, {} keywords)",
            request.quota,
            target,
            sort,
            request.keywords.len()
        );

        let rate = RateController::new(self.config.rate.clone());
        let mut coordinator =
            Coordinator::new(self.client.clone(), self.config.harvest.clone(), rate);
        let collection = coordinator
            .collect(
                &target,
                sort,
                &request.keywords,
                request.quota,
                request.progress.as_ref(),
            )
            .await;

        let collected = collection.candidates.len();
        let filter = ExistingFilter::new(self.config.harvest.filter_batch_size);
        let mut candidates = filter.apply(&self.store, collection.candidates)?;
        let already_stored = collected - candidates.len();
        candidates.truncate(request.quota);

        let result = HarvestResult {
            target,
            already_stored,
            candidates,
            strategies: collection.summaries,
        };

        tracing::info!(
            "Harvested {} new posts from {} ({} already stored, {} requests)",
            result.len(),
            result.target,
            result.already_stored,
            result.requests()
        );

        Ok(result)
    }
}

/// Checks the caller contract before anything goes out on the wire
pub(crate) fn validate_request(request: &HarvestRequest) -> Result<(Target, SortMode)> {
    let target = normalize_target(&request.target)?;

    if request.quota == 0 {
        return Err(HarvestError::Validation(
            "quota must be greater than zero".to_string(),
        ));
    }

    let sort = request
        .sort
        .parse::<SortMode>()
        .map_err(HarvestError::Validation)?;

    Ok((target, sort))
}
