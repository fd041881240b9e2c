//! Harvesting entry points
//!
//! This module ties the pieces together:
//! - `Coordinator`: runs the strategy plan and merges results by id
//! - `ExistingFilter`: drops posts the store already has
//! - `Harvester`: validates a request and runs a fresh session for it

mod coordinator;
mod filter;
mod request;
mod session;

pub use coordinator::{Collection, Coordinator, StrategySummary};
pub use filter::ExistingFilter;
pub use request::{HarvestRequest, HarvestResult};
pub use session::Harvester;

use crate::client::ReqwestClient;
use crate::config::{validate, Config};
use crate::store::SqliteStore;
use crate::Result;
use std::path::Path;
use std::sync::Arc;

/// Harvests with the production HTTP client and SQLite post store
///
/// Checks the configuration and request first, then builds a
/// [`ReqwestClient`] from `config.client`, opens the store at
/// `config.store.database_path`, and runs one [`Harvester::harvest`]. A
/// rejected request never touches the network or the database file.
///
/// # Arguments
///
/// * `config` - Harvest configuration
/// * `request` - Target, quota, sort, keywords, and progress hook
///
/// # Returns
///
/// * `Ok(HarvestResult)` - New candidates, possibly fewer than requested
/// * `Err(HarvestError)` - Validation, client construction, or store failure
///
/// # Example
///
/// ```no_run
/// use reddit_harvest::{harvest, Config, HarvestRequest};
///
/// # async fn run() -> reddit_harvest::Result<()> {
/// let request = HarvestRequest::new("r/rust", 50).sort("new");
/// let result = harvest(&Config::default(), request).await?;
/// for candidate in &result.candidates {
///     println!("{} {}", candidate.id, candidate.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn harvest(config: &Config, request: HarvestRequest) -> Result<HarvestResult> {
    validate(config)?;
    session::validate_request(&request)?;

    let client = ReqwestClient::new(&config.client)?;
    let store = SqliteStore::new(Path::new(&config.store.database_path))?;

    Harvester::new(config.clone(), Arc::new(client), store)
        .harvest(request)
        .await
}
