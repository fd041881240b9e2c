use crate::strategy::TimeWindow;
use serde::Deserialize;

/// Default browser user agents rotated by the HTTP client
pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:109.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
];

/// Main configuration structure for Reddit-Harvest
///
/// Every section falls back to its defaults, so an empty file is valid.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rate: RateConfig,
    #[serde(default)]
    pub harvest: HarvestConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Request pacing configuration
///
/// All delays are in seconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateConfig {
    /// Floor for the computed delay
    #[serde(rename = "min-delay")]
    pub min_delay: f64,

    /// Ceiling for the computed delay
    #[serde(rename = "max-delay")]
    pub max_delay: f64,

    /// Delay at session start
    #[serde(rename = "initial-delay")]
    pub initial_delay: f64,

    /// Multiplier applied on HTTP 429
    #[serde(rename = "backoff-factor")]
    pub backoff_factor: f64,

    /// Additive step applied on any other failure
    #[serde(rename = "error-step")]
    pub error_step: f64,

    /// Multiplier applied on success (pulls the delay toward the floor)
    #[serde(rename = "recovery-factor")]
    pub recovery_factor: f64,

    /// Relative jitter applied by `get_delay` (0.2 means +/-20%)
    pub jitter: f64,

    /// Consecutive failures after which low-priority strategies are skipped
    #[serde(rename = "skip-threshold")]
    pub skip_threshold: u32,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            min_delay: 1.0,
            max_delay: 60.0,
            initial_delay: 2.0,
            backoff_factor: 2.0,
            error_step: 1.0,
            recovery_factor: 0.9,
            jitter: 0.2,
            skip_threshold: 5,
        }
    }
}

/// Strategy and filter configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Items requested per listing page
    #[serde(rename = "page-size")]
    pub page_size: usize,

    /// Safety bound on pages fetched by one paginated run
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Windows tried, in order, by the time-range strategy
    #[serde(rename = "time-windows")]
    pub time_windows: Vec<TimeWindow>,

    /// Existence lookups per batch in the existing-post filter
    #[serde(rename = "filter-batch-size")]
    pub filter_batch_size: usize,

    /// Multiplier on the pacing delay before each search request
    #[serde(rename = "search-delay-factor")]
    pub search_delay_factor: f64,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            page_size: 100,
            max_pages: 50,
            time_windows: vec![
                TimeWindow::Day,
                TimeWindow::Week,
                TimeWindow::Month,
                TimeWindow::Year,
                TimeWindow::All,
            ],
            filter_batch_size: 100,
            search_delay_factor: 2.0,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL requests are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// User agents rotated per request
    #[serde(rename = "user-agents")]
    pub user_agents: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.reddit.com".to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agents: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Post store configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the SQLite database of already-harvested posts
    #[serde(rename = "database-path")]
    pub database_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: "./harvest.db".to_string(),
        }
    }
}
