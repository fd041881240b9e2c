//! Reddit-Harvest: polite, multi-strategy harvesting of post identifiers
//!
//! This crate collects `(url, id)` pairs for posts from a subreddit or user
//! listing. It paces every request through an adaptive rate controller,
//! falls back from paginated listings to time-windowed "top" listings and
//! keyword search when the primary listing under-delivers, and drops posts
//! the caller has already stored.

pub mod client;
pub mod config;
pub mod harvester;
pub mod logging;
pub mod rate;
pub mod store;
pub mod strategy;
pub mod target;

use thiserror::Error;

/// Main error type for harvesting operations
///
/// Only caller contract violations and local failures surface here. Network
/// trouble inside a strategy degrades to a smaller result instead.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid target: {0}")]
    Target(#[from] TargetError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Store(#[from] store::StoreError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors produced while normalizing a raw target string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("Target is empty")]
    Empty,

    #[error("Not a reddit host: {0}")]
    UnsupportedHost(String),

    #[error("Cannot determine subreddit or user from: {0}")]
    Unrecognized(String),

    #[error("Invalid subreddit or user name: {0}")]
    InvalidName(String),
}

/// Result type alias for harvesting operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for target normalization
pub type TargetResult<T> = std::result::Result<T, TargetError>;

// Re-export commonly used types
pub use config::Config;
pub use harvester::{harvest, HarvestRequest, HarvestResult, Harvester};
pub use rate::{RateController, RateState};
pub use strategy::{CandidateId, Progress, SortMode, TimeWindow};
pub use target::{normalize_target, Target, TargetMode};
