//! Configuration module for Reddit-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use reddit_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Listing pages hold {} items", config.harvest.page_size);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ClientConfig, Config, HarvestConfig, RateConfig, StoreConfig, DEFAULT_USER_AGENTS,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
