use crate::config::types::{ClientConfig, Config, HarvestConfig, RateConfig, StoreConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_rate_config(&config.rate)?;
    validate_harvest_config(&config.harvest)?;
    validate_client_config(&config.client)?;
    validate_store_config(&config.store)?;
    Ok(())
}

/// Validates pacing configuration
fn validate_rate_config(config: &RateConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("min_delay", config.min_delay),
        ("max_delay", config.max_delay),
        ("initial_delay", config.initial_delay),
        ("error_step", config.error_step),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::Validation(format!(
                "{} must be a non-negative number of seconds, got {}",
                name, value
            )));
        }
    }

    if config.min_delay > config.max_delay {
        return Err(ConfigError::Validation(format!(
            "min_delay ({}) cannot exceed max_delay ({})",
            config.min_delay, config.max_delay
        )));
    }

    if config.initial_delay < config.min_delay || config.initial_delay > config.max_delay {
        return Err(ConfigError::Validation(format!(
            "initial_delay must lie between min_delay and max_delay, got {}",
            config.initial_delay
        )));
    }

    if !(config.backoff_factor >= 2.0) {
        return Err(ConfigError::Validation(format!(
            "backoff_factor must be >= 2.0, got {}",
            config.backoff_factor
        )));
    }

    if !(config.recovery_factor > 0.0 && config.recovery_factor <= 1.0) {
        return Err(ConfigError::Validation(format!(
            "recovery_factor must be in (0, 1], got {}",
            config.recovery_factor
        )));
    }

    if !(config.jitter >= 0.0 && config.jitter < 1.0) {
        return Err(ConfigError::Validation(format!(
            "jitter must be in [0, 1), got {}",
            config.jitter
        )));
    }

    if config.skip_threshold < 1 {
        return Err(ConfigError::Validation(
            "skip_threshold must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates strategy configuration
fn validate_harvest_config(config: &HarvestConfig) -> Result<(), ConfigError> {
    if config.page_size < 1 || config.page_size > 100 {
        return Err(ConfigError::Validation(format!(
            "page_size must be between 1 and 100, got {}",
            config.page_size
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.time_windows.is_empty() {
        return Err(ConfigError::Validation(
            "time_windows must name at least one window".to_string(),
        ));
    }

    // Fresher windows first: day before week before month
    if let Some(pair) = config.time_windows.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(ConfigError::Validation(format!(
            "time_windows must be in increasing granularity without repeats, got {} before {}",
            pair[0], pair[1]
        )));
    }

    if config.filter_batch_size < 1 {
        return Err(ConfigError::Validation(format!(
            "filter_batch_size must be >= 1, got {}",
            config.filter_batch_size
        )));
    }

    if !(config.search_delay_factor.is_finite() && config.search_delay_factor >= 1.0) {
        return Err(ConfigError::Validation(format!(
            "search_delay_factor must be >= 1.0, got {}",
            config.search_delay_factor
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_client_config(config: &ClientConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url must use HTTP or HTTPS, got '{}'",
            config.base_url
        )));
    }

    if config.timeout_secs < 1 || config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeouts must be at least 1 second".to_string(),
        ));
    }

    if config.user_agents.is_empty() || config.user_agents.iter().any(|ua| ua.trim().is_empty())
    {
        return Err(ConfigError::Validation(
            "user_agents must contain at least one non-empty entry".to_string(),
        ));
    }

    Ok(())
}

/// Validates post store configuration
fn validate_store_config(config: &StoreConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
