use crate::config::RateConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Pacing state of one harvesting session
///
/// Mutated after every request attempt, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RateState {
    /// Successes since the last failure
    pub consecutive_successes: u32,

    /// Failures (429 or otherwise) since the last success
    pub consecutive_failures: u32,

    /// Current delay before jitter, in seconds
    pub delay: f64,

    /// Whether low-priority strategies should be skipped
    pub skip_low_priority: bool,
}

/// Adaptive request pacer for a single harvesting session
///
/// The controller only looks at the current success/failure streak. Every
/// harvest builds a fresh one, so pacing never leaks between targets, and a
/// scripted sequence of outcomes always produces the same delays (jitter
/// aside, which [`RateController::with_seed`] pins down).
///
/// The controller never fails; callers act on [`get_delay`](Self::get_delay)
/// and [`should_skip_strategy`](Self::should_skip_strategy).
#[derive(Debug, Clone)]
pub struct RateController {
    config: RateConfig,
    state: RateState,
    rng: StdRng,
}

impl RateController {
    /// Creates a controller seeded from OS entropy
    pub fn new(config: RateConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a controller with reproducible jitter
    pub fn with_seed(config: RateConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: RateConfig, rng: StdRng) -> Self {
        let state = Self::initial_state(&config);
        Self { config, state, rng }
    }

    fn initial_state(config: &RateConfig) -> RateState {
        RateState {
            consecutive_successes: 0,
            consecutive_failures: 0,
            delay: config.initial_delay.clamp(config.min_delay, config.max_delay),
            skip_low_priority: false,
        }
    }

    /// Records a successful request
    ///
    /// Ends the failure streak and nudges the delay toward the floor.
    pub fn record_success(&mut self) {
        self.state.consecutive_successes = self.state.consecutive_successes.saturating_add(1);
        self.state.consecutive_failures = 0;
        self.state.delay = (self.state.delay * self.config.recovery_factor).max(self.config.min_delay);
        self.refresh_skip_flag();
    }

    /// Records an HTTP 429 response
    ///
    /// Multiplies the delay by the backoff factor, capped at the ceiling.
    pub fn record_rate_limited(&mut self) {
        let base = self.state.delay.max(self.config.min_delay);
        self.state.delay = (base * self.config.backoff_factor).min(self.config.max_delay);
        self.record_failure();

        tracing::warn!(
            "Rate limited: delay now {:.2}s after {} consecutive failures",
            self.state.delay,
            self.state.consecutive_failures
        );
    }

    /// Records any other failure (timeout, non-200 status, malformed payload)
    pub fn record_other_error(&mut self) {
        self.state.delay = (self.state.delay + self.config.error_step).min(self.config.max_delay);
        self.record_failure();

        tracing::debug!(
            "Request failed: delay now {:.2}s after {} consecutive failures",
            self.state.delay,
            self.state.consecutive_failures
        );
    }

    fn record_failure(&mut self) {
        self.state.consecutive_failures = self.state.consecutive_failures.saturating_add(1);
        self.state.consecutive_successes = 0;
        self.refresh_skip_flag();
    }

    fn refresh_skip_flag(&mut self) {
        self.state.skip_low_priority = self.state.consecutive_failures >= self.config.skip_threshold;
    }

    /// Returns how long to wait before the next request
    ///
    /// The current delay is jittered by up to +/- `jitter` and clamped to the
    /// configured floor and ceiling. Call this again after any `record_*`
    /// call; the value changes with every outcome.
    pub fn get_delay(&mut self) -> Duration {
        let jitter = self.config.jitter;
        let factor = if jitter > 0.0 {
            self.rng.gen_range((1.0 - jitter)..=(1.0 + jitter))
        } else {
            1.0
        };

        let seconds = (self.state.delay * factor).clamp(self.config.min_delay, self.config.max_delay);
        Duration::from_secs_f64(seconds)
    }

    /// Returns the current delay without jitter
    pub fn current_delay(&self) -> Duration {
        Duration::from_secs_f64(self.state.delay)
    }

    /// Returns true once the failure streak reaches the skip threshold
    pub fn should_skip_strategy(&self) -> bool {
        self.state.skip_low_priority
    }

    /// Returns a snapshot of the pacing state
    pub fn state(&self) -> &RateState {
        &self.state
    }

    /// Restores the session-start state
    pub fn reset(&mut self) {
        self.state = Self::initial_state(&self.config);
    }
}
