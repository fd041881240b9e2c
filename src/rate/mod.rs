//! Rate module for pacing requests during a harvesting session
//!
//! # Components
//!
//! - `RateController`: decides how long to wait before the next request and
//!   whether low-priority strategies should be abandoned
//! - `RateState`: snapshot of the controller's streaks and current delay

mod controller;

pub use controller::{RateController, RateState};
