//! Target handling for Reddit-Harvest
//!
//! This module turns the raw strings callers pass (bare names, `r/`/`u/`
//! shorthand, full URLs) into a normalized [`Target`], and canonicalizes the
//! post URLs carried alongside harvested identifiers.

mod canonical;
mod normalize;

pub use canonical::canonicalize_url;
pub use normalize::normalize_target;

use crate::{TargetError, TargetResult};
use std::fmt;

/// Longest name accepted for a subreddit or user
const MAX_NAME_LEN: usize = 32;

/// What kind of listing a target refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetMode {
    /// A community listing (`r/name`)
    Subreddit,
    /// A user's submissions (`u/name`)
    User,
}

impl TargetMode {
    /// Returns the shorthand prefix used for this mode
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Subreddit => "r",
            Self::User => "u",
        }
    }
}

/// A normalized harvesting scope
///
/// Targets are immutable once built; the only way to obtain one is through
/// [`Target::new`] or [`normalize_target`], both of which validate the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    mode: TargetMode,
    name: String,
}

impl Target {
    /// Creates a target after validating the name
    ///
    /// Names must be 1 to 32 characters of ASCII letters, digits, `_` or `-`.
    pub fn new(mode: TargetMode, name: &str) -> TargetResult<Self> {
        validate_name(name)?;
        Ok(Self {
            mode,
            name: name.to_string(),
        })
    }

    /// Convenience constructor for a subreddit target
    pub fn subreddit(name: &str) -> TargetResult<Self> {
        Self::new(TargetMode::Subreddit, name)
    }

    /// Convenience constructor for a user target
    pub fn user(name: &str) -> TargetResult<Self> {
        Self::new(TargetMode::User, name)
    }

    pub fn mode(&self) -> TargetMode {
        self.mode
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.mode.prefix(), self.name)
    }
}

fn validate_name(name: &str) -> TargetResult<()> {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return Err(TargetError::InvalidName(name.to_string()));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(TargetError::InvalidName(name.to_string()));
    }

    Ok(())
}
