use serde::Deserialize;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A discovered, not-yet-fetched post
///
/// Identity is the post id alone. The URL is carried for the later fetch
/// and may differ between two sightings of the same post.
#[derive(Debug, Clone)]
pub struct CandidateId {
    pub url: String,
    pub id: String,
}

impl CandidateId {
    pub fn new(url: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            id: id.into(),
        }
    }
}

impl PartialEq for CandidateId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CandidateId {}

impl Hash for CandidateId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Listing sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortMode {
    Hot,
    New,
    Top,
    Best,
    Rising,
    Controversial,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::New => "new",
            Self::Top => "top",
            Self::Best => "best",
            Self::Rising => "rising",
            Self::Controversial => "controversial",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hot" => Ok(Self::Hot),
            "new" => Ok(Self::New),
            "top" => Ok(Self::Top),
            "best" => Ok(Self::Best),
            "rising" => Ok(Self::Rising),
            "controversial" => Ok(Self::Controversial),
            other => Err(format!("unknown sort mode '{}'", other)),
        }
    }
}

/// Time filter for "top" and "controversial" listings
///
/// Ordered from the narrowest window to the widest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Hour,
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::All => "all",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hour" => Ok(Self::Hour),
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            "all" => Ok(Self::All),
            other => Err(format!("unknown time window '{}'", other)),
        }
    }
}

/// Which strategy produced a result (logging only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Paginated,
    TimeRange,
    Search,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Paginated => "paginated",
            Self::TimeRange => "time-range",
            Self::Search => "search",
        })
    }
}

/// Why a strategy stopped issuing requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Produced as many candidates as asked for
    QuotaReached,
    /// The listing has no further pages (a normal ending)
    Exhausted,
    /// Hit the configured page bound
    PageLimit,
    /// The rate controller advised abandoning the strategy
    SkipAdvised,
    /// Still rate limited after the allowed retry
    RateLimited,
    /// Transport failure, non-200 status, or malformed payload
    Failed,
    /// Search was given nothing to search for
    NoKeywords,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::QuotaReached => "quota reached",
            Self::Exhausted => "source exhausted",
            Self::PageLimit => "page limit",
            Self::SkipAdvised => "skip advised",
            Self::RateLimited => "rate limited",
            Self::Failed => "failed",
            Self::NoKeywords => "no keywords",
        })
    }
}

/// Output of one strategy invocation, in discovery order
#[derive(Debug, Clone)]
pub struct StrategyResult {
    pub kind: StrategyKind,
    pub candidates: Vec<CandidateId>,
    pub stop: StopReason,
    /// Request attempts issued, retries included
    pub requests: usize,
}

impl StrategyResult {
    /// A result with no candidates and no requests
    pub fn empty(kind: StrategyKind, stop: StopReason) -> Self {
        Self {
            kind,
            candidates: Vec::new(),
            stop,
            requests: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
