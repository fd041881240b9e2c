use crate::harvester::StrategySummary;
use crate::strategy::{CandidateId, Progress};
use crate::target::Target;

/// Parameters of one harvest call
///
/// `target` and `sort` are kept raw and validated by
/// [`Harvester::harvest`](crate::Harvester::harvest) before any request.
#[derive(Debug, Clone)]
pub struct HarvestRequest {
    pub target: String,
    pub quota: usize,
    pub sort: String,
    pub keywords: Vec<String>,
    pub progress: Option<Progress>,
}

impl HarvestRequest {
    /// A request for `quota` posts from `target`, sorted by hot
    pub fn new(target: impl Into<String>, quota: usize) -> Self {
        Self {
            target: target.into(),
            quota,
            sort: "hot".to_string(),
            keywords: Vec::new(),
            progress: None,
        }
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }

    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn progress(mut self, progress: Progress) -> Self {
        self.progress = Some(progress);
        self
    }
}

/// Genuinely new posts for a target, at most `quota` of them
#[derive(Debug, Clone)]
pub struct HarvestResult {
    pub target: Target,
    pub candidates: Vec<CandidateId>,
    /// One entry per strategy that ran, in run order
    pub strategies: Vec<StrategySummary>,
    /// Candidates dropped because the store already had them
    pub already_stored: usize,
}

impl HarvestResult {
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.id.as_str()).collect()
    }

    /// Total request attempts across all strategies
    pub fn requests(&self) -> usize {
        self.strategies.iter().map(|s| s.requests).sum()
    }
}
