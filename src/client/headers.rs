use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, USER_AGENT};

const ACCEPT_LANGUAGES: &[&str] = &["en-US,en;q=0.9", "en-GB,en;q=0.8", "en-CA,en;q=0.7"];
const CACHE_CONTROLS: &[&str] = &["max-age=0", "no-cache"];

/// Picks a varied set of browser-like headers for each request
///
/// This is plain header variety, nothing more elaborate.
#[derive(Debug, Clone)]
pub struct HeaderRotation {
    user_agents: Vec<HeaderValue>,
}

impl HeaderRotation {
    /// Builds a rotation from user agent strings
    ///
    /// Entries that are not valid header values are dropped.
    pub fn new(user_agents: &[String]) -> Self {
        let user_agents = user_agents
            .iter()
            .filter_map(|ua| HeaderValue::from_str(ua.trim()).ok())
            .collect();
        Self { user_agents }
    }

    /// Number of usable user agents
    pub fn len(&self) -> usize {
        self.user_agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.user_agents.is_empty()
    }

    /// Returns the headers for the next request
    pub fn next_headers(&self) -> HeaderMap {
        let mut rng = rand::thread_rng();
        let mut headers = HeaderMap::new();

        if let Some(ua) = self.user_agents.choose(&mut rng) {
            headers.insert(USER_AGENT, ua.clone());
        }

        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));

        if let Some(lang) = ACCEPT_LANGUAGES.choose(&mut rng) {
            headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(*lang));
        }

        if let Some(cache) = CACHE_CONTROLS.choose(&mut rng) {
            headers.insert(CACHE_CONTROL, HeaderValue::from_static(*cache));
        }

        headers.insert("dnt", HeaderValue::from_static("1"));
        headers
    }
}
