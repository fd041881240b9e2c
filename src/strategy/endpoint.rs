//! Request builders for listing and search endpoints
//!
//! | Target | Listing | Search |
//! |--------|---------|--------|
//! | subreddit | `/r/{name}/{sort}.json` | `/r/{name}/search.json?restrict_sr=1` |
//! | user | `/user/{name}/submitted.json?sort=` | `/search.json?q=author:{name} ...` |

use crate::client::ApiRequest;
use crate::strategy::{SortMode, TimeWindow};
use crate::target::{Target, TargetMode};

/// Builds one page request of a listing
pub fn listing_request(
    target: &Target,
    sort: SortMode,
    time_filter: Option<TimeWindow>,
    limit: usize,
    after: Option<&str>,
) -> ApiRequest {
    let request = match target.mode() {
        TargetMode::Subreddit => {
            ApiRequest::new(format!("/r/{}/{}.json", target.name(), sort.as_str()))
        }
        TargetMode::User => ApiRequest::new(format!("/user/{}/submitted.json", target.name()))
            .param("sort", sort.as_str()),
    };

    let mut request = request.param("limit", limit).param("raw_json", 1);

    if let Some(window) = time_filter {
        request = request.param("t", window.as_str());
    }

    if let Some(after) = after {
        request = request.param("after", after);
    }

    request
}

/// Builds the single search request issued for one keyword
pub fn search_request(target: &Target, keyword: &str, limit: usize) -> ApiRequest {
    let request = match target.mode() {
        TargetMode::Subreddit => ApiRequest::new(format!("/r/{}/search.json", target.name()))
            .param("q", keyword)
            .param("restrict_sr", 1),
        TargetMode::User => ApiRequest::new("/search.json")
            .param("q", format!("author:{} {}", target.name(), keyword)),
    };

    request
        .param("sort", "relevance")
        .param("t", "all")
        .param("limit", limit)
        .param("raw_json", 1)
}
