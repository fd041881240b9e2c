//! Listing payload parser
//!
//! Listing and search endpoints answer with the same envelope:
//!
//! ```json
//! {"kind": "Listing", "data": {"after": "t3_abc", "children": [
//!     {"kind": "t3", "data": {"id": "abc", "permalink": "/r/x/comments/abc/title/"}}
//! ]}}
//! ```

use crate::strategy::CandidateId;
use crate::target::canonicalize_url;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Origin used for candidate URLs, independent of the API base URL
pub const PERMALINK_BASE: &str = "https://www.reddit.com";

/// Kind tag of a post in listing payloads
const POST_KIND: &str = "t3";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    #[error("Malformed listing payload: {0}")]
    Malformed(String),
}

/// One parsed page of a listing
#[derive(Debug, Clone)]
pub struct ListingPage {
    /// Posts in the order the endpoint returned them
    pub candidates: Vec<CandidateId>,

    /// Cursor for the next page; `None` when the listing is exhausted
    pub after: Option<String>,

    /// Children on the page before filtering out non-posts
    pub raw_count: usize,
}

impl ListingPage {
    pub fn is_empty(&self) -> bool {
        self.raw_count == 0
    }
}

#[derive(Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
    after: Option<String>,
    children: Vec<Child>,
}

#[derive(Deserialize)]
struct Child {
    kind: Option<String>,
    data: ChildData,
}

#[derive(Deserialize)]
struct ChildData {
    id: Option<String>,
    permalink: Option<String>,
}

/// Parses a listing payload into candidates and the next cursor
///
/// Non-post children and children without an id are skipped. A payload that
/// does not have the listing shape at all is an error.
pub fn parse_listing(payload: &Value) -> Result<ListingPage, ListingError> {
    let listing = Listing::deserialize(payload).map_err(|e| ListingError::Malformed(e.to_string()))?;

    let raw_count = listing.data.children.len();
    let candidates = listing
        .data
        .children
        .into_iter()
        .filter(|child| child.kind.as_deref().map_or(true, |kind| kind == POST_KIND))
        .filter_map(|child| {
            let id = child.data.id.filter(|id| !id.is_empty())?;
            let url = candidate_url(&id, child.data.permalink.as_deref());
            Some(CandidateId::new(url, id))
        })
        .collect();

    let after = listing.data.after.filter(|after| !after.is_empty());

    Ok(ListingPage {
        candidates,
        after,
        raw_count,
    })
}

/// Builds the canonical URL for a post
fn candidate_url(id: &str, permalink: Option<&str>) -> String {
    match permalink {
        Some(link) if link.starts_with("http") => canonicalize_url(link),
        Some(link) if link.starts_with('/') => {
            canonicalize_url(&format!("{}{}", PERMALINK_BASE, link))
        }
        _ => format!("{}/comments/{}", PERMALINK_BASE, id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_listing() {
        let payload = json!({
            "kind": "Listing",
            "data": {
                "after": "t3_b",
                "children": [
                    {"kind": "t3", "data": {"id": "a", "permalink": "/r/rust/comments/a/first/"}},
                    {"kind": "t3", "data": {"id": "b", "permalink": "/r/rust/comments/b/second/", "score": 10}}
                ]
            }
        });

        let page = parse_listing(&payload).unwrap();
        assert_eq!(page.raw_count, 2);
        assert_eq!(page.after.as_deref(), Some("t3_b"));
        assert_eq!(page.candidates[0].id, "a");
        assert_eq!(
            page.candidates[0].url,
            "https://www.reddit.com/r/rust/comments/a/first"
        );
        assert_eq!(page.candidates[1].id, "b");
    }

    #[test]
    fn test_null_after_means_exhausted() {
        let payload = json!({"data": {"after": null, "children": []}});
        let page = parse_listing(&payload).unwrap();
        assert!(page.after.is_none());
        assert!(page.is_empty());

        let payload = json!({"data": {"after": "", "children": []}});
        assert!(parse_listing(&payload).unwrap().after.is_none());
    }

    #[test]
    fn test_non_posts_and_missing_ids_skipped() {
        let payload = json!({
            "data": {
                "after": null,
                "children": [
                    {"kind": "t1", "data": {"id": "comment1"}},
                    {"kind": "t3", "data": {"title": "no id"}},
                    {"kind": "t3", "data": {"id": "kept"}}
                ]
            }
        });

        let page = parse_listing(&payload).unwrap();
        assert_eq!(page.raw_count, 3);
        assert!(!page.is_empty());
        assert_eq!(page.candidates.len(), 1);
        assert_eq!(page.candidates[0].id, "kept");
        assert_eq!(page.candidates[0].url, "https://www.reddit.com/comments/kept");
    }

    #[test]
    fn test_absolute_permalink_canonicalized() {
        let payload = json!({
            "data": {
                "after": null,
                "children": [
                    {"kind": "t3", "data": {"id": "a", "permalink": "https://old.reddit.com/r/x/comments/a/t/"}}
                ]
            }
        });
        let page = parse_listing(&payload).unwrap();
        assert_eq!(page.candidates[0].url, "https://www.reddit.com/r/x/comments/a/t");
    }

    #[test]
    fn test_malformed_payloads() {
        assert!(parse_listing(&Value::Null).is_err());
        assert!(parse_listing(&json!({"error": 403})).is_err());
        assert!(parse_listing(&json!({"data": {"children": "nope"}})).is_err());
        assert!(parse_listing(&json!([1, 2, 3])).is_err());
    }
}
