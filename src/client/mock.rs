//! Scripted [`HttpClient`] for unit tests

use crate::client::{ApiRequest, ApiResponse, FetchError, HttpClient};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;

type Handler = dyn Fn(&ApiRequest, usize) -> Result<ApiResponse, FetchError> + Send + Sync;

/// Answers every request through a handler and records what was asked
pub(crate) struct MockClient {
    handler: Box<Handler>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockClient {
    /// The handler receives the request and its zero-based call index
    pub(crate) fn new(
        handler: impl Fn(&ApiRequest, usize) -> Result<ApiResponse, FetchError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn get_json(&self, request: &ApiRequest) -> Result<ApiResponse, FetchError> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };
        (self.handler)(request, index)
    }
}

/// Builds a listing payload of `t3` children with the given ids
pub(crate) fn listing_json(ids: &[&str], after: Option<&str>) -> Value {
    let children: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "kind": "t3",
                "data": {
                    "id": id,
                    "name": format!("t3_{}", id),
                    "permalink": format!("/r/test/comments/{}/post_{}/", id, id),
                }
            })
        })
        .collect();

    json!({
        "kind": "Listing",
        "data": { "after": after, "children": children }
    })
}

/// Ids `prefix0..prefix{n-1}`
pub(crate) fn ids(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{}{}", prefix, i)).collect()
}

pub(crate) fn as_strs(ids: &[String]) -> Vec<&str> {
    ids.iter().map(String::as_str).collect()
}
