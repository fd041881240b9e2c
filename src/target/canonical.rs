use crate::target::normalize::is_reddit_host;
use url::Url;

/// Host every reddit alias is folded onto
const CANONICAL_HOST: &str = "www.reddit.com";

/// Tracking query parameters dropped during canonicalization
const TRACKING_PARAMS: &[&str] = &[
    "fbclid", "gclid", "msclkid", "mc_cid", "mc_eid", "ref", "ref_source", "referrer", "source",
    "share_id", "igshid", "_ga", "_gid", "context",
];

/// Canonicalizes a post URL
///
/// # Canonicalization Steps
///
/// 1. Parse the URL; unparseable input is returned unchanged
/// 2. Force HTTPS
/// 3. Fold reddit host aliases (`old.`, `new.`, `np.`, bare) onto `www.reddit.com`
/// 4. Collapse empty path segments and drop the trailing slash
/// 5. Drop the fragment
/// 6. Drop tracking query parameters, sort the rest, drop an empty query
///
/// The result is only ever used to fetch a post later; identity is the post id.
///
/// # Examples
///
/// ```
/// use reddit_harvest::target::canonicalize_url;
///
/// let url = canonicalize_url("http://old.reddit.com/r/rust/comments/abc/title/?utm_source=share");
/// assert_eq!(url, "https://www.reddit.com/r/rust/comments/abc/title");
/// ```
pub fn canonicalize_url(raw: &str) -> String {
    let mut url = match Url::parse(raw) {
        Ok(url) => url,
        Err(_) => return raw.to_string(),
    };

    if url.scheme() == "http" {
        // http -> https never fails for special schemes
        let _ = url.set_scheme("https");
    }

    let host = url.host_str().map(|h| h.to_lowercase());
    if let Some(host) = host {
        if is_reddit_host(&host) && host != CANONICAL_HOST {
            let _ = url.set_host(Some(CANONICAL_HOST));
        }
    }

    let path = normalize_path(url.path());
    url.set_path(&path);
    url.set_fragment(None);

    if url.query().is_some() {
        let params = filter_and_sort_query_params(&url);
        if params.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(params);
        }
    }

    url.to_string()
}

/// Collapses repeated slashes and removes the trailing slash (except for root)
fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return "/".to_string();
    }
    format!("/{}", segments.join("/"))
}

/// Filters out tracking parameters and sorts remaining query parameters
fn filter_and_sort_query_params(url: &Url) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    params.sort_by(|a, b| a.0.cmp(&b.0));
    params
}

fn is_tracking_param(key: &str) -> bool {
    TRACKING_PARAMS.contains(&key) || key.starts_with("utm_")
}
