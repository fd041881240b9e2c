use crate::target::{Target, TargetMode};
use crate::{TargetError, TargetResult};
use url::Url;

/// Normalizes a raw target string into a [`Target`]
///
/// # Accepted Forms
///
/// | Input | Result |
/// |-------|--------|
/// | `rust` | subreddit `rust` |
/// | `r/rust`, `/r/rust/` | subreddit `rust` |
/// | `u/spez`, `user/spez` | user `spez` |
/// | `https://www.reddit.com/r/rust/top/` | subreddit `rust` |
/// | `old.reddit.com/user/spez` | user `spez` |
///
/// Anything else is rejected; nothing silently defaults.
///
/// # Examples
///
/// ```
/// use reddit_harvest::target::{normalize_target, TargetMode};
///
/// let target = normalize_target("https://old.reddit.com/r/rust/new/").unwrap();
/// assert_eq!(target.mode(), TargetMode::Subreddit);
/// assert_eq!(target.name(), "rust");
/// ```
pub fn normalize_target(raw: &str) -> TargetResult<Target> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TargetError::Empty);
    }

    if looks_like_url(trimmed) {
        return target_from_url(trimmed);
    }

    let path = trimmed.trim_start_matches('/');
    if !path.contains('/') {
        return Target::new(TargetMode::Subreddit, path);
    }

    target_from_segments(path.split('/'), trimmed)
}

/// Returns true when the input carries a scheme or a dotted host
fn looks_like_url(input: &str) -> bool {
    if input.contains("://") {
        return true;
    }

    // Names never contain dots, so a dotted first segment must be a host
    input
        .trim_start_matches('/')
        .split('/')
        .next()
        .is_some_and(|first| first.contains('.'))
}

fn target_from_url(input: &str) -> TargetResult<Target> {
    let with_scheme = if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    let url = Url::parse(&with_scheme)
        .map_err(|_| TargetError::Unrecognized(input.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(TargetError::Unrecognized(input.to_string()));
    }

    let host = url
        .host_str()
        .ok_or_else(|| TargetError::Unrecognized(input.to_string()))?
        .to_lowercase();

    if !is_reddit_host(&host) {
        return Err(TargetError::UnsupportedHost(host));
    }

    target_from_segments(url.path().trim_start_matches('/').split('/'), input)
}

/// Resolves `r/<name>/...`, `u/<name>/...` and `user/<name>/...` paths
fn target_from_segments<'a>(
    mut segments: impl Iterator<Item = &'a str>,
    original: &str,
) -> TargetResult<Target> {
    let prefix = segments.next().unwrap_or_default().to_ascii_lowercase();
    let name = segments
        .find(|segment| !segment.is_empty())
        .ok_or_else(|| TargetError::Unrecognized(original.to_string()))?;

    match prefix.as_str() {
        "r" => Target::new(TargetMode::Subreddit, name),
        "u" | "user" => Target::new(TargetMode::User, name),
        _ => Err(TargetError::Unrecognized(original.to_string())),
    }
}

/// Returns true for reddit.com and any of its subdomains (www, old, new, np, m)
pub(crate) fn is_reddit_host(host: &str) -> bool {
    host == "reddit.com" || host.ends_with(".reddit.com")
}
