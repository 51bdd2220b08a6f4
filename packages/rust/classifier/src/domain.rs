//! Hostname helpers shared by the classification rules.

use citelens_shared::normalize_domain;
use url::Url;

/// Parse `url` and return its normalized hostname, or `None` if the URL
/// does not parse or has no host.
pub fn host_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?;
    let host = normalize_domain(host);
    if host.is_empty() { None } else { Some(host) }
}

/// The last two dot-separated labels of a hostname.
///
/// Returns `None` when the host already has two labels or fewer, so callers
/// never retry a lookup with the same key.
pub fn root_domain(host: &str) -> Option<&str> {
    let (idx, _) = host.trim_end_matches('.').rmatch_indices('.').nth(1)?;
    Some(&host[idx + 1..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_from_valid_url() {
        assert_eq!(
            host_from_url("https://www.reddit.com/r/rust").as_deref(),
            Some("reddit.com")
        );
        assert_eq!(
            host_from_url("http://old.reddit.com/r/rust").as_deref(),
            Some("old.reddit.com")
        );
    }

    #[test]
    fn host_from_malformed_url() {
        assert_eq!(host_from_url("not a url"), None);
        assert_eq!(host_from_url(""), None);
        assert_eq!(host_from_url("reddit.com/r/rust"), None);
    }

    #[test]
    fn root_domain_of_subdomain() {
        assert_eq!(root_domain("m.wsj.com"), Some("wsj.com"));
        assert_eq!(root_domain("a.b.example.org"), Some("example.org"));
    }

    #[test]
    fn root_domain_of_bare_domain() {
        assert_eq!(root_domain("wsj.com"), None);
        assert_eq!(root_domain("localhost"), None);
    }
}
