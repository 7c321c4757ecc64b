//! URL Normalizer: canonical-form resolution and deduplication keys (spec §3, §4.1).
//!
//! Two operations, both pure and both failing only on unparseable input:
//! [`resolve`] joins a possibly-relative URL against a base and strips its
//! query and fragment, producing the form enqueued for crawling; [`dedup_key`]
//! further collapses scheme/host casing, a leading `www.`, and a trailing
//! slash so two URLs that are "the same page" compare equal.

use crate::error::{Result, SeoError};
use url::Url;

/// Resolves `relative` against `base` and strips query and fragment.
/// Absolute input for `relative` is accepted too; `base` is then ignored.
pub fn resolve(base: &str, relative: &str) -> Result<String> {
    let base_url = Url::parse(base).map_err(SeoError::InvalidUrl)?;
    let mut joined = base_url.join(relative).map_err(SeoError::InvalidUrl)?;
    joined.set_query(None);
    joined.set_fragment(None);
    Ok(joined.to_string())
}

/// Computes the lossy deduplication key for a URL: lowercased scheme and
/// host with a leading `www.` stripped, path with its trailing `/` removed,
/// fragment and query dropped.
pub fn dedup_key(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(SeoError::InvalidUrl)?;
    let scheme = parsed.scheme().to_lowercase();
    let host = strip_www(&parsed.host_str().unwrap_or("").to_lowercase());
    let port = parsed.port().map(|p| format!(":{p}")).unwrap_or_default();
    let path = parsed.path().trim_end_matches('/');
    Ok(format!("{scheme}://{host}{port}{path}"))
}

/// Strips a single leading `www.` label from a hostname.
pub fn strip_www(host: &str) -> String {
    host.strip_prefix("www.").unwrap_or(host).to_string()
}

/// The normalized host for a URL: lowercased, leading `www.` stripped.
/// Used to test "is this URL in-domain" against the effective base domain.
pub fn normalized_host(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(SeoError::InvalidUrl)?;
    Ok(strip_www(&parsed.host_str().unwrap_or("").to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_strips_query_and_fragment() {
        let resolved = resolve("https://e.x/a/", "/b?x=1#frag").unwrap();
        assert_eq!(resolved, "https://e.x/b");
    }

    #[test]
    fn resolve_joins_relative_path() {
        let resolved = resolve("https://e.x/a/b", "c").unwrap();
        assert_eq!(resolved, "https://e.x/a/c");
    }

    #[test]
    fn resolve_is_idempotent() {
        let once = resolve("https://e.x/", "/a/b?x=1").unwrap();
        let twice = resolve(&once, &once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn dedup_key_strips_www_and_trailing_slash() {
        let a = dedup_key("https://www.example.com/a/").unwrap();
        let b = dedup_key("https://example.com/a").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn dedup_key_is_case_insensitive_on_scheme_and_host() {
        let a = dedup_key("HTTPS://Example.com/a").unwrap();
        let b = dedup_key("https://example.com/a").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn dedup_key_drops_query_and_fragment() {
        let a = dedup_key("https://example.com/a?x=1#f").unwrap();
        let b = dedup_key("https://example.com/a").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn dedup_key_is_idempotent() {
        let once = dedup_key("https://www.example.com/a/").unwrap();
        let twice = dedup_key(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn unparseable_base_is_an_error() {
        assert!(resolve("not-a-url", "/a").is_err());
    }

    #[test]
    fn unparseable_dedup_input_is_an_error() {
        assert!(dedup_key("not-a-url").is_err());
    }
}
