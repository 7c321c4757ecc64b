//! Outbound URL discovery from a fetched page (spec §4.5).

use scraper::{Html, Selector};
use seo_types::urlnorm;

const SKIPPED_SCHEMES: [&str; 4] = ["mailto:", "tel:", "javascript:", "data:"];

/// Scans `document` for every `<a href>`, `<link rel=alternate|canonical href>`,
/// `<area href>`, and `<iframe src>`, resolves each against `final_url`, and
/// strips query/fragment. Returns verbatim resolved URLs without deduplicating
/// or domain-filtering — that's the caller's job (it needs the dedup key and
/// the effective base domain, neither of which this module knows about).
pub fn discover(document: &Html, final_url: &str) -> Vec<String> {
    let mut found = Vec::new();

    for (selector_str, attr) in [
        ("a[href]", "href"),
        (r#"link[rel="alternate"]"#, "href"),
        (r#"link[rel="canonical"]"#, "href"),
        ("area[href]", "href"),
        ("iframe[src]", "src"),
    ] {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        for el in document.select(&selector) {
            let Some(raw) = el.value().attr(attr) else {
                continue;
            };
            if is_skipped(raw) {
                continue;
            }
            if let Ok(resolved) = urlnorm::resolve(final_url, raw) {
                found.push(resolved);
            }
        }
    }

    found
}

fn is_skipped(href: &str) -> bool {
    let trimmed = href.trim();
    trimmed.starts_with('#') || SKIPPED_SCHEMES.iter().any(|s| trimmed.starts_with(s))
}
