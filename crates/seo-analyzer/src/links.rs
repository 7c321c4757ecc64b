//! Link extractor: internal/external classification and nofollow scanning.
//!
//! Classification happens here, but the `nofollow_internal` issue is emitted
//! later by [`emit_nofollow_issue`] — the extractor order fixes "links" and
//! "nofollow" as two separate steps even though one pass over the DOM covers
//! both.

use scraper::{Html, Selector};
use seo_types::{urlnorm, Issue, Severity};

const SAMPLE_CAP: usize = 20;
const SKIPPED_SCHEMES: [&str; 3] = ["mailto:", "tel:", "javascript:"];

pub struct LinkSignals {
    pub internal_links: u32,
    pub external_links: u32,
    pub nofollow_links: u32,
    pub nofollow_internal_links: Vec<String>,
}

fn is_skipped(href: &str) -> bool {
    href.starts_with('#') || SKIPPED_SCHEMES.iter().any(|scheme| href.starts_with(scheme))
}

fn has_nofollow(rel: &str) -> bool {
    rel.split_whitespace().any(|token| token.eq_ignore_ascii_case("nofollow"))
}

pub fn extract(document: &Html, page_url: &str) -> LinkSignals {
    let mut internal_links = 0u32;
    let mut external_links = 0u32;
    let mut nofollow_links = 0u32;
    let mut nofollow_internal_links = Vec::new();

    let page_host = urlnorm::normalized_host(page_url).unwrap_or_default();

    if let Ok(selector) = Selector::parse("a[href]") {
        for el in document.select(&selector) {
            let Some(href) = el.value().attr("href") else {
                continue;
            };
            if is_skipped(href) {
                continue;
            }

            let link_host = url::Url::parse(href)
                .ok()
                .and_then(|u| u.host_str().map(|h| h.to_lowercase()));
            let is_internal = match &link_host {
                None => true,
                Some(host) => urlnorm::strip_www(host) == page_host,
            };
            if is_internal {
                internal_links += 1;
            } else {
                external_links += 1;
            }

            let nofollow = el.value().attr("rel").map(has_nofollow).unwrap_or(false);
            if nofollow {
                nofollow_links += 1;
                if is_internal && nofollow_internal_links.len() < SAMPLE_CAP {
                    nofollow_internal_links.push(href.to_string());
                }
            }
        }
    }

    LinkSignals {
        internal_links,
        external_links,
        nofollow_links,
        nofollow_internal_links,
    }
}

/// Emits the one `nofollow_internal` issue, if any internal link had it.
pub fn emit_nofollow_issue(signals: &LinkSignals, issues: &mut Vec<Issue>) {
    if !signals.nofollow_internal_links.is_empty() {
        issues.push(Issue::new(
            Severity::Warning,
            "nofollow_internal",
            format!(
                "{} internal link(s) carry rel=nofollow",
                signals.nofollow_internal_links.len()
            ),
        ));
    }
}
