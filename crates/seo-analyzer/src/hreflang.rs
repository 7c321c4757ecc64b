//! Hreflang extractor: alternate-language link validation.

use scraper::{Html, Selector};
use seo_types::{model::HreflangEntry, urlnorm, Issue, Severity};

pub struct HreflangSignals {
    pub has_hreflang: bool,
    pub hreflang_entries: Vec<HreflangEntry>,
    pub hreflang_issues: Vec<String>,
}

pub fn extract(
    document: &Html,
    page_url: &str,
    canonical_url: Option<&str>,
    is_noindex: bool,
    issues: &mut Vec<Issue>,
) -> HreflangSignals {
    let mut hreflang_entries = Vec::new();

    if let Ok(selector) = Selector::parse(r#"link[rel="alternate"][hreflang]"#) {
        for el in document.select(&selector) {
            let lang = el.value().attr("hreflang").unwrap_or("").to_string();
            let href = el.value().attr("href").unwrap_or("").to_string();
            hreflang_entries.push(HreflangEntry { lang, href });
        }
    }

    let has_hreflang = !hreflang_entries.is_empty();
    let mut hreflang_issues = Vec::new();

    if !has_hreflang {
        return HreflangSignals {
            has_hreflang,
            hreflang_entries,
            hreflang_issues,
        };
    }

    if hreflang_entries
        .iter()
        .any(|e| e.lang.trim().is_empty() || e.href.trim().is_empty())
    {
        hreflang_issues.push("hreflang entry with an empty href or lang".to_string());
    }

    if !hreflang_entries.iter().any(|e| e.lang.eq_ignore_ascii_case("x-default")) {
        hreflang_issues.push("hreflang set has no x-default entry".to_string());
    }

    let page_key = urlnorm::dedup_key(page_url).ok();
    let self_referenced = hreflang_entries.iter().any(|e| {
        urlnorm::resolve(page_url, &e.href)
            .ok()
            .and_then(|resolved| urlnorm::dedup_key(&resolved).ok())
            == page_key
    });
    if !self_referenced {
        hreflang_issues.push("hreflang set has no entry referencing this page itself".to_string());
    }

    if let Some(canonical_href) = canonical_url {
        if let Ok(resolved_canonical) = urlnorm::resolve(page_url, canonical_href) {
            if urlnorm::dedup_key(&resolved_canonical).ok() != page_key {
                hreflang_issues.push("canonical points elsewhere while hreflang is present".to_string());
            }
        }
    }

    if is_noindex {
        hreflang_issues.push("page has noindex meta alongside hreflang entries".to_string());
    }

    for message in &hreflang_issues {
        issues.push(Issue::new(Severity::Warning, "hreflang_issue", message.clone()));
    }

    HreflangSignals {
        has_hreflang,
        hreflang_entries,
        hreflang_issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_hreflang_is_clean() {
        let doc = Html::parse_document("<html><head></head></html>");
        let mut issues = Vec::new();
        let signals = extract(&doc, "https://e.x/a", None, false, &mut issues);
        assert!(!signals.has_hreflang);
        assert!(issues.is_empty());
    }

    #[test]
    fn missing_x_default_and_self_reference() {
        let html = r#"<html><head><link rel="alternate" hreflang="fr" href="https://e.x/fr"></head></html>"#;
        let doc = Html::parse_document(html);
        let mut issues = Vec::new();
        let signals = extract(&doc, "https://e.x/a", None, false, &mut issues);
        assert!(signals.has_hreflang);
        assert!(signals
            .hreflang_issues
            .iter()
            .any(|m| m.contains("x-default")));
        assert!(signals
            .hreflang_issues
            .iter()
            .any(|m| m.contains("referencing this page")));
    }

    #[test]
    fn self_referencing_with_x_default_is_clean() {
        let html = r#"<html><head>
            <link rel="alternate" hreflang="en" href="https://e.x/a">
            <link rel="alternate" hreflang="x-default" href="https://e.x/a">
        </head></html>"#;
        let doc = Html::parse_document(html);
        let mut issues = Vec::new();
        let signals = extract(&doc, "https://e.x/a", None, false, &mut issues);
        assert!(signals.hreflang_issues.is_empty());
        assert!(issues.is_empty());
    }

    #[test]
    fn noindex_with_hreflang_is_flagged() {
        let html = r#"<html><head>
            <link rel="alternate" hreflang="en" href="https://e.x/a">
            <link rel="alternate" hreflang="x-default" href="https://e.x/a">
        </head></html>"#;
        let doc = Html::parse_document(html);
        let mut issues = Vec::new();
        let signals = extract(&doc, "https://e.x/a", None, true, &mut issues);
        assert!(signals.hreflang_issues.iter().any(|m| m.contains("noindex")));
    }
}
