//! Canonical-tag extractor.

use scraper::{Html, Selector};
use seo_types::{model::CanonicalIssueTag, urlnorm, Issue, Severity};

pub struct CanonicalSignals {
    pub canonical_url: Option<String>,
    pub canonical_issues: Vec<CanonicalIssueTag>,
}

pub fn extract(document: &Html, page_url: &str, issues: &mut Vec<Issue>) -> CanonicalSignals {
    let href = Selector::parse(r#"link[rel="canonical"]"#)
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .and_then(|el| el.value().attr("href"))
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string);

    let mut canonical_issues = Vec::new();

    let Some(href) = href else {
        issues.push(Issue::new(
            Severity::Warning,
            "missing_canonical",
            "Page has no canonical link tag",
        ));
        canonical_issues.push(CanonicalIssueTag::Missing);
        return CanonicalSignals {
            canonical_url: None,
            canonical_issues,
        };
    };

    let is_absolute = url::Url::parse(&href).is_ok();
    if !is_absolute {
        canonical_issues.push(CanonicalIssueTag::Relative);
        issues.push(Issue::new(
            Severity::Info,
            "canonical_relative",
            "Canonical href has no scheme",
        ));
    }

    if let Ok(resolved) = urlnorm::resolve(page_url, &href) {
        match (urlnorm::normalized_host(&resolved), urlnorm::normalized_host(page_url)) {
            (Ok(canonical_host), Ok(page_host)) if canonical_host != page_host => {
                canonical_issues.push(CanonicalIssueTag::External);
                issues.push(Issue::new(
                    Severity::Warning,
                    "canonical_external",
                    format!("Canonical points to a different host: {canonical_host}"),
                ));
            }
            _ => {
                if let (Ok(canonical_key), Ok(page_key)) =
                    (urlnorm::dedup_key(&resolved), urlnorm::dedup_key(page_url))
                {
                    if canonical_key != page_key {
                        canonical_issues.push(CanonicalIssueTag::NotSelfReferencing);
                    }
                }
            }
        }
    }

    CanonicalSignals {
        canonical_url: Some(href),
        canonical_issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_canonical_is_warning() {
        let doc = Html::parse_document("<html><head></head></html>");
        let mut issues = Vec::new();
        let signals = extract(&doc, "https://e.x/a", &mut issues);
        assert_eq!(signals.canonical_issues, vec![CanonicalIssueTag::Missing]);
        assert!(issues.iter().any(|i| i.issue_type == "missing_canonical"));
    }

    #[test]
    fn external_canonical_is_flagged() {
        let html = r#"<html><head><link rel="canonical" href="https://other.x/a"></head></html>"#;
        let doc = Html::parse_document(html);
        let mut issues = Vec::new();
        let signals = extract(&doc, "https://e.x/a", &mut issues);
        assert!(signals.canonical_issues.contains(&CanonicalIssueTag::External));
        assert!(issues.iter().any(|i| i.issue_type == "canonical_external"));
    }

    #[test]
    fn relative_canonical_is_info() {
        let html = r#"<html><head><link rel="canonical" href="/a"></head></html>"#;
        let doc = Html::parse_document(html);
        let mut issues = Vec::new();
        let signals = extract(&doc, "https://e.x/a", &mut issues);
        assert!(signals.canonical_issues.contains(&CanonicalIssueTag::Relative));
        assert!(issues.iter().any(|i| i.issue_type == "canonical_relative" && i.severity == Severity::Info));
    }

    #[test]
    fn not_self_referencing_tag_emits_no_issue() {
        let html = r#"<html><head><link rel="canonical" href="https://e.x/b"></head></html>"#;
        let doc = Html::parse_document(html);
        let mut issues = Vec::new();
        let signals = extract(&doc, "https://e.x/a", &mut issues);
        assert!(signals
            .canonical_issues
            .contains(&CanonicalIssueTag::NotSelfReferencing));
        assert!(issues.is_empty());
    }

    #[test]
    fn self_referencing_canonical_is_clean() {
        let html = r#"<html><head><link rel="canonical" href="https://e.x/a"></head></html>"#;
        let doc = Html::parse_document(html);
        let mut issues = Vec::new();
        let signals = extract(&doc, "https://e.x/a", &mut issues);
        assert!(signals.canonical_issues.is_empty());
        assert!(issues.is_empty());
    }
}
