//! Meta-tag extractors: description, robots, viewport, Open Graph.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use seo_types::{Issue, Severity};

static DESCRIPTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new("(?i)description").unwrap());
static ROBOTS_RE: Lazy<Regex> = Lazy::new(|| Regex::new("(?i)robots").unwrap());

fn meta_content_matching(document: &Html, attr: &str, pattern: &Regex) -> Option<String> {
    let selector = Selector::parse("meta").ok()?;
    document.select(&selector).find_map(|el| {
        let name = el.value().attr(attr)?;
        if !pattern.is_match(name) {
            return None;
        }
        let content = el.value().attr("content")?.trim();
        (!content.is_empty()).then(|| content.to_string())
    })
}

fn meta_content_exact(document: &Html, attr: &str, value: &str) -> Option<String> {
    let selector = Selector::parse("meta").ok()?;
    document.select(&selector).find_map(|el| {
        if el.value().attr(attr)? != value {
            return None;
        }
        let content = el.value().attr("content")?.trim();
        (!content.is_empty()).then(|| content.to_string())
    })
}

pub struct MetaDescriptionSignals {
    pub meta_description: Option<String>,
    pub meta_description_length: usize,
}

pub fn extract_description(document: &Html, issues: &mut Vec<Issue>) -> MetaDescriptionSignals {
    let meta_description = meta_content_matching(document, "name", &DESCRIPTION_RE);
    let meta_description_length = meta_description.as_ref().map(|d| d.chars().count()).unwrap_or(0);

    match meta_description_length {
        0 => issues.push(Issue::new(
            Severity::Critical,
            "missing_meta_description",
            "Page has no meta description",
        )),
        1..=119 => issues.push(Issue::new(
            Severity::Warning,
            "short_meta_description",
            format!("Meta description is only {meta_description_length} characters"),
        )),
        161.. => issues.push(Issue::new(
            Severity::Warning,
            "long_meta_description",
            format!("Meta description is {meta_description_length} characters"),
        )),
        _ => {}
    }

    MetaDescriptionSignals {
        meta_description,
        meta_description_length,
    }
}

pub struct RobotsMetaSignals {
    pub robots_meta: Option<String>,
    pub is_noindex: bool,
    pub is_nofollow_meta: bool,
}

pub fn extract_robots_meta(document: &Html, issues: &mut Vec<Issue>) -> RobotsMetaSignals {
    let robots_meta = meta_content_matching(document, "name", &ROBOTS_RE);
    let lower = robots_meta.as_deref().map(str::to_lowercase).unwrap_or_default();
    let is_noindex = lower.contains("noindex");
    let is_nofollow_meta = lower.contains("nofollow");

    if is_noindex {
        issues.push(Issue::new(Severity::Warning, "noindex", "Page has robots noindex directive"));
    }
    if is_nofollow_meta {
        issues.push(Issue::new(
            Severity::Warning,
            "nofollow_meta",
            "Page has robots nofollow directive",
        ));
    }

    RobotsMetaSignals {
        robots_meta,
        is_noindex,
        is_nofollow_meta,
    }
}

pub fn extract_viewport(document: &Html, issues: &mut Vec<Issue>) -> bool {
    let selector = match Selector::parse("meta[name=viewport]") {
        Ok(s) => s,
        Err(_) => return false,
    };
    let has_viewport_meta = document.select(&selector).next().is_some();
    if !has_viewport_meta {
        issues.push(Issue::new(
            Severity::Critical,
            "missing_viewport",
            "Page has no viewport meta tag",
        ));
    }
    has_viewport_meta
}

pub struct OpenGraphSignals {
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
}

pub fn extract_open_graph(document: &Html, issues: &mut Vec<Issue>) -> OpenGraphSignals {
    let og_title = meta_content_exact(document, "property", "og:title");
    let og_description = meta_content_exact(document, "property", "og:description");
    let og_image = meta_content_exact(document, "property", "og:image");

    if og_title.is_none() {
        issues.push(Issue::new(Severity::Info, "missing_og_title", "Page has no og:title tag"));
    }
    if og_image.is_none() {
        issues.push(Issue::new(Severity::Info, "missing_og_image", "Page has no og:image tag"));
    }

    OpenGraphSignals {
        og_title,
        og_description,
        og_image,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_boundary_one_twenty_is_clean() {
        let desc = "a".repeat(120);
        let html = format!(r#"<html><head><meta name="description" content="{desc}"></head></html>"#);
        let doc = Html::parse_document(&html);
        let mut issues = Vec::new();
        let signals = extract_description(&doc, &mut issues);
        assert_eq!(signals.meta_description_length, 120);
        assert!(issues.is_empty());
    }

    #[test]
    fn description_boundary_one_nineteen_is_short() {
        let desc = "a".repeat(119);
        let html = format!(r#"<html><head><meta name="description" content="{desc}"></head></html>"#);
        let doc = Html::parse_document(&html);
        let mut issues = Vec::new();
        extract_description(&doc, &mut issues);
        assert!(issues.iter().any(|i| i.issue_type == "short_meta_description"));
    }

    #[test]
    fn robots_meta_detects_noindex_and_nofollow() {
        let html = r#"<html><head><meta name="robots" content="noindex, nofollow"></head></html>"#;
        let doc = Html::parse_document(html);
        let mut issues = Vec::new();
        let signals = extract_robots_meta(&doc, &mut issues);
        assert!(signals.is_noindex);
        assert!(signals.is_nofollow_meta);
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn viewport_absent_is_critical() {
        let doc = Html::parse_document("<html><head></head></html>");
        let mut issues = Vec::new();
        assert!(!extract_viewport(&doc, &mut issues));
        assert!(issues.iter().any(|i| i.issue_type == "missing_viewport"));
    }

    #[test]
    fn open_graph_missing_title_and_image_are_info() {
        let doc = Html::parse_document("<html><head></head></html>");
        let mut issues = Vec::new();
        extract_open_graph(&doc, &mut issues);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.severity == Severity::Info));
    }
}
