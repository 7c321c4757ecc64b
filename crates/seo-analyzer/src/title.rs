//! Title extractor.

use scraper::{Html, Selector};
use seo_types::{Issue, Severity};

pub struct TitleSignals {
    pub title: Option<String>,
    pub title_length: usize,
}

pub fn extract(document: &Html, issues: &mut Vec<Issue>) -> TitleSignals {
    let title = Selector::parse("title")
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .map(|el| el.text().collect::<String>())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    let title_length = title.as_ref().map(|t| t.chars().count()).unwrap_or(0);

    match title_length {
        0 => issues.push(Issue::new(
            Severity::Critical,
            "missing_title",
            "Page has no <title> element",
        )),
        1..=29 => issues.push(Issue::new(
            Severity::Warning,
            "short_title",
            format!("Title is only {title_length} characters (recommended 30-60)"),
        )),
        61.. => issues.push(Issue::new(
            Severity::Warning,
            "long_title",
            format!("Title is {title_length} characters (recommended 30-60)"),
        )),
        _ => {}
    }

    TitleSignals { title, title_length }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_title_is_critical() {
        let doc = Html::parse_document("<html><body></body></html>");
        let mut issues = Vec::new();
        let signals = extract(&doc, &mut issues);
        assert!(signals.title.is_none());
        assert!(issues.iter().any(|i| i.issue_type == "missing_title"));
    }

    #[test]
    fn boundary_thirty_chars_is_clean() {
        let title = "a".repeat(30);
        let html = format!("<html><head><title>{title}</title></head></html>");
        let doc = Html::parse_document(&html);
        let mut issues = Vec::new();
        let signals = extract(&doc, &mut issues);
        assert_eq!(signals.title_length, 30);
        assert!(issues.is_empty());
    }

    #[test]
    fn boundary_twenty_nine_chars_is_short() {
        let title = "a".repeat(29);
        let html = format!("<html><head><title>{title}</title></head></html>");
        let doc = Html::parse_document(&html);
        let mut issues = Vec::new();
        extract(&doc, &mut issues);
        assert!(issues.iter().any(|i| i.issue_type == "short_title"));
    }

    #[test]
    fn boundary_sixty_one_chars_is_long() {
        let title = "a".repeat(61);
        let html = format!("<html><head><title>{title}</title></head></html>");
        let doc = Html::parse_document(&html);
        let mut issues = Vec::new();
        extract(&doc, &mut issues);
        assert!(issues.iter().any(|i| i.issue_type == "long_title"));
    }
}
