//! Heading extractor: h1..h6 counts and h1 text list.

use scraper::{Html, Selector};
use seo_types::{Issue, Severity};

pub struct HeadingSignals {
    pub h1_count: u32,
    pub h1_texts: Vec<String>,
    pub h2_count: u32,
    pub h3_count: u32,
    pub h4_count: u32,
    pub h5_count: u32,
    pub h6_count: u32,
}

fn count_and_texts(document: &Html, tag: &str) -> (u32, Vec<String>) {
    let Ok(selector) = Selector::parse(tag) else {
        return (0, Vec::new());
    };
    let texts: Vec<String> = document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect();
    (texts.len() as u32, texts)
}

pub fn extract(document: &Html, issues: &mut Vec<Issue>) -> HeadingSignals {
    let (h1_count, h1_texts) = count_and_texts(document, "h1");
    let (h2_count, _) = count_and_texts(document, "h2");
    let (h3_count, _) = count_and_texts(document, "h3");
    let (h4_count, _) = count_and_texts(document, "h4");
    let (h5_count, _) = count_and_texts(document, "h5");
    let (h6_count, _) = count_and_texts(document, "h6");

    if h1_count == 0 {
        issues.push(Issue::new(Severity::Critical, "missing_h1", "Page has no <h1> element"));
    } else if h1_count > 1 {
        issues.push(Issue::new(
            Severity::Warning,
            "multiple_h1",
            format!("Page has {h1_count} <h1> elements"),
        ));
    }

    HeadingSignals {
        h1_count,
        h1_texts,
        h2_count,
        h3_count,
        h4_count,
        h5_count,
        h6_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_h1_is_critical() {
        let doc = Html::parse_document("<html><body></body></html>");
        let mut issues = Vec::new();
        let signals = extract(&doc, &mut issues);
        assert_eq!(signals.h1_count, 0);
        assert!(issues.iter().any(|i| i.issue_type == "missing_h1"));
    }

    #[test]
    fn multiple_h1_is_warning() {
        let doc = Html::parse_document("<html><body><h1>A</h1><h1>B</h1></body></html>");
        let mut issues = Vec::new();
        let signals = extract(&doc, &mut issues);
        assert_eq!(signals.h1_count, 2);
        assert_eq!(signals.h1_texts, vec!["A".to_string(), "B".to_string()]);
        assert!(issues.iter().any(|i| i.issue_type == "multiple_h1"));
    }

    #[test]
    fn single_h1_is_clean() {
        let doc = Html::parse_document("<html><body><h1>A</h1></body></html>");
        let mut issues = Vec::new();
        extract(&doc, &mut issues);
        assert!(issues.is_empty());
    }
}
