//! Performance-hint extractor: lazy-loading usage.

use scraper::{Html, Selector};
use seo_types::{Issue, Severity};

const LAZY_LOADING_IMAGE_THRESHOLD: u32 = 5;

pub fn extract(document: &Html, total_images: u32, issues: &mut Vec<Issue>) -> bool {
    let has_lazy_loading = Selector::parse(r#"img[loading="lazy"]"#)
        .ok()
        .map(|sel| document.select(&sel).next().is_some())
        .unwrap_or(false);

    if !has_lazy_loading && total_images > LAZY_LOADING_IMAGE_THRESHOLD {
        issues.push(Issue::new(
            Severity::Info,
            "no_lazy_loading",
            format!("Page has {total_images} images and none use loading=lazy"),
        ));
    }

    has_lazy_loading
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn few_images_without_lazy_loading_is_clean() {
        let doc = Html::parse_document("<html><body></body></html>");
        let mut issues = Vec::new();
        assert!(!extract(&doc, 0, &mut issues));
        assert!(issues.is_empty());
    }

    #[test]
    fn many_images_without_lazy_loading_is_info() {
        let doc = Html::parse_document("<html><body><img src=\"a\"></body></html>");
        let mut issues = Vec::new();
        extract(&doc, 6, &mut issues);
        assert!(issues.iter().any(|i| i.issue_type == "no_lazy_loading"));
    }

    #[test]
    fn lazy_attribute_present_suppresses_issue() {
        let doc = Html::parse_document(r#"<html><body><img src="a" loading="lazy"></body></html>"#);
        let mut issues = Vec::new();
        assert!(extract(&doc, 6, &mut issues));
        assert!(issues.is_empty());
    }
}
