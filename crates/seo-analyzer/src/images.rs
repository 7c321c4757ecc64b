//! Image accessibility extractor: alt classification, role=img labels, bare svg.

use scraper::{Html, Selector};
use seo_types::{Issue, Severity};

const SAMPLE_CAP: usize = 20;

pub struct ImageSignals {
    pub total_images: u32,
    pub images_without_alt: u32,
    pub images_without_alt_urls: Vec<String>,
    pub images_with_empty_alt: u32,
    pub images_with_empty_alt_urls: Vec<String>,
}

pub fn extract(document: &Html, issues: &mut Vec<Issue>) -> ImageSignals {
    let mut total_images = 0u32;
    let mut images_without_alt = 0u32;
    let mut images_without_alt_urls = Vec::new();
    let mut images_with_empty_alt = 0u32;
    let mut images_with_empty_alt_urls = Vec::new();

    if let Ok(selector) = Selector::parse("img") {
        for el in document.select(&selector) {
            total_images += 1;
            let src = el.value().attr("src").unwrap_or("").to_string();
            match el.value().attr("alt") {
                None => {
                    images_without_alt += 1;
                    if images_without_alt_urls.len() < SAMPLE_CAP {
                        images_without_alt_urls.push(src);
                    }
                }
                Some(alt) if alt.trim().is_empty() => {
                    images_with_empty_alt += 1;
                    if images_with_empty_alt_urls.len() < SAMPLE_CAP {
                        images_with_empty_alt_urls.push(src);
                    }
                }
                Some(_) => {}
            }
        }
    }

    if images_without_alt > 0 {
        issues.push(Issue::new(
            Severity::Warning,
            "images_missing_alt",
            format!("{images_without_alt} image(s) have no alt attribute"),
        ));
    }
    if images_with_empty_alt > 0 {
        issues.push(Issue::new(
            Severity::Warning,
            "images_empty_alt",
            format!("{images_with_empty_alt} image(s) have an empty alt attribute"),
        ));
    }

    if let Ok(selector) = Selector::parse(r#"[role="img"]"#) {
        let missing_label = document
            .select(&selector)
            .filter(|el| el.value().attr("aria-label").is_none())
            .count();
        if missing_label > 0 {
            issues.push(Issue::new(
                Severity::Warning,
                "role_img_missing_label",
                format!("{missing_label} role=img element(s) have no aria-label"),
            ));
        }
    }

    if let Ok(selector) = Selector::parse("svg") {
        let title_selector = Selector::parse("title").ok();
        let missing_title = document
            .select(&selector)
            .filter(|el| {
                el.value().attr("aria-label").is_none()
                    && title_selector
                        .as_ref()
                        .map(|sel| el.select(sel).next().is_none())
                        .unwrap_or(true)
            })
            .count();
        if missing_title > 0 {
            issues.push(Issue::new(
                Severity::Info,
                "svg_missing_title",
                format!("{missing_title} inline <svg> element(s) have no <title> or aria-label"),
            ));
        }
    }

    ImageSignals {
        total_images,
        images_without_alt,
        images_without_alt_urls,
        images_with_empty_alt,
        images_with_empty_alt_urls,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_missing_and_empty_alt() {
        let html = r#"<html><body>
            <img src="/a.png">
            <img src="/b.png" alt="">
            <img src="/c.png" alt="ok">
        </body></html>"#;
        let doc = Html::parse_document(html);
        let mut issues = Vec::new();
        let signals = extract(&doc, &mut issues);
        assert_eq!(signals.total_images, 3);
        assert_eq!(signals.images_without_alt, 1);
        assert_eq!(signals.images_with_empty_alt, 1);
        assert_eq!(signals.images_without_alt_urls, vec!["/a.png"]);
        assert!(issues.iter().any(|i| i.issue_type == "images_missing_alt"));
        assert!(issues.iter().any(|i| i.issue_type == "images_empty_alt"));
    }

    #[test]
    fn bare_svg_without_title_is_info() {
        let doc = Html::parse_document("<html><body><svg><path/></svg></body></html>");
        let mut issues = Vec::new();
        extract(&doc, &mut issues);
        assert!(issues.iter().any(|i| i.issue_type == "svg_missing_title" && i.severity == Severity::Info));
    }

    #[test]
    fn no_images_emits_no_issues() {
        let doc = Html::parse_document("<html><body></body></html>");
        let mut issues = Vec::new();
        let signals = extract(&doc, &mut issues);
        assert_eq!(signals.total_images, 0);
        assert!(issues.is_empty());
    }
}
