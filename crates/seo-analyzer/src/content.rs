//! Word-count extractor (content quality).

use seo_types::{Issue, Severity};

const THIN_CONTENT_THRESHOLD: u32 = 300;

/// `text` is the page's visible text (script/style/noscript removed), already
/// computed once by the orchestrator and shared with the ratio and
/// placeholder extractors.
pub fn extract(text: &str, issues: &mut Vec<Issue>) -> u32 {
    let word_count = crate::text::word_count(text);
    if word_count < THIN_CONTENT_THRESHOLD {
        issues.push(Issue::new(
            Severity::Warning,
            "thin_content",
            format!("Page has only {word_count} words (recommended 300+)"),
        ));
    }
    word_count
}
