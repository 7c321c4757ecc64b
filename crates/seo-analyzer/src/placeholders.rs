//! Placeholder / lorem-ipsum content detector.
//!
//! `TODO:`/`FIXME:` are matched case-sensitively to avoid false positives on
//! words like the Spanish "todo"; the lorem-ipsum family is case-insensitive.

use once_cell::sync::Lazy;
use regex::Regex;
use seo_types::{Issue, PlaceholderHit, Severity};

const SAMPLE_CAP: usize = 20;
const CONTEXT_RADIUS: usize = 20;

static CASE_INSENSITIVE_PATTERNS: Lazy<Regex> = Lazy::new(|| {
    Regex::new("(?i)lorem ipsum|dolor sit amet|consectetur adipiscing").unwrap()
});
static CASE_SENSITIVE_PATTERNS: Lazy<Regex> = Lazy::new(|| Regex::new("TODO: |FIXME: ").unwrap());

fn context_around(text: &str, start: usize, end: usize) -> String {
    let from = text
        .char_indices()
        .rev()
        .find(|(i, _)| *i <= start.saturating_sub(CONTEXT_RADIUS))
        .map(|(i, _)| i)
        .unwrap_or(0);
    let to = text
        .char_indices()
        .find(|(i, _)| *i >= end + CONTEXT_RADIUS)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text[from..to].trim().to_string()
}

/// `text` is the page's visible text (script/style/noscript removed).
pub fn extract(text: &str, issues: &mut Vec<Issue>) -> (bool, Vec<PlaceholderHit>) {
    let mut hits = Vec::new();

    for m in CASE_INSENSITIVE_PATTERNS.find_iter(text) {
        if hits.len() >= SAMPLE_CAP {
            break;
        }
        hits.push(PlaceholderHit {
            text: m.as_str().to_string(),
            context: context_around(text, m.start(), m.end()),
        });
    }
    for m in CASE_SENSITIVE_PATTERNS.find_iter(text) {
        if hits.len() >= SAMPLE_CAP {
            break;
        }
        hits.push(PlaceholderHit {
            text: m.as_str().trim().to_string(),
            context: context_around(text, m.start(), m.end()),
        });
    }

    let has_placeholders = !hits.is_empty();
    if has_placeholders {
        issues.push(Issue::new(
            Severity::Critical,
            "placeholder_content",
            format!("Found {} placeholder/lorem-ipsum hit(s) in page text", hits.len()),
        ));
    }

    (has_placeholders, hits)
}
