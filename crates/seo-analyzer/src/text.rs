//! Visible-text extraction shared by the content, ratio, and placeholder extractors.

use scraper::node::Node;
use scraper::Html;

const EXCLUDED_TAGS: [&str; 3] = ["script", "style", "noscript"];

/// Concatenates every text node in `document` whose nearest element ancestor
/// is not `script`, `style`, or `noscript`, separated by single spaces.
pub fn visible_text(document: &Html) -> String {
    let mut out = String::new();
    for node_ref in document.tree.nodes() {
        let Node::Text(text) = node_ref.value() else {
            continue;
        };
        let excluded = node_ref.ancestors().any(|ancestor| {
            matches!(ancestor.value(), Node::Element(el) if EXCLUDED_TAGS.contains(&el.name()))
        });
        if !excluded {
            out.push_str(text);
            out.push(' ');
        }
    }
    out
}

/// Whitespace-split word count.
pub fn word_count(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

/// UTF-8 text bytes as a percentage of raw HTML bytes, rounded to one decimal.
pub fn code_to_text_ratio(text: &str, html_bytes: usize) -> f64 {
    if html_bytes == 0 {
        return 0.0;
    }
    let ratio = text.len() as f64 / html_bytes as f64 * 100.0;
    (ratio * 10.0).round() / 10.0
}
