//! Code-to-text ratio extractor.

use seo_types::{Issue, Severity};

pub struct RatioSignals {
    pub code_to_text_ratio: f64,
    pub html_size: usize,
    pub text_size: usize,
}

pub fn extract(text: &str, html_bytes: usize, issues: &mut Vec<Issue>) -> RatioSignals {
    let code_to_text_ratio = crate::text::code_to_text_ratio(text, html_bytes);

    if code_to_text_ratio < 10.0 {
        issues.push(Issue::new(
            Severity::Warning,
            "low_text_ratio",
            format!("Text makes up only {code_to_text_ratio}% of page bytes"),
        ));
    } else if code_to_text_ratio > 90.0 {
        issues.push(Issue::new(
            Severity::Info,
            "high_text_ratio",
            format!("Text makes up {code_to_text_ratio}% of page bytes"),
        ));
    }

    RatioSignals {
        code_to_text_ratio,
        html_size: html_bytes,
        text_size: text.len(),
    }
}
