//! Per-page data model: issues, signals, and the page record they compose into.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Severity of one emitted [`Issue`].
///
/// Ordered so that `Severity::Critical < Severity::Warning < Severity::Info`,
/// matching the aggregation engine's bucket sort (critical first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Subtracts 15 points; blocks indexing or is otherwise load-bearing.
    Critical,
    /// Subtracts 7 points; should be fixed but doesn't break the page.
    Warning,
    /// Subtracts 2 points; a suggestion.
    Info,
}

impl Severity {
    /// Points subtracted from a page's starting score of 100.
    pub fn score_penalty(self) -> i32 {
        match self {
            Severity::Critical => 15,
            Severity::Warning => 7,
            Severity::Info => 2,
        }
    }
}

/// One {severity, type, message} tuple emitted by a single extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// How serious this issue is.
    pub severity: Severity,
    /// Short, stable identifier (e.g. `missing_title`). Looked up against the
    /// canonical issue-type table during aggregation.
    pub issue_type: String,
    /// Human-readable description, safe to surface verbatim in a report.
    pub message: String,
}

impl Issue {
    /// Builds a new issue.
    pub fn new(severity: Severity, issue_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            issue_type: issue_type.into(),
            message: message.into(),
        }
    }
}

/// Tag describing why (or whether) a page's canonical URL is suspect.
///
/// Recorded as data — only `Missing` and `External` also emit an [`Issue`];
/// `NotSelfReferencing` is stored without penalizing the score (see DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalIssueTag {
    /// No `<link rel=canonical>` tag was present at all.
    Missing,
    /// The canonical host differs from the page's own host.
    External,
    /// The canonical href has no scheme (not an absolute URL).
    Relative,
    /// The canonical, once normalized, doesn't match the page's own URL.
    NotSelfReferencing,
}

/// One `<link rel=alternate hreflang>` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HreflangEntry {
    /// The `hreflang` attribute value, e.g. `en-US` or `x-default`.
    pub lang: String,
    /// The `href` attribute value.
    pub href: String,
}

/// One placeholder/lorem-ipsum hit found in a page's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderHit {
    /// The literal substring that matched.
    pub text: String,
    /// ~40 characters of surrounding context for display.
    pub context: String,
}

/// One persisted row per unique deduplication key within a crawl.
///
/// Produced by the page analyzer as a pure function of
/// `(url, html_bytes, status_code, elapsed)`; never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// Verbatim final URL (post-redirect, as returned by the server).
    pub url: String,
    /// Final HTTP status code.
    pub status_code: u16,
    /// Elapsed wall-clock time for the fetch.
    pub response_time: Duration,
    /// `Content-Type` response header, verbatim.
    pub content_type: String,
    /// Raw HTML byte length.
    pub content_length: usize,

    /// Text of the first `<title>`, whitespace-trimmed.
    pub title: Option<String>,
    /// `title.len()` in characters, or 0 if absent.
    pub title_length: usize,
    /// `content` of the first `<meta name=~description>`.
    pub meta_description: Option<String>,
    /// `meta_description.len()` in characters, or 0 if absent.
    pub meta_description_length: usize,

    /// `href` of the first `<link rel=canonical>`.
    pub canonical_url: Option<String>,
    /// Tags describing canonical-tag quality; see [`CanonicalIssueTag`].
    pub canonical_issues: Vec<CanonicalIssueTag>,

    /// `content` of the first `<meta name=~robots>`.
    pub robots_meta: Option<String>,
    /// Whether `robots_meta` contains `noindex`.
    pub is_noindex: bool,
    /// Whether `robots_meta` contains `nofollow`.
    pub is_nofollow_meta: bool,

    /// Number of `<h1>` elements.
    pub h1_count: u32,
    /// Text content of every `<h1>`.
    pub h1_texts: Vec<String>,
    /// Number of `<h2>` elements.
    pub h2_count: u32,
    /// Number of `<h3>` elements.
    pub h3_count: u32,
    /// Number of `<h4>` elements.
    pub h4_count: u32,
    /// Number of `<h5>` elements.
    pub h5_count: u32,
    /// Number of `<h6>` elements.
    pub h6_count: u32,

    /// Total `<img>` elements found.
    pub total_images: u32,
    /// Count of `<img>` elements with no `alt` attribute at all.
    pub images_without_alt: u32,
    /// Sample `src` values for images missing `alt`, capped at 20.
    pub images_without_alt_urls: Vec<String>,
    /// Count of `<img>` elements with `alt=""`.
    pub images_with_empty_alt: u32,
    /// Sample `src` values for images with empty `alt`, capped at 20.
    pub images_with_empty_alt_urls: Vec<String>,

    /// Count of `<a href>` whose host matches this page's host (or is relative).
    pub internal_links: u32,
    /// Count of `<a href>` whose host differs.
    pub external_links: u32,
    /// Count of all links (internal or external) carrying `rel=nofollow`.
    pub nofollow_links: u32,
    /// Raw hrefs of internal links carrying `rel=nofollow`, capped at 20.
    pub nofollow_internal_links: Vec<String>,

    /// Whether any `application/ld+json` script yielded at least one `@type`.
    pub has_schema_markup: bool,
    /// Every `@type` value found, including inside `@graph`.
    pub schema_types: Vec<String>,

    /// Whether a `<meta name=viewport>` tag is present.
    pub has_viewport_meta: bool,

    /// Whitespace-split word count of the text with `script`/`style`/`noscript` removed.
    pub word_count: u32,
    /// Whether any `<img loading=lazy>` was found.
    pub has_lazy_loading: bool,

    /// UTF-8 text bytes as a percentage of raw HTML bytes, rounded to 0.1.
    pub code_to_text_ratio: f64,
    /// Raw HTML byte length (duplicated from `content_length` for report convenience).
    pub html_size: usize,
    /// UTF-8 byte length of the extracted text used for the ratio.
    pub text_size: usize,

    /// `content` of `<meta property=og:title>`.
    pub og_title: Option<String>,
    /// `content` of `<meta property=og:description>`.
    pub og_description: Option<String>,
    /// `content` of `<meta property=og:image>`.
    pub og_image: Option<String>,

    /// Whether any `<link rel=alternate hreflang>` was found.
    pub has_hreflang: bool,
    /// Every hreflang entry found.
    pub hreflang_entries: Vec<HreflangEntry>,
    /// Human-readable hreflang conflict/consistency issues.
    pub hreflang_issues: Vec<String>,

    /// Whether any placeholder/lorem-ipsum text was found.
    pub has_placeholders: bool,
    /// Placeholder hits, capped at 20.
    pub placeholder_content: Vec<PlaceholderHit>,

    /// Populated only when this record's URL was itself a redirect hop.
    pub redirect_target: Option<String>,

    /// Ordered list of issues in fixed extractor order (see `analyze()`).
    pub issues: Vec<Issue>,
    /// Deterministic 0..100 score derived from `issues`.
    pub score: u8,
}
