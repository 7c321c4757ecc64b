//! Aggregation Engine output: the single-return-value Crawl Summary.

use crate::crawl::{RobotsTxtStatus, SitemapDescriptor};
use crate::model::Severity;
use serde::{Deserialize, Serialize};

/// Minimal reference to a page used inside summary collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRef {
    /// The page's URL.
    pub url: String,
}

/// A group of content-pages sharing an exact title or meta-description string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// The shared title or meta-description text.
    pub value: String,
    /// Number of pages sharing `value`.
    pub count: usize,
    /// The pages themselves.
    pub pages: Vec<PageRef>,
}

/// Count of pages for one HTTP status code, across the whole crawl.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCodeGroup {
    /// The HTTP status code.
    pub status_code: u16,
    /// Number of pages with this status.
    pub count: usize,
    /// The pages themselves.
    pub pages: Vec<PageRef>,
}

/// All occurrences of one issue type across the crawl, capped at 50 pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueBucket {
    /// The issue's type identifier (e.g. `missing_title`).
    pub category: String,
    /// Severity carried over from the first occurrence of this issue type
    /// seen while bucketing (every extractor assigns severity 1:1 with its
    /// issue type, so later occurrences always agree).
    pub severity: Severity,
    /// Total number of occurrences (not capped).
    pub count: usize,
    /// Sample pages, capped at 50.
    pub pages: Vec<PageRef>,
}

/// The Aggregation Engine's single return value for one crawl.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlSummary {
    /// Total Page Records, content-pages and redirect-pages combined.
    pub total_pages: usize,
    /// Average score across content-pages only, rounded to 0.1.
    pub avg_score: f64,
    /// Critical-severity issue count across content-pages.
    pub critical_issues: usize,
    /// Warning-severity issue count across content-pages, plus redirect-page
    /// `redirect` issues.
    pub warnings: usize,
    /// Info-severity issue count across content-pages.
    pub info_issues: usize,

    /// Content-pages sharing an exact title string, grouped.
    pub duplicate_titles: Vec<DuplicateGroup>,
    /// Content-pages sharing an exact meta-description string, grouped.
    pub duplicate_meta_descriptions: Vec<DuplicateGroup>,
    /// Breakdown by status code across every page (content and redirect).
    pub status_code_breakdown: Vec<StatusCodeGroup>,

    /// Every issue type bucketed, sorted by severity rank then descending count.
    pub issue_buckets: Vec<IssueBucket>,

    /// Content-pages with no `<title>`.
    pub pages_missing_title: usize,
    /// Content-pages with no meta description.
    pub pages_missing_meta: usize,
    /// Content-pages with zero `<h1>` elements.
    pub pages_missing_h1: usize,
    /// Content-pages with no viewport meta tag.
    pub pages_missing_viewport: usize,
    /// Content-pages with no structured data.
    pub pages_without_schema: usize,
    /// Sum of `images_without_alt` across content-pages.
    pub images_missing_alt_total: usize,
    /// Pages (any status) whose response time exceeded 3 seconds.
    pub slow_pages: usize,
    /// Content-pages with fewer than 300 words.
    pub thin_content_pages: usize,
    /// Content-pages with a code-to-text ratio below 10%.
    pub low_text_ratio_pages: usize,

    /// Copied verbatim from the crawl row.
    pub robots_txt_status: Option<RobotsTxtStatus>,
    /// Copied verbatim from the crawl row.
    pub sitemaps_found: Vec<SitemapDescriptor>,
}
