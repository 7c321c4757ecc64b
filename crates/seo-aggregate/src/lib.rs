//! Aggregation Engine: reduces one crawl's Page Records into a single
//! [`CrawlSummary`] (spec §4.6).
//!
//! [`summarize`] is a pure function over an already-loaded `(Crawl, Vec<PageRecord>)`
//! pair — fetching those from a [`Store`](seo_types::Store) is the caller's job.

mod buckets;
mod duplicates;

use seo_types::{Crawl, CrawlSummary, PageRecord, Severity};
use std::time::Duration;

const SLOW_PAGE_THRESHOLD: Duration = Duration::from_secs(3);
const THIN_CONTENT_WORDS: u32 = 300;
const LOW_TEXT_RATIO: f64 = 10.0;
const REDIRECT_STATUSES: [u16; 5] = [301, 302, 303, 307, 308];

fn is_content_page(record: &PageRecord) -> bool {
    (200..300).contains(&record.status_code)
}

fn is_redirect_page(record: &PageRecord) -> bool {
    REDIRECT_STATUSES.contains(&record.status_code)
}

/// Builds the Crawl Summary for `crawl` from its `records`.
pub fn summarize(crawl: &Crawl, records: &[PageRecord]) -> CrawlSummary {
    let content_pages: Vec<&PageRecord> = records.iter().filter(|r| is_content_page(r)).collect();
    let redirect_pages: Vec<&PageRecord> = records.iter().filter(|r| is_redirect_page(r)).collect();

    let avg_score = if content_pages.is_empty() {
        0.0
    } else {
        let sum: u32 = content_pages.iter().map(|r| r.score as u32).sum();
        (sum as f64 / content_pages.len() as f64 * 10.0).round() / 10.0
    };

    let mut critical_issues = 0usize;
    let mut warnings = 0usize;
    let mut info_issues = 0usize;
    for page in &content_pages {
        for issue in &page.issues {
            match issue.severity {
                Severity::Critical => critical_issues += 1,
                Severity::Warning => warnings += 1,
                Severity::Info => info_issues += 1,
            }
        }
    }
    // Each redirect-page is itself a warning-level SEO concern, tallied
    // alongside (not mixed into) content-page issue counts.
    warnings += redirect_pages.len();

    let duplicate_titles = duplicates::group_by(&content_pages, |r| r.title.clone());
    let duplicate_meta_descriptions =
        duplicates::group_by(&content_pages, |r| r.meta_description.clone());

    let status_code_breakdown = buckets::status_code_breakdown(records);
    let issue_buckets = buckets::issue_buckets(&content_pages);

    let pages_missing_title = content_pages.iter().filter(|r| r.title.is_none()).count();
    let pages_missing_meta = content_pages
        .iter()
        .filter(|r| r.meta_description.is_none())
        .count();
    let pages_missing_h1 = content_pages.iter().filter(|r| r.h1_count == 0).count();
    let pages_missing_viewport = content_pages.iter().filter(|r| !r.has_viewport_meta).count();
    let pages_without_schema = content_pages.iter().filter(|r| !r.has_schema_markup).count();
    let images_missing_alt_total: usize = content_pages
        .iter()
        .map(|r| r.images_without_alt as usize)
        .sum();
    let slow_pages = records
        .iter()
        .filter(|r| r.response_time > SLOW_PAGE_THRESHOLD)
        .count();
    let thin_content_pages = content_pages
        .iter()
        .filter(|r| r.word_count < THIN_CONTENT_WORDS)
        .count();
    let low_text_ratio_pages = content_pages
        .iter()
        .filter(|r| r.code_to_text_ratio < LOW_TEXT_RATIO)
        .count();

    CrawlSummary {
        total_pages: records.len(),
        avg_score,
        critical_issues,
        warnings,
        info_issues,

        duplicate_titles,
        duplicate_meta_descriptions,
        status_code_breakdown,

        issue_buckets,

        pages_missing_title,
        pages_missing_meta,
        pages_missing_h1,
        pages_missing_viewport,
        pages_without_schema,
        images_missing_alt_total,
        slow_pages,
        thin_content_pages,
        low_text_ratio_pages,

        robots_txt_status: crawl.robots_txt_status,
        sitemaps_found: crawl.sitemaps_found.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use seo_types::{CrawlStatus, Issue};

    fn crawl() -> Crawl {
        Crawl {
            id: 1,
            project_id: 1,
            status: CrawlStatus::Completed,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
            pages_crawled: 0,
            pages_total: 0,
            robots_txt_status: None,
            robots_txt_content: None,
            sitemaps_found: Vec::new(),
        }
    }

    fn content_page(url: &str, title: Option<&str>) -> PageRecord {
        let mut record = seo_analyzer_record_stub(url);
        record.title = title.map(str::to_string);
        record
    }

    fn seo_analyzer_record_stub(url: &str) -> PageRecord {
        PageRecord {
            url: url.to_string(),
            status_code: 200,
            response_time: Duration::from_millis(100),
            content_type: "text/html".to_string(),
            content_length: 100,
            title: None,
            title_length: 0,
            meta_description: None,
            meta_description_length: 0,
            canonical_url: None,
            canonical_issues: Vec::new(),
            robots_meta: None,
            is_noindex: false,
            is_nofollow_meta: false,
            h1_count: 1,
            h1_texts: vec!["H".to_string()],
            h2_count: 0,
            h3_count: 0,
            h4_count: 0,
            h5_count: 0,
            h6_count: 0,
            total_images: 0,
            images_without_alt: 0,
            images_without_alt_urls: Vec::new(),
            images_with_empty_alt: 0,
            images_with_empty_alt_urls: Vec::new(),
            internal_links: 0,
            external_links: 0,
            nofollow_links: 0,
            nofollow_internal_links: Vec::new(),
            has_schema_markup: true,
            schema_types: Vec::new(),
            has_viewport_meta: true,
            word_count: 500,
            has_lazy_loading: false,
            code_to_text_ratio: 50.0,
            html_size: 100,
            text_size: 50,
            og_title: None,
            og_description: None,
            og_image: None,
            has_hreflang: false,
            hreflang_entries: Vec::new(),
            hreflang_issues: Vec::new(),
            has_placeholders: false,
            placeholder_content: Vec::new(),
            redirect_target: None,
            issues: Vec::new(),
            score: 100,
        }
    }

    #[test]
    fn averages_score_over_content_pages_only() {
        let crawl = crawl();
        let mut redirect = seo_analyzer_record_stub("https://e.x/old");
        redirect.status_code = 301;
        redirect.score = 100;
        let mut low = content_page("https://e.x/a", Some("A"));
        low.score = 50;
        let records = vec![content_page("https://e.x/b", Some("B")), low, redirect];
        let summary = summarize(&crawl, &records);
        assert_eq!(summary.avg_score, 75.0);
        assert_eq!(summary.total_pages, 3);
    }

    #[test]
    fn redirect_pages_tally_into_warnings_not_content_counts() {
        let crawl = crawl();
        let mut redirect = seo_analyzer_record_stub("https://e.x/old");
        redirect.status_code = 301;
        let records = vec![content_page("https://e.x/a", Some("A")), redirect];
        let summary = summarize(&crawl, &records);
        assert_eq!(summary.warnings, 1);
        assert_eq!(summary.critical_issues, 0);
    }

    #[test]
    fn severity_counts_combine_content_page_issues_and_redirect_tally() {
        let crawl = crawl();
        let mut page = content_page("https://e.x/a", Some("A"));
        page.issues = vec![
            Issue::new(Severity::Critical, "missing_title", "no title"),
            Issue::new(Severity::Warning, "short_title", "too short"),
            Issue::new(Severity::Info, "no_schema_markup", "no schema"),
        ];
        let mut redirect = seo_analyzer_record_stub("https://e.x/old");
        redirect.status_code = 301;
        let records = vec![page, redirect];
        let summary = summarize(&crawl, &records);
        assert_eq!(summary.critical_issues, 1);
        assert_eq!(summary.warnings, 2); // one from the page, one from the redirect tally
        assert_eq!(summary.info_issues, 1);
    }

    #[test]
    fn duplicate_titles_require_more_than_one_member() {
        let crawl = crawl();
        let records = vec![
            content_page("https://e.x/a", Some("Same")),
            content_page("https://e.x/b", Some("Same")),
            content_page("https://e.x/c", Some("Unique")),
        ];
        let summary = summarize(&crawl, &records);
        assert_eq!(summary.duplicate_titles.len(), 1);
        assert_eq!(summary.duplicate_titles[0].count, 2);
    }

    #[test]
    fn missing_title_count_ignores_redirect_pages() {
        let crawl = crawl();
        let mut redirect = seo_analyzer_record_stub("https://e.x/old");
        redirect.status_code = 301;
        redirect.title = None;
        let records = vec![content_page("https://e.x/a", None), redirect];
        let summary = summarize(&crawl, &records);
        assert_eq!(summary.pages_missing_title, 1);
    }

    #[test]
    fn slow_pages_counted_across_every_status() {
        let crawl = crawl();
        let mut slow_redirect = seo_analyzer_record_stub("https://e.x/old");
        slow_redirect.status_code = 301;
        slow_redirect.response_time = Duration::from_secs(4);
        let mut slow_content = content_page("https://e.x/a", Some("A"));
        slow_content.response_time = Duration::from_secs(5);
        let records = vec![slow_content, slow_redirect];
        let summary = summarize(&crawl, &records);
        assert_eq!(summary.slow_pages, 2);
    }

    #[test]
    fn thin_and_low_ratio_counts_ignore_non_content_pages() {
        let crawl = crawl();
        let mut thin = content_page("https://e.x/a", Some("A"));
        thin.word_count = 10;
        thin.code_to_text_ratio = 5.0;
        let mut not_found = seo_analyzer_record_stub("https://e.x/missing");
        not_found.status_code = 404;
        not_found.word_count = 0;
        let records = vec![thin, not_found];
        let summary = summarize(&crawl, &records);
        assert_eq!(summary.thin_content_pages, 1);
        assert_eq!(summary.low_text_ratio_pages, 1);
    }
}
