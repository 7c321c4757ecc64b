//! Status-code and issue-type bucketing across a crawl's Page Records.

use seo_types::{IssueBucket, PageRecord, PageRef, Severity, StatusCodeGroup};
use std::collections::HashMap;

const MAX_BUCKET_PAGES: usize = 50;

/// Groups every page (content and redirect alike) by its HTTP status code.
pub fn status_code_breakdown(records: &[PageRecord]) -> Vec<StatusCodeGroup> {
    let mut groups: HashMap<u16, Vec<PageRef>> = HashMap::new();
    for record in records {
        groups.entry(record.status_code).or_default().push(PageRef {
            url: record.url.clone(),
        });
    }

    let mut result: Vec<StatusCodeGroup> = groups
        .into_iter()
        .map(|(status_code, pages)| StatusCodeGroup {
            status_code,
            count: pages.len(),
            pages,
        })
        .collect();
    result.sort_by_key(|g| g.status_code);
    result
}

/// Buckets every issue occurrence across `pages` by its type identifier,
/// sorted by severity rank (critical first) then by descending occurrence
/// count. Each bucket's sample page list is capped at 50, but `count` always
/// reflects the true total.
pub fn issue_buckets(pages: &[&PageRecord]) -> Vec<IssueBucket> {
    struct Accumulator {
        severity: Severity,
        count: usize,
        pages: Vec<PageRef>,
    }

    let mut buckets: HashMap<String, Accumulator> = HashMap::new();
    for page in pages {
        for issue in &page.issues {
            let entry = buckets.entry(issue.issue_type.clone()).or_insert_with(|| Accumulator {
                severity: issue.severity,
                count: 0,
                pages: Vec::new(),
            });
            entry.count += 1;
            if entry.pages.len() < MAX_BUCKET_PAGES {
                entry.pages.push(PageRef { url: page.url.clone() });
            }
        }
    }

    let mut result: Vec<IssueBucket> = buckets
        .into_iter()
        .map(|(category, acc)| IssueBucket {
            category,
            severity: acc.severity,
            count: acc.count,
            pages: acc.pages,
        })
        .collect();
    result.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then_with(|| b.count.cmp(&a.count))
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use seo_types::Issue;
    use std::time::Duration;

    fn page(url: &str, issues: Vec<Issue>) -> PageRecord {
        PageRecord {
            url: url.to_string(),
            status_code: 200,
            response_time: Duration::from_millis(1),
            content_type: "text/html".to_string(),
            content_length: 0,
            title: None,
            title_length: 0,
            meta_description: None,
            meta_description_length: 0,
            canonical_url: None,
            canonical_issues: Vec::new(),
            robots_meta: None,
            is_noindex: false,
            is_nofollow_meta: false,
            h1_count: 0,
            h1_texts: Vec::new(),
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
            has_schema_markup: false,
            schema_types: Vec::new(),
            has_viewport_meta: false,
            word_count: 0,
            has_lazy_loading: false,
            code_to_text_ratio: 0.0,
            html_size: 0,
            text_size: 0,
            og_title: None,
            og_description: None,
            og_image: None,
            has_hreflang: false,
            hreflang_entries: Vec::new(),
            hreflang_issues: Vec::new(),
            has_placeholders: false,
            placeholder_content: Vec::new(),
            redirect_target: None,
            issues,
            score: 100,
        }
    }

    #[test]
    fn status_code_breakdown_groups_every_page() {
        let records = vec![
            page("https://e.x/a", Vec::new()),
            page("https://e.x/b", Vec::new()),
        ];
        let groups = status_code_breakdown(&records);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].status_code, 200);
        assert_eq!(groups[0].count, 2);
    }

    #[test]
    fn issue_buckets_sort_critical_first_then_by_count() {
        let a = page(
            "https://e.x/a",
            vec![Issue::new(Severity::Warning, "short_title", "m")],
        );
        let b = page(
            "https://e.x/b",
            vec![Issue::new(Severity::Warning, "short_title", "m")],
        );
        let c = page(
            "https://e.x/c",
            vec![Issue::new(Severity::Critical, "missing_title", "m")],
        );
        let pages = vec![&a, &b, &c];
        let buckets = issue_buckets(&pages);
        assert_eq!(buckets[0].category, "missing_title");
        assert_eq!(buckets[0].severity, Severity::Critical);
        assert_eq!(buckets[1].category, "short_title");
        assert_eq!(buckets[1].count, 2);
    }

    #[test]
    fn bucket_sample_pages_capped_but_count_is_true_total() {
        let pages_owned: Vec<PageRecord> = (0..60)
            .map(|i| {
                page(
                    &format!("https://e.x/{i}"),
                    vec![Issue::new(Severity::Info, "no_schema_markup", "m")],
                )
            })
            .collect();
        let pages: Vec<&PageRecord> = pages_owned.iter().collect();
        let buckets = issue_buckets(&pages);
        assert_eq!(buckets[0].count, 60);
        assert_eq!(buckets[0].pages.len(), 50);
    }
}
