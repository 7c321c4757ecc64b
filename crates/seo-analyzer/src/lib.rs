//! Page Analyzer: parses one fetched HTML document into a scored
//! [`PageRecord`](seo_types::PageRecord).
//!
//! [`analyze`] is a pure function — no I/O, no shared state — and tolerates
//! malformed HTML: every extractor below returns a neutral default on
//! absent or invalid structure rather than failing the whole page.
//!
//! Extractors run in a fixed order (the same order `PageRecord::issues`
//! ends up in): title, meta description, canonical, robots meta, headings,
//! images, links, schema, viewport, content, Open Graph, performance hints,
//! hreflang, nofollow, code/text ratio, placeholders.

mod canonical;
mod content;
mod headings;
mod hreflang;
mod images;
mod links;
mod meta;
mod performance;
mod placeholders;
mod ratio;
mod schema;
mod text;
mod title;

use scraper::Html;
use seo_types::{Issue, PageRecord, Severity};
use std::time::Duration;

/// Parses `html_bytes` (served at `url` with `status_code`/`content_type`, in
/// `elapsed` wall-clock time) and produces one scored [`PageRecord`].
pub fn analyze(
    url: &str,
    html_bytes: &[u8],
    status_code: u16,
    content_type: &str,
    elapsed: Duration,
) -> PageRecord {
    let html = String::from_utf8_lossy(html_bytes);
    let document = Html::parse_document(&html);
    let mut issues: Vec<Issue> = Vec::new();

    let title = title::extract(&document, &mut issues);
    let meta_description = meta::extract_description(&document, &mut issues);
    let canonical = canonical::extract(&document, url, &mut issues);
    let robots_meta = meta::extract_robots_meta(&document, &mut issues);
    let headings = headings::extract(&document, &mut issues);
    let images = images::extract(&document, &mut issues);
    let link_signals = links::extract(&document, url);
    let schema = schema::extract(&document, &mut issues);
    let has_viewport_meta = meta::extract_viewport(&document, &mut issues);
    let visible_text = text::visible_text(&document);
    let word_count = content::extract(&visible_text, &mut issues);
    let open_graph = meta::extract_open_graph(&document, &mut issues);
    let has_lazy_loading = performance::extract(&document, images.total_images, &mut issues);
    let hreflang = hreflang::extract(
        &document,
        url,
        canonical.canonical_url.as_deref(),
        robots_meta.is_noindex,
        &mut issues,
    );
    links::emit_nofollow_issue(&link_signals, &mut issues);
    let ratio = ratio::extract(&visible_text, html_bytes.len(), &mut issues);
    let (has_placeholders, placeholder_content) = placeholders::extract(&visible_text, &mut issues);

    let score = score_from_issues(&issues);

    PageRecord {
        url: url.to_string(),
        status_code,
        response_time: elapsed,
        content_type: content_type.to_string(),
        content_length: html_bytes.len(),

        title: title.title,
        title_length: title.title_length,
        meta_description: meta_description.meta_description,
        meta_description_length: meta_description.meta_description_length,

        canonical_url: canonical.canonical_url,
        canonical_issues: canonical.canonical_issues,

        robots_meta: robots_meta.robots_meta,
        is_noindex: robots_meta.is_noindex,
        is_nofollow_meta: robots_meta.is_nofollow_meta,

        h1_count: headings.h1_count,
        h1_texts: headings.h1_texts,
        h2_count: headings.h2_count,
        h3_count: headings.h3_count,
        h4_count: headings.h4_count,
        h5_count: headings.h5_count,
        h6_count: headings.h6_count,

        total_images: images.total_images,
        images_without_alt: images.images_without_alt,
        images_without_alt_urls: images.images_without_alt_urls,
        images_with_empty_alt: images.images_with_empty_alt,
        images_with_empty_alt_urls: images.images_with_empty_alt_urls,

        internal_links: link_signals.internal_links,
        external_links: link_signals.external_links,
        nofollow_links: link_signals.nofollow_links,
        nofollow_internal_links: link_signals.nofollow_internal_links,

        has_schema_markup: schema.has_schema_markup,
        schema_types: schema.schema_types,

        has_viewport_meta,

        word_count,
        has_lazy_loading,

        code_to_text_ratio: ratio.code_to_text_ratio,
        html_size: ratio.html_size,
        text_size: ratio.text_size,

        og_title: open_graph.og_title,
        og_description: open_graph.og_description,
        og_image: open_graph.og_image,

        has_hreflang: hreflang.has_hreflang,
        hreflang_entries: hreflang.hreflang_entries,
        hreflang_issues: hreflang.hreflang_issues,

        has_placeholders,
        placeholder_content,

        redirect_target: None,

        issues,
        score,
    }
}

/// Builds the lightweight record saved for a non-HTML or non-2xx response:
/// status and timing only, no signals, no issues (the status code itself is
/// the diagnostic).
pub fn analyze_non_content(
    url: &str,
    status_code: u16,
    content_type: &str,
    content_length: usize,
    elapsed: Duration,
) -> PageRecord {
    PageRecord {
        url: url.to_string(),
        status_code,
        response_time: elapsed,
        content_type: content_type.to_string(),
        content_length,
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
        html_size: content_length,
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
        issues: Vec::new(),
        score: 100,
    }
}

fn score_from_issues(issues: &[Issue]) -> u8 {
    let penalty: i32 = issues.iter().map(|i| i.severity.score_penalty()).sum();
    (100 - penalty).clamp(0, 100) as u8
}
