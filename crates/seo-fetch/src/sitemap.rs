//! Sitemap Discoverer: probes well-known locations and robots.txt sitemaps,
//! expands `sitemapindex` one level deep, and returns discovered URLs (spec §4.4).

use crate::client::PROBE_TIMEOUT;
use seo_types::ports::http::{HttpClient, HttpRequest};
use seo_types::{SitemapDescriptor, SitemapStatus, SitemapType};
use std::collections::HashSet;
use tracing::{debug, warn};
use xml::reader::{EventReader, XmlEvent};

/// Fixed catalogue of well-known sitemap locations probed at crawl startup.
pub const SITEMAP_PATHS: &[&str] = &[
    "/sitemap.xml",
    "/sitemap_index.xml",
    "/sitemaps.xml",
    "/sitemap/sitemap.xml",
    "/wp-sitemap.xml",
    "/sitemap-index.xml",
    "/post-sitemap.xml",
    "/page-sitemap.xml",
    "/news-sitemap.xml",
    "/video-sitemap.xml",
    "/image-sitemap.xml",
];

/// Cap on how many `<loc>` children of a `sitemapindex` are expanded.
const MAX_INDEX_CHILDREN: usize = 20;

struct ParsedSitemap {
    root: Option<String>,
    locs: Vec<String>,
    has_video_ns: bool,
    has_image_ns: bool,
    has_news_ns: bool,
}

fn parse_document(xml_text: &str) -> ParsedSitemap {
    let mut root = None;
    let mut locs = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    let mut current_loc = String::new();
    let mut in_loc = false;

    let has_video_ns = xml_text.contains("video:");
    let has_image_ns = xml_text.contains("image:");
    let has_news_ns = xml_text.contains("news:");

    let parser = EventReader::from_str(xml_text);
    for event in parser {
        match event {
            Ok(XmlEvent::StartElement { name, .. }) => {
                if root.is_none() {
                    root = Some(name.local_name.clone());
                }
                if name.local_name == "loc" {
                    in_loc = true;
                    current_loc.clear();
                }
                stack.push(name.local_name);
            }
            Ok(XmlEvent::Characters(text)) if in_loc => {
                current_loc.push_str(&text);
            }
            Ok(XmlEvent::EndElement { name }) => {
                stack.pop();
                if name.local_name == "loc" {
                    in_loc = false;
                    let trimmed = current_loc.trim();
                    if !trimmed.is_empty() {
                        locs.push(trimmed.to_string());
                    }
                }
            }
            Err(e) => {
                debug!(error = %e, "sitemap XML parse error, accepting partial result");
                break;
            }
            _ => {}
        }
    }

    ParsedSitemap {
        root,
        locs,
        has_video_ns,
        has_image_ns,
        has_news_ns,
    }
}

fn detect_type(parsed: &ParsedSitemap) -> SitemapType {
    match parsed.root.as_deref() {
        Some("sitemapindex") => SitemapType::SitemapIndex,
        Some("urlset") => {
            if parsed.has_video_ns {
                SitemapType::VideoSitemap
            } else if parsed.has_image_ns {
                SitemapType::ImageSitemap
            } else if parsed.has_news_ns {
                SitemapType::NewsSitemap
            } else {
                SitemapType::UrlSet
            }
        }
        _ => SitemapType::Unknown,
    }
}

fn looks_like_xml(content_type: Option<&String>, body: &str) -> bool {
    if let Some(ct) = content_type {
        if ct.contains("xml") {
            return true;
        }
    }
    let trimmed = body.trim_start();
    trimmed.starts_with("<?xml") || trimmed.starts_with("<urlset") || trimmed.starts_with("<sitemapindex")
}

/// Fetches one sitemap URL and returns its descriptor plus any URLs it yields
/// directly (a `urlset`'s page URLs, or a `sitemapindex`'s child sitemap URLs).
async fn fetch_one(
    client: &dyn HttpClient,
    url: &str,
) -> (SitemapDescriptor, Vec<String>, SitemapType) {
    let req = HttpRequest::new("GET", url).with_timeout(PROBE_TIMEOUT);
    let response = match client.request(req).await {
        Ok(r) => r,
        Err(e) => {
            warn!(url, error = %e, "sitemap fetch failed");
            return (
                SitemapDescriptor {
                    url: url.to_string(),
                    sitemap_type: SitemapType::Unknown,
                    status: SitemapStatus::Error,
                    urls_count: 0,
                },
                Vec::new(),
                SitemapType::Unknown,
            );
        }
    };

    if !response.is_success() {
        return (
            SitemapDescriptor {
                url: url.to_string(),
                sitemap_type: SitemapType::Unknown,
                status: SitemapStatus::Error,
                urls_count: 0,
            },
            Vec::new(),
            SitemapType::Unknown,
        );
    }

    let body = match response.text() {
        Ok(b) => b,
        Err(_) => {
            return (
                SitemapDescriptor {
                    url: url.to_string(),
                    sitemap_type: SitemapType::Unknown,
                    status: SitemapStatus::Error,
                    urls_count: 0,
                },
                Vec::new(),
                SitemapType::Unknown,
            );
        }
    };

    if !looks_like_xml(response.header("content-type"), &body) {
        return (
            SitemapDescriptor {
                url: url.to_string(),
                sitemap_type: SitemapType::Unknown,
                status: SitemapStatus::Error,
                urls_count: 0,
            },
            Vec::new(),
            SitemapType::Unknown,
        );
    }

    let parsed = parse_document(&body);
    let sitemap_type = detect_type(&parsed);

    (
        SitemapDescriptor {
            url: url.to_string(),
            sitemap_type,
            status: SitemapStatus::Found,
            urls_count: parsed.locs.len(),
        },
        parsed.locs,
        sitemap_type,
    )
}

/// Probes every well-known path under `base_url` plus every `Sitemap:`
/// directive found in robots.txt, expanding one level of `sitemapindex`
/// nesting capped at 20 children. Returns every descriptor discovered and the
/// flattened, deduplicated list of page URLs they contributed.
pub async fn discover_sitemaps(
    client: &dyn HttpClient,
    base_url: &str,
    robots_sitemaps: &[String],
) -> (Vec<SitemapDescriptor>, Vec<String>) {
    let origin = match url::Url::parse(base_url) {
        Ok(u) => u.origin().ascii_serialization(),
        Err(_) => base_url.trim_end_matches('/').to_string(),
    };

    let mut candidates: Vec<String> = SITEMAP_PATHS
        .iter()
        .map(|path| format!("{origin}{path}"))
        .collect();
    for sitemap in robots_sitemaps {
        if !candidates.contains(sitemap) {
            candidates.push(sitemap.clone());
        }
    }

    let mut descriptors = Vec::new();
    let mut seen_urls = HashSet::new();
    let mut page_urls = Vec::new();

    for candidate in candidates {
        let (descriptor, locs, sitemap_type) = fetch_one(client, &candidate).await;
        let was_found = descriptor.status == SitemapStatus::Found;
        descriptors.push(descriptor);

        if !was_found {
            continue;
        }

        if sitemap_type == SitemapType::SitemapIndex {
            for child_url in locs.into_iter().take(MAX_INDEX_CHILDREN) {
                let (child_descriptor, child_locs, _) = fetch_one(client, &child_url).await;
                let child_found = child_descriptor.status == SitemapStatus::Found;
                descriptors.push(child_descriptor);
                if child_found {
                    for page_url in child_locs {
                        if seen_urls.insert(page_url.clone()) {
                            page_urls.push(page_url);
                        }
                    }
                }
            }
        } else {
            for page_url in locs {
                if seen_urls.insert(page_url.clone()) {
                    page_urls.push(page_url);
                }
            }
        }
    }

    (descriptors, page_urls)
}
