//! Shared types for the SEO auditor core.
//!
//! This crate breaks circular dependencies between `seo-fetch`, `seo-analyzer`,
//! `seo-spider`, and `seo-aggregate` by holding every type that crosses those
//! boundaries: the page/crawl data model, the Store and HTTP client ports, and
//! the shared error type.
//!
//! ## Organization
//!
//! - `error`: the crate-wide error type and result alias
//! - `model`: per-page signals, issues, and the Page Record they compose into
//! - `crawl`: crawl lifecycle, robots/sitemap bookkeeping
//! - `summary`: the Aggregation Engine's Crawl Summary output
//! - `store`: the Store port
//! - `ports`: the HTTP client port
//! - `urlnorm`: URL canonical-form resolution and deduplication keys

pub mod crawl;
pub mod error;
pub mod model;
pub mod ports;
pub mod store;
pub mod summary;
pub mod urlnorm;

pub use crawl::{
    Crawl, CrawlPatch, CrawlStatus, Project, RobotsTxtStatus, SitemapDescriptor, SitemapStatus,
    SitemapType,
};
pub use error::{Result, SeoError};
pub use model::{CanonicalIssueTag, HreflangEntry, Issue, PageRecord, PlaceholderHit, Severity};
pub use ports::{HttpClient, HttpRequest, HttpResponse};
pub use store::Store;
pub use summary::{CrawlSummary, DuplicateGroup, IssueBucket, PageRef, StatusCodeGroup};
