//! Crawl lifecycle types: status state machine, robots/sitemap bookkeeping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a long-lived [`Crawl`].
///
/// Transitions follow a fixed state machine; see
/// [`CrawlStatus::can_transition_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlStatus {
    /// Created but not yet started.
    Pending,
    /// Workers are active.
    Running,
    /// The pause gate is closed; workers are blocked before dequeuing.
    Paused,
    /// Terminal, user-initiated stop.
    Stopped,
    /// Terminal, the queue drained naturally.
    Completed,
    /// Terminal, an unrecovered exception occurred in the orchestrator body.
    Failed,
}

impl CrawlStatus {
    /// Whether moving from `self` to `next` is a legal state transition.
    pub fn can_transition_to(self, next: CrawlStatus) -> bool {
        use CrawlStatus::*;
        matches!(
            (self, next),
            (Pending, Running)
                | (Running, Paused)
                | (Running, Stopped)
                | (Running, Completed)
                | (Running, Failed)
                | (Paused, Running)
                | (Paused, Stopped)
                | (Paused, Failed)
                | (Stopped, Running) // resume from stopped
        )
    }

    /// Terminal statuses never transition again.
    pub fn is_terminal(self) -> bool {
        matches!(self, CrawlStatus::Completed | CrawlStatus::Failed)
    }
}

/// Whether robots.txt was found for a crawl's effective base domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotsTxtStatus {
    /// A 200 response was received and parsed (possibly with zero rules).
    Found,
    /// No 200 response was received within the fetch timeout.
    NotFound,
}

/// Root element detected while probing one sitemap URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SitemapType {
    /// `<sitemapindex>` root — expanded one level deep.
    SitemapIndex,
    /// Plain `<urlset>` root.
    UrlSet,
    /// `<urlset>` containing `<video:*>` extensions.
    VideoSitemap,
    /// `<urlset>` containing `<image:*>` extensions.
    ImageSitemap,
    /// `<urlset>` containing `<news:*>` extensions.
    NewsSitemap,
    /// Response was XML-like but neither `sitemapindex` nor `urlset`.
    Unknown,
}

/// Outcome of fetching and parsing one sitemap URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SitemapStatus {
    /// Fetched and parsed without error.
    Found,
    /// Fetch or parse failed; logged and skipped, never fatal.
    Error,
}

/// Structured descriptor for one discovered sitemap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitemapDescriptor {
    /// The sitemap's own URL.
    pub url: String,
    /// Root-element classification.
    pub sitemap_type: SitemapType,
    /// Whether it was successfully fetched and parsed.
    pub status: SitemapStatus,
    /// Number of page URLs contributed by this sitemap.
    pub urls_count: usize,
}

/// A long-lived crawl, keyed by integer id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crawl {
    /// Crawl id, unique within the store.
    pub id: u64,
    /// Owning project id.
    pub project_id: u64,
    /// Current lifecycle state.
    pub status: CrawlStatus,
    /// When the crawl row was created.
    pub created_at: DateTime<Utc>,
    /// When the orchestrator transitioned it to `running` for the first time.
    pub started_at: Option<DateTime<Utc>>,
    /// When the orchestrator reached a terminal status.
    pub completed_at: Option<DateTime<Utc>>,
    /// Monotonically non-decreasing count of Page Records written during a run.
    pub pages_crawled: u32,
    /// Snapshot of `pages_crawled` taken at termination; equal to it once done.
    pub pages_total: u32,
    /// Whether `/robots.txt` was found for the effective base domain.
    pub robots_txt_status: Option<RobotsTxtStatus>,
    /// Raw `/robots.txt` content, if found.
    pub robots_txt_content: Option<String>,
    /// Every sitemap discovered during startup.
    pub sitemaps_found: Vec<SitemapDescriptor>,
}

/// A project groups zero or more crawls under one starting URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project id, unique within the store.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// The starting URL audited by crawls under this project.
    pub url: String,
}

/// Partial update applied to a [`Crawl`] row; every field left `None` is untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlPatch {
    /// New lifecycle status, if changing.
    pub status: Option<CrawlStatus>,
    /// Sets `started_at`.
    pub started_at: Option<DateTime<Utc>>,
    /// Sets `completed_at`.
    pub completed_at: Option<DateTime<Utc>>,
    /// Sets `pages_crawled`.
    pub pages_crawled: Option<u32>,
    /// Sets `pages_total`.
    pub pages_total: Option<u32>,
    /// Sets `robots_txt_status`.
    pub robots_txt_status: Option<RobotsTxtStatus>,
    /// Sets `robots_txt_content`.
    pub robots_txt_content: Option<String>,
    /// Sets `sitemaps_found`.
    pub sitemaps_found: Option<Vec<SitemapDescriptor>>,
}

impl CrawlPatch {
    /// Builds an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status field.
    pub fn with_status(mut self, status: CrawlStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets `pages_crawled`.
    pub fn with_pages_crawled(mut self, count: u32) -> Self {
        self.pages_crawled = Some(count);
        self
    }
}
