//! Store port: the persistence contract the orchestrator and aggregator depend on.

use crate::crawl::{Crawl, CrawlPatch, Project};
use crate::error::Result;
use crate::model::PageRecord;
use async_trait::async_trait;

/// Persists projects, crawls, and page records; read back for resume and
/// aggregation. Out of scope for this core — only the interface is specified
/// here, a concrete adapter lives alongside whatever database the surrounding
/// application picks.
#[async_trait]
pub trait Store: Send + Sync {
    /// Inserts one Page Record under `crawl_id`. Called at most once per
    /// deduplication key per crawl.
    async fn create_page_record(&self, crawl_id: u64, record: PageRecord) -> Result<()>;

    /// Applies a partial update to a crawl row.
    async fn update_crawl(&self, crawl_id: u64, patch: CrawlPatch) -> Result<()>;

    /// Lists every Page Record's URL for a crawl; used to preload the visited
    /// set when resuming a stopped crawl.
    async fn list_page_urls(&self, crawl_id: u64) -> Result<Vec<String>>;

    /// Lists every Page Record for a crawl; used by the aggregation engine.
    async fn list_page_records(&self, crawl_id: u64) -> Result<Vec<PageRecord>>;

    /// Fetches one crawl row.
    async fn get_crawl(&self, crawl_id: u64) -> Result<Crawl>;

    /// Fetches one project row.
    async fn get_project(&self, project_id: u64) -> Result<Project>;
}
