//! Crawl Orchestrator configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default user agent sent on every outbound request (spec §6).
pub const DEFAULT_USER_AGENT: &str = "SEOCrawlerBot/1.0";

/// Settings for one orchestrator run. Every value has a spec-mandated default;
/// callers override only what an operator actually configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// User agent carried on every outbound request.
    pub user_agent: String,
    /// Fixed worker pool size.
    pub concurrency: usize,
    /// Hard ceiling on Page Records created in one run.
    pub max_pages: u32,
    /// Per-HTTP-request timeout.
    pub fetch_timeout: Duration,
    /// Overall wall-clock budget before outstanding workers are cancelled.
    pub wall_clock_budget: Duration,
    /// Whether to consult the Robots Policy before fetching (`ignore_robots` inverse).
    pub respect_robots: bool,
    /// Bounded capacity of the URL frontier queue.
    pub queue_capacity: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            concurrency: 10,
            max_pages: 10_000,
            fetch_timeout: Duration::from_secs(15),
            wall_clock_budget: Duration::from_secs(7200),
            respect_robots: true,
            queue_capacity: 10_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let config = CrawlConfig::default();
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.max_pages, 10_000);
        assert_eq!(config.fetch_timeout, Duration::from_secs(15));
        assert_eq!(config.wall_clock_budget, Duration::from_secs(7200));
        assert!(config.respect_robots);
    }
}
