//! HTTP fetch layer for the SEO auditor core.
//!
//! Provides the concrete [`ReqwestHttpClient`] adapter plus the two
//! well-known-location probes that feed a crawl's startup: robots.txt policy
//! parsing and sitemap discovery.

pub mod client;
pub mod robots;
pub mod sitemap;

pub use client::ReqwestHttpClient;
pub use robots::{BotAccessReport, BotAccessStatus, RobotsPolicy};
pub use sitemap::{discover_sitemaps, SITEMAP_PATHS};
