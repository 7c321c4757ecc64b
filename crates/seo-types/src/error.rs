//! Error types shared by every crate in the auditor core.

use thiserror::Error;

/// Result type alias using [`SeoError`].
pub type Result<T> = std::result::Result<T, SeoError>;

/// Error type for the crawl/analyze/aggregate pipeline.
#[derive(Error, Debug)]
pub enum SeoError {
    /// DNS, TCP, TLS, or read-timeout failure while fetching a URL.
    #[error("network error: {0}")]
    Network(String),

    /// A fetch exceeded its configured timeout.
    #[error("operation timed out after {0}ms")]
    Timeout(u64),

    /// A URL string could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// robots.txt or sitemap XML could not be parsed at all.
    #[error("parse error: {0}")]
    Parse(String),

    /// JSON-LD or API payload failed to (de)serialize.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error surfaced from the store or filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A crawl, project, or page id does not exist in the store.
    #[error("not found: {0}")]
    NotFound(String),

    /// A caller passed a configuration value outside its valid range.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The store failed to persist a write.
    #[error("store operation failed: {0}")]
    Store(String),

    /// Generic error with a custom message.
    #[error("{0}")]
    Custom(String),

    /// Catch-all for interoperability with `anyhow`-based callers.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SeoError {
    /// Creates a custom error with a message.
    pub fn custom<S: Into<String>>(msg: S) -> Self {
        SeoError::Custom(msg.into())
    }

    /// Transport-layer failures are the only ones a worker retries within a
    /// crawl; 4xx/5xx HTTP responses are not represented as errors at all.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SeoError::Network(_) | SeoError::Timeout(_))
    }
}
