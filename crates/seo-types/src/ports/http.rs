//! HTTP client port definition
//!
//! This module defines the abstract HTTP client interface that adapters must implement.
//! It provides a technology-agnostic way to perform HTTP operations.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::Result;

/// HTTP request structure
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method (GET, POST, PUT, DELETE, etc.)
    pub method: String,
    /// Target URL
    pub url: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Optional request body
    pub body: Option<Vec<u8>>,
    /// Optional timeout duration
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Creates a new HTTP request
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            timeout: None,
        }
    }

    /// Adds a header to the request
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the request body
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// One hop recorded in a followed-redirect chain.
#[derive(Debug, Clone)]
pub struct RedirectHop {
    /// Status code of this hop (e.g. 301, 302).
    pub status: u16,
    /// The `Location` this hop pointed to.
    pub url: String,
}

/// HTTP response structure.
///
/// Carries enough of the redirect chain for the orchestrator to tell whether
/// a fetch was redirected at all, and if so what the very first hop's status
/// and the final landing URL were — the fetch itself always follows redirects
/// transparently, this is bookkeeping only.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code of the final response in the chain.
    pub status: u16,
    /// Response headers of the final response.
    pub headers: HashMap<String, String>,
    /// Response body of the final response.
    pub body: Vec<u8>,
    /// The URL the client actually landed on after following redirects.
    pub final_url: String,
    /// Every redirect hop that was followed, in order; empty if none.
    pub history: Vec<RedirectHop>,
    /// Wall-clock time spent on the request, measured with a monotonic clock.
    pub elapsed: Duration,
}

impl HttpResponse {
    /// Checks if the response was successful (2xx status code).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// True when the client followed at least one redirect to get here.
    pub fn was_redirected(&self) -> bool {
        !self.history.is_empty()
    }

    /// Status code of the very first hop, or the final status if there was
    /// no redirect at all.
    pub fn original_status(&self) -> u16 {
        self.history.first().map(|h| h.status).unwrap_or(self.status)
    }

    /// Gets the response body as a UTF-8 string.
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.clone())
            .map_err(|e| crate::error::SeoError::Parse(format!("invalid UTF-8: {e}")))
    }

    /// Gets a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&String> {
        let name_lower = name.to_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| k.to_lowercase() == name_lower)
            .map(|(_, v)| v)
    }
}

/// HTTP client port interface.
///
/// Implementations follow redirects transparently and report the chain via
/// [`HttpResponse::history`]; TLS verification is expected to be disabled so
/// that misconfigured audit targets are still reachable.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Performs a GET request.
    async fn get(&self, url: &str) -> Result<HttpResponse>;

    /// Performs a HEAD request (used to probe for sitemap existence).
    async fn head(&self, url: &str) -> Result<HttpResponse>;

    /// Performs a custom HTTP request.
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> HttpResponse {
        HttpResponse {
            status,
            headers,
            body,
            final_url: "https://example.com".to_string(),
            history: Vec::new(),
            elapsed: Duration::from_millis(1),
        }
    }

    #[test]
    fn test_http_request_builder() {
        let req = HttpRequest::new("GET", "https://example.com")
            .with_header("User-Agent", "SEOCrawlerBot/1.0")
            .with_timeout(Duration::from_secs(30));

        assert_eq!(req.method, "GET");
        assert_eq!(req.url, "https://example.com");
        assert_eq!(req.headers.get("User-Agent").unwrap(), "SEOCrawlerBot/1.0");
        assert_eq!(req.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_http_response_success() {
        let resp = response(200, HashMap::new(), vec![]);
        assert!(resp.is_success());

        let resp = response(404, HashMap::new(), vec![]);
        assert!(!resp.is_success());
    }

    #[test]
    fn test_http_response_text() {
        let body = b"Hello, World!".to_vec();
        let resp = response(200, HashMap::new(), body);
        assert_eq!(resp.text().unwrap(), "Hello, World!");
    }

    #[test]
    fn test_http_response_header() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        let resp = response(200, headers, vec![]);

        assert_eq!(resp.header("content-type").unwrap(), "application/json");
        assert_eq!(resp.header("Content-Type").unwrap(), "application/json");
        assert!(resp.header("Authorization").is_none());
    }

    #[test]
    fn redirect_history_reports_original_status() {
        let mut resp = response(200, HashMap::new(), vec![]);
        resp.history.push(RedirectHop {
            status: 301,
            url: "https://example.com/a/".to_string(),
        });
        assert!(resp.was_redirected());
        assert_eq!(resp.original_status(), 301);
    }

    #[test]
    fn no_redirect_original_status_is_final_status() {
        let resp = response(200, HashMap::new(), vec![]);
        assert!(!resp.was_redirected());
        assert_eq!(resp.original_status(), 200);
    }
}
