//! Reqwest-based [`HttpClient`] adapter.
//!
//! Redirects are followed manually rather than through reqwest's built-in
//! policy so that every hop's status and URL can be reported back as
//! [`RedirectHop`] history. TLS verification is disabled: audit targets are
//! frequently misconfigured and the crawler still needs to reach them.

use async_trait::async_trait;
use seo_types::error::{Result, SeoError};
use seo_types::ports::http::{HttpClient, HttpRequest, HttpResponse, RedirectHop};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default user-agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "SEOCrawlerBot/1.0";

/// Per-request fetch timeout (§5: 15 s).
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Well-known-location fetch timeout, used for robots.txt and sitemaps (§5: 10 s).
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Hard cap on redirect hops followed for a single request.
const MAX_REDIRECTS: u32 = 10;

/// Reqwest-based HTTP client adapter.
///
/// Built with `redirect::Policy::none()` so every hop can be inspected and
/// recorded; [`HttpClient::get`]/[`HttpClient::request`] still follow
/// redirects transparently from the caller's point of view.
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    user_agent: String,
}

impl ReqwestHttpClient {
    /// Builds a client with the crawler's default user-agent and a 15 s timeout.
    pub fn new() -> Result<Self> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    /// Builds a client with a custom user-agent.
    pub fn with_user_agent(user_agent: impl Into<String>) -> Result<Self> {
        let user_agent = user_agent.into();
        let client = reqwest::Client::builder()
            .user_agent(&user_agent)
            .danger_accept_invalid_certs(true)
            .redirect(reqwest::redirect::Policy::none())
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| SeoError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, user_agent })
    }

    async fn convert_response(
        resp: reqwest::Response,
        final_url: String,
        history: Vec<RedirectHop>,
        elapsed: Duration,
    ) -> Result<HttpResponse> {
        let status = resp.status().as_u16();

        let mut headers = HashMap::new();
        for (key, value) in resp.headers() {
            if let Ok(value_str) = value.to_str() {
                headers.insert(key.to_string(), value_str.to_string());
            }
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| SeoError::Network(format!("failed to read response body: {e}")))?
            .to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
            final_url,
            history,
            elapsed,
        })
    }

    /// Performs one method/url request, following redirects by hand up to
    /// [`MAX_REDIRECTS`] and recording every hop.
    async fn execute(
        &self,
        method: reqwest::Method,
        url: &str,
        timeout: Option<Duration>,
        headers: &HashMap<String, String>,
        body: Option<Vec<u8>>,
    ) -> Result<HttpResponse> {
        let start = Instant::now();
        let mut current_url = url.to_string();
        let mut history = Vec::new();

        for _ in 0..=MAX_REDIRECTS {
            let mut builder = self.client.request(method.clone(), &current_url);
            if let Some(t) = timeout {
                builder = builder.timeout(t);
            }
            for (k, v) in headers {
                builder = builder.header(k, v);
            }
            if let Some(b) = &body {
                builder = builder.body(b.clone());
            }

            let resp = builder
                .send()
                .await
                .map_err(|e| SeoError::Network(format!("request to {current_url} failed: {e}")))?;

            let status = resp.status().as_u16();
            if (300..400).contains(&status) {
                let location = resp
                    .headers()
                    .get(reqwest::header::LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .map(|s| s.to_string());

                let Some(location) = location else {
                    return Self::convert_response(resp, current_url, history, start.elapsed())
                        .await;
                };

                let next_url = match url::Url::parse(&current_url)
                    .and_then(|base| base.join(&location))
                {
                    Ok(u) => u.to_string(),
                    Err(e) => {
                        warn!(url = %current_url, error = %e, "unresolvable redirect target");
                        return Self::convert_response(resp, current_url, history, start.elapsed())
                            .await;
                    }
                };

                debug!(from = %current_url, to = %next_url, status, "following redirect");
                history.push(RedirectHop {
                    status,
                    url: next_url.clone(),
                });
                current_url = next_url;
                continue;
            }

            return Self::convert_response(resp, current_url, history, start.elapsed()).await;
        }

        Err(SeoError::Network(format!(
            "exceeded {MAX_REDIRECTS} redirects starting from {url}"
        )))
    }

    /// The user-agent this client sends on every request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new().expect("failed to build default HTTP client")
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        self.execute(reqwest::Method::GET, url, None, &HashMap::new(), None)
            .await
    }

    async fn head(&self, url: &str) -> Result<HttpResponse> {
        self.execute(reqwest::Method::HEAD, url, None, &HashMap::new(), None)
            .await
    }

    async fn request(&self, req: HttpRequest) -> Result<HttpResponse> {
        let method = reqwest::Method::from_bytes(req.method.as_bytes())
            .map_err(|e| SeoError::Configuration(format!("invalid HTTP method: {e}")))?;
        self.execute(method, &req.url, req.timeout, &req.headers, req.body)
            .await
    }
}
