//! HTTP fetcher implementation
//!
//! This module handles all page requests for the crawler, including:
//! - Building HTTP clients with a browser-like user agent
//! - GET requests that ask for HTML
//! - One relaxed retry when the server refuses content negotiation (406)
//! - Decoding HTML entities in the response body
//! - Error classification

use crate::config::{CrawlerConfig, UserAgentConfig};
use reqwest::header::ACCEPT;
use reqwest::{redirect::Policy, Client, StatusCode};

/// Accept header sent on the first attempt
pub const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Accept header sent after a 406 response
pub const ANY_ACCEPT: &str = "*/*";

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body with HTML entities decoded
        body: String,
    },

    /// Server answered with a non-success status (after the 406 retry, if any)
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, unreadable body, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns true if the page was fetched
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Short description of a failed fetch, None on success
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Success { .. } => None,
            Self::HttpError { status_code } => Some(format!("HTTP {}", status_code)),
            Self::NetworkError { error } => Some(error.clone()),
        }
    }

    /// Consumes the result, yielding the page body or an empty string on failure
    pub fn into_body(self) -> String {
        match self {
            Self::Success { body, .. } => body,
            _ => String::new(),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use leadline::config::{CrawlerConfig, UserAgentConfig};
/// use leadline::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.user_agent.as_str())
        .timeout(crawler.timeout())
        .connect_timeout(crawler.timeout())
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page, reporting exactly what happened
///
/// # Request Flow
///
/// 1. GET with `Accept: text/html,...`
/// 2. HTTP 406 → retry once with `Accept: */*`
/// 3. Non-2xx → `HttpError`
/// 4. 2xx → read body, decode HTML entities → `Success`
///
/// Failures are logged at warn level; this function never panics or returns
/// an `Err`.
pub async fn fetch_page(client: &Client, url: &str) -> FetchResult {
    let mut result = send_get(client, url, HTML_ACCEPT).await;

    if matches!(result, FetchResult::HttpError { status_code } if status_code == StatusCode::NOT_ACCEPTABLE.as_u16())
    {
        tracing::debug!("{} rejected HTML Accept header, retrying with {}", url, ANY_ACCEPT);
        result = send_get(client, url, ANY_ACCEPT).await;
    }

    if let Some(reason) = result.failure_reason() {
        tracing::warn!("Failed to fetch {}: {}", url, reason);
    }

    result
}

/// Fetches a page and returns its decoded HTML, or an empty string on any failure
pub async fn fetch_html(client: &Client, url: &str) -> String {
    fetch_page(client, url).await.into_body()
}

/// Sends a single GET request with the given Accept header
async fn send_get(client: &Client, url: &str, accept: &str) -> FetchResult {
    match client.get(url).header(ACCEPT, accept).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().to_string();

            if !status.is_success() {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    body: decode_entities(&body),
                },
                Err(e) => FetchResult::NetworkError {
                    error: format!("Failed to read body: {}", e),
                },
            }
        }
        Err(e) => {
            // Classify error
            if e.is_timeout() {
                FetchResult::NetworkError {
                    error: "Request timeout".to_string(),
                }
            } else if e.is_connect() {
                FetchResult::NetworkError {
                    error: "Connection refused".to_string(),
                }
            } else {
                FetchResult::NetworkError {
                    error: e.to_string(),
                }
            }
        }
    }
}

/// Decodes named and numeric HTML entities, so `&#64;` becomes a literal `@`
pub fn decode_entities(body: &str) -> String {
    html_escape::decode_html_entities(body).into_owned()
}
