//! HTTP client for the GitHub REST API.

use super::{SearchApi, HEALTH_CHECK_ENDPOINT, SEARCH_REPOSITORIES_ENDPOINT};
use crate::model::{FetchError, Page, PageNumber, Query, RATE_LIMIT_STATUS};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use std::time::Duration;
use tracing::{debug, warn};

/// Public GitHub API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const GITHUB_V3_JSON: &str = "application/vnd.github.v3+json";

/// Connection settings for [`GithubClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL, without trailing slash.
    pub base_url: String,
    /// Personal access token sent as a bearer token; raises the rate limit.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Blocking GitHub API client.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    base_url: String,
}

impl GithubClient {
    /// Build a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Unknown` if the token is not a valid header value or
    /// the TLS backend cannot be initialised.
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_V3_JSON));
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                FetchError::Unknown {
                    message: format!("Invalid API token: {e}"),
                }
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .user_agent(concat!("ghsearch/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Unknown {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl SearchApi for GithubClient {
    fn search_repositories(
        &self,
        query: &Query,
        page: PageNumber,
        per_page: u32,
    ) -> Result<Page, FetchError> {
        let page_param = page.get().to_string();
        let per_page_param = per_page.to_string();
        debug!(query = %query, page = page.get(), per_page, "Searching repositories");

        let response = self
            .http
            .get(self.url(SEARCH_REPOSITORIES_ENDPOINT))
            .query(&[
                ("q", query.as_str()),
                ("page", page_param.as_str()),
                ("per_page", per_page_param.as_str()),
            ])
            .send()
            .map_err(transport_error)?;
        let body = check_status(response)?.text().map_err(transport_error)?;

        let page: Page = serde_json::from_str(&body).map_err(|e| FetchError::Malformed {
            message: e.to_string(),
        })?;
        debug!(
            total_count = page.total_count,
            items = page.items.len(),
            incomplete = page.incomplete,
            "Search page received"
        );
        Ok(page)
    }

    fn zen(&self) -> Result<String, FetchError> {
        let response = self
            .http
            .get(self.url(HEALTH_CHECK_ENDPOINT))
            .send()
            .map_err(transport_error)?;
        check_status(response)?.text().map_err(transport_error)
    }
}

/// Turn non-2xx responses into errors, keeping the API's message when present.
fn check_status(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let reason = status.canonical_reason().unwrap_or("request failed").to_string();
    let message = response
        .text()
        .ok()
        .and_then(|body| api_message(&body))
        .unwrap_or(reason);

    if status.as_u16() == RATE_LIMIT_STATUS {
        warn!(%message, "GitHub API rate limit exceeded");
    }
    Err(FetchError::from_status(status.as_u16(), message))
}

/// Extract `message` from a GitHub error body.
fn api_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

fn transport_error(error: reqwest::Error) -> FetchError {
    if error.is_decode() {
        FetchError::Malformed {
            message: error.to_string(),
        }
    } else if error.is_timeout() || error.is_connect() || error.is_request() || error.is_body() {
        FetchError::Network {
            message: error.to_string(),
        }
    } else {
        FetchError::Unknown {
            message: error.to_string(),
        }
    }
}
