//! GitHub search API access.
//!
//! - [`SearchApi`] is the seam the rest of the crate talks to
//! - [`GithubClient`] implements it over HTTP
//! - [`FetchWorker`] runs requests on a background thread so the UI never blocks

use crate::model::{FetchError, Page, PageNumber, Query};

pub mod client;
pub mod worker;

pub use client::{ClientConfig, GithubClient, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use worker::{FetchWorker, Job, WorkerEvent};

/// Path of the repository search endpoint.
pub const SEARCH_REPOSITORIES_ENDPOINT: &str = "/search/repositories";

/// Path of the health-check endpoint.
pub const HEALTH_CHECK_ENDPOINT: &str = "/zen";

/// Repository search backend.
///
/// Implementations block; callers run them off the UI thread.
pub trait SearchApi: Send + Sync {
    /// Fetch one page of repositories matching `query`.
    fn search_repositories(
        &self,
        query: &Query,
        page: PageNumber,
        per_page: u32,
    ) -> Result<Page, FetchError>;

    /// Fetch the zen message used as a connectivity probe.
    fn zen(&self) -> Result<String, FetchError>;
}
