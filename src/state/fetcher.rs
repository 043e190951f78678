//! Pagination fetcher state machine (pure).
//!
//! Owns the fetch state for the current query and decides which page to request
//! next. It never performs I/O: every operation that needs the network returns a
//! [`FetchRequest`] for the caller to execute, and the outcome comes back through
//! [`PaginationFetcher::apply`].
//!
//! # Ordering
//!
//! At most one request is in flight. `fetch_next_page` is a no-op while anything
//! is in flight, so page N+1 is never requested before page N resolves.
//!
//! # Stale responses
//!
//! Each query reset bumps a generation counter. Responses carry the generation
//! of the request that produced them and are discarded unless they match the
//! request currently in flight.

use super::cache::{CacheKey, PageCache};
use crate::model::{FetchError, Page, PageNumber, PagedResultSet, Query};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// A page request for the transport to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Query generation this request belongs to.
    pub generation: u64,
    /// Trimmed, non-blank query.
    pub query: Query,
    /// 1-based page to fetch.
    pub page: PageNumber,
    /// Results per page.
    pub per_page: u32,
}

/// Outcome of executing a [`FetchRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// The request that was executed.
    pub request: FetchRequest,
    /// Page on success.
    pub result: Result<Page, FetchError>,
}

/// Fetch state for the current query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    /// Blank query: nothing fetched, nothing requested.
    Idle,
    /// First page in flight, no data yet.
    Loading,
    /// Latest fetch succeeded.
    Success(Arc<PagedResultSet>),
    /// Next page in flight; previously fetched pages stay visible.
    FetchingNextPage(Arc<PagedResultSet>),
    /// Latest fetch failed.
    Error {
        /// Why the attempt failed.
        error: FetchError,
        /// Pages fetched before the failure (a failed next page keeps them).
        retained: Option<Arc<PagedResultSet>>,
    },
}

/// What [`PaginationFetcher::apply`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Page appended; state is now `Success`.
    Applied,
    /// Failure recorded; state is now `Error`.
    Failed,
    /// Response belonged to an older query or request and was discarded.
    Stale,
}

/// Cursor-paged fetcher for one query at a time.
#[derive(Debug, Clone)]
pub struct PaginationFetcher {
    per_page: u32,
    query: Query,
    generation: u64,
    state: FetchState,
    in_flight: Option<FetchRequest>,
    last_failed: Option<FetchRequest>,
}

impl PaginationFetcher {
    /// Idle fetcher with the given page size.
    pub fn new(per_page: u32) -> Self {
        Self {
            per_page,
            query: Query::empty(),
            generation: 0,
            state: FetchState::Idle,
            in_flight: None,
            last_failed: None,
        }
    }

    /// Current query.
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Results per page.
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Current generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current fetch state.
    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Cache key for the current query.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::new(self.query.clone(), self.per_page)
    }

    /// Pages fetched so far, including pages retained across a failure.
    pub fn result_set(&self) -> Option<&Arc<PagedResultSet>> {
        match &self.state {
            FetchState::Success(set) | FetchState::FetchingNextPage(set) => Some(set),
            FetchState::Error { retained, .. } => retained.as_ref(),
            FetchState::Idle | FetchState::Loading => None,
        }
    }

    /// More hits exist than have been fetched, per the latest page.
    ///
    /// Also false once a page comes back empty, whatever `total_count` says:
    /// the search API serves no items past its result cap.
    pub fn has_next_page(&self) -> bool {
        self.result_set().is_some_and(|set| set.has_next_page())
    }

    /// A request is in flight.
    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The in-flight request is for a page after the first.
    pub fn is_fetching_next_page(&self) -> bool {
        matches!(self.state, FetchState::FetchingNextPage(_))
    }

    /// Switch to `query`, discarding all state for the previous one.
    ///
    /// Blank queries go idle without a request. A fresh cache entry is restored
    /// without a request. Otherwise page 1 is requested. Re-setting the current
    /// query does nothing.
    pub fn set_query(
        &mut self,
        query: Query,
        cache: &mut PageCache,
        now: Instant,
    ) -> Option<FetchRequest> {
        if query == self.query {
            return None;
        }
        self.reset(query);

        if self.query.is_blank() {
            return None;
        }

        if let Some(cached) = cache.get(&self.cache_key(), now) {
            debug!(query = %self.query, pages = cached.page_count(), "Restored cached results");
            self.state = FetchState::Success(cached);
            return None;
        }

        Some(self.request_first_page())
    }

    /// Request the next sequential page.
    ///
    /// No-op while a fetch is in flight, when there is no next page, or while
    /// the state is not `Success`.
    pub fn fetch_next_page(&mut self) -> Option<FetchRequest> {
        if self.in_flight.is_some() {
            return None;
        }
        let FetchState::Success(set) = &self.state else {
            return None;
        };
        if !set.has_next_page() {
            return None;
        }

        let set = Arc::clone(set);
        let request = self.make_request(set.next_page_number());
        self.state = FetchState::FetchingNextPage(set);
        self.in_flight = Some(request.clone());
        Some(request)
    }

    /// Re-issue the request that failed. No-op outside the `Error` state.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        let FetchState::Error { retained, .. } = &self.state else {
            return None;
        };
        let failed = self.last_failed.take()?;

        self.state = match retained {
            Some(set) => FetchState::FetchingNextPage(Arc::clone(set)),
            None => FetchState::Loading,
        };
        let request = FetchRequest {
            generation: self.generation,
            ..failed
        };
        self.in_flight = Some(request.clone());
        Some(request)
    }

    /// Drop the cached result set for the current query and refetch page 1.
    pub fn refresh(&mut self, cache: &mut PageCache) -> Option<FetchRequest> {
        if self.query.is_blank() {
            return None;
        }
        cache.invalidate(&self.cache_key());
        let query = self.query.clone();
        self.reset(query);
        Some(self.request_first_page())
    }

    /// Fold a transport outcome into the state.
    pub fn apply(
        &mut self,
        response: FetchResponse,
        cache: &mut PageCache,
        now: Instant,
    ) -> ApplyOutcome {
        if self.in_flight.as_ref() != Some(&response.request) {
            debug!(
                query = %response.request.query,
                page = response.request.page.get(),
                generation = response.request.generation,
                current_generation = self.generation,
                "Discarding stale response"
            );
            return ApplyOutcome::Stale;
        }
        self.in_flight = None;

        let previous = match &self.state {
            FetchState::FetchingNextPage(set) => Some(Arc::clone(set)),
            _ => None,
        };

        match response.result {
            Ok(page) => {
                let base = previous.as_deref().cloned().unwrap_or_default();
                let set = Arc::new(base.with_page(response.request.page, page));
                cache.set(self.cache_key(), Arc::clone(&set), now);
                self.state = FetchState::Success(set);
                ApplyOutcome::Applied
            }
            Err(error) => {
                self.state = FetchState::Error {
                    error,
                    retained: previous,
                };
                self.last_failed = Some(response.request);
                ApplyOutcome::Failed
            }
        }
    }

    fn reset(&mut self, query: Query) {
        self.query = query;
        self.generation += 1;
        self.state = FetchState::Idle;
        self.in_flight = None;
        self.last_failed = None;
    }

    fn request_first_page(&mut self) -> FetchRequest {
        let request = self.make_request(PageNumber::FIRST);
        self.state = FetchState::Loading;
        self.in_flight = Some(request.clone());
        request
    }

    fn make_request(&self, page: PageNumber) -> FetchRequest {
        FetchRequest {
            generation: self.generation,
            query: self.query.clone(),
            page,
            per_page: self.per_page,
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "fetcher_tests.rs"]
mod tests;
