//! Background fetch worker.
//!
//! API calls block, so they run on a dedicated thread. The UI thread submits
//! [`Job`]s and drains [`WorkerEvent`]s on each tick, the same way it polls any
//! other input source. Jobs execute strictly in submission order.

use super::SearchApi;
use crate::model::FetchError;
use crate::state::{FetchRequest, FetchResponse};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// Work for the fetch thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    /// Fetch one search page.
    Search(FetchRequest),
    /// Probe API connectivity.
    HealthCheck,
}

/// Result reported back to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerEvent {
    /// Search page outcome, tagged with its request.
    Search(FetchResponse),
    /// Health probe outcome.
    Health(Result<String, FetchError>),
}

/// Execute a single job against `api`.
pub fn execute(api: &dyn SearchApi, job: Job) -> WorkerEvent {
    match job {
        Job::Search(request) => {
            let result = api.search_repositories(&request.query, request.page, request.per_page);
            if let Err(error) = &result {
                warn!(
                    query = %request.query,
                    page = request.page.get(),
                    %error,
                    "Search request failed"
                );
            }
            WorkerEvent::Search(FetchResponse { request, result })
        }
        Job::HealthCheck => WorkerEvent::Health(api.zen()),
    }
}

/// Handle to the fetch thread.
///
/// Dropping the handle discards queued jobs and joins the thread. At most the
/// request already in flight finishes first.
pub struct FetchWorker {
    jobs: Option<Sender<Job>>,
    stop: Arc<AtomicBool>,
    events: Receiver<WorkerEvent>,
    handle: Option<JoinHandle<()>>,
}

impl FetchWorker {
    /// Spawn the fetch thread.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the OS refuses to create the thread.
    pub fn spawn(api: Arc<dyn SearchApi>) -> io::Result<Self> {
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (event_tx, event_rx) = mpsc::channel::<WorkerEvent>();
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("ghsearch-fetch".to_string())
            .spawn(move || {
                for job in job_rx {
                    if thread_stop.load(Ordering::Acquire) {
                        debug!("Fetch worker stopping with jobs still queued");
                        break;
                    }
                    let event = execute(api.as_ref(), job);
                    if event_tx.send(event).is_err() {
                        // UI side is gone
                        break;
                    }
                }
                debug!("Fetch worker exiting");
            })?;

        Ok(Self {
            jobs: Some(job_tx),
            stop,
            events: event_rx,
            handle: Some(handle),
        })
    }

    /// Queue a job. Returns `false` if the worker has stopped.
    pub fn submit(&self, job: Job) -> bool {
        match &self.jobs {
            Some(jobs) => jobs.send(job).is_ok(),
            None => false,
        }
    }

    /// Next finished event, without blocking.
    pub fn try_recv(&self) -> Option<WorkerEvent> {
        self.events.try_recv().ok()
    }

    /// Next finished event, waiting up to `timeout`.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<WorkerEvent> {
        match self.events.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl Drop for FetchWorker {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
        // Closing the sender wakes a worker idle on an empty queue.
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Fetch worker panicked");
            }
        }
    }
}
