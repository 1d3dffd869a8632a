//! Bounded-parallelism batch orchestration.
//!
//! A [`BatchRunner`] processes a list of URLs with a fixed pool of worker
//! threads. Each worker repeatedly takes the next queued [`PageJob`], runs
//! it to completion, and appends its result to the shared summary. The
//! worker count bounds simultaneous in-flight fetches and translation calls;
//! this is deliberate backpressure against the target site and the
//! translation service.
//!
//! The single mutex guarding the shared summary is held only for the
//! append-and-count step, never across a fetch or translate call, so result
//! aggregation cannot serialize network I/O.
//!
//! A batch always completes and produces a summary: expected failures are
//! recorded by the job itself, and anything a job panics with is caught at
//! the dispatch boundary and recorded as a failed result. Partial success is
//! an expected outcome, not an error state.

use std::any::Any;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use serde::Serialize;
use time::OffsetDateTime;

use crate::chunk::ChunkConfig;
use crate::extract::ExtractConfig;
use crate::fetch::Fetcher;
use crate::job::{JobStatus, PageJob, PageResult};
use crate::translate::Translator;

/// Default worker count.
pub const DEFAULT_CONCURRENCY: usize = 3;

/// Configuration for a batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum number of jobs in flight at once (default: 3).
    pub concurrency: usize,
    /// Fragment extraction settings shared by all jobs.
    pub extract: ExtractConfig,
    /// Chunked translation settings shared by all jobs.
    pub chunk: ChunkConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            extract: ExtractConfig::default(),
            chunk: ChunkConfig::default(),
        }
    }
}

/// Cooperative stop flag for a running batch.
///
/// Requesting a stop halts submission of queued jobs; jobs already in
/// flight finish or fail naturally. URLs never dispatched are absent from
/// the summary.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    stopped: Arc<AtomicBool>,
}

impl StopSignal {
    /// Creates an un-triggered stop signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that the batch stop dispatching new jobs.
    pub fn request_stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    /// Whether a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

/// Aggregate outcome of a batch run.
///
/// `results` holds page results in arrival order (whichever job finished
/// first comes first); [`BatchSummary::by_submission_order`] exposes the
/// stable ordering via each result's retained `url_index`. The summary is
/// read-only once the run returns.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// Page results in completion order.
    pub results: Vec<PageResult>,
    /// Number of successful jobs.
    pub succeeded: usize,
    /// Number of failed jobs.
    pub failed: usize,
    /// Batch start time.
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    /// Batch completion time.
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
}

impl BatchSummary {
    /// Total number of recorded jobs.
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Results sorted by submission index.
    pub fn by_submission_order(&self) -> Vec<&PageResult> {
        let mut ordered: Vec<&PageResult> = self.results.iter().collect();
        ordered.sort_by_key(|result| result.url_index);
        ordered
    }
}

/// Shared mutable state of a run; mutated only under one lock.
#[derive(Default)]
struct Accumulator {
    results: Vec<PageResult>,
    succeeded: usize,
    failed: usize,
}

impl Accumulator {
    fn record(&mut self, result: PageResult) {
        match result.status {
            JobStatus::Success => self.succeeded += 1,
            JobStatus::Failed => self.failed += 1,
        }
        self.results.push(result);
    }
}

/// Runs page jobs over a URL list with bounded parallelism.
pub struct BatchRunner {
    fetcher: Arc<dyn Fetcher>,
    translator: Arc<dyn Translator>,
    config: BatchConfig,
    stop: StopSignal,
}

impl BatchRunner {
    /// Creates a runner over the given fetcher and translator.
    pub fn new(fetcher: Arc<dyn Fetcher>, translator: Arc<dyn Translator>, config: BatchConfig) -> Self {
        Self { fetcher, translator, config, stop: StopSignal::new() }
    }

    /// Handle for stopping this runner's batch from another thread.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Processes every URL and returns the aggregated summary.
    ///
    /// Jobs are dispatched in submission order to at most
    /// `config.concurrency` workers; results are recorded in arrival order.
    /// The call returns normally even if every job fails.
    pub fn run(&self, urls: &[String], languages: &[String]) -> BatchSummary {
        let started_at = OffsetDateTime::now_utc();
        let workers = self.config.concurrency.max(1).min(urls.len().max(1));

        tracing::info!(urls = urls.len(), workers, languages = languages.len(), "starting batch");

        let queue: Mutex<VecDeque<PageJob>> = Mutex::new(
            urls.iter()
                .enumerate()
                .map(|(index, url)| PageJob::new(url.clone(), index))
                .collect(),
        );
        let ledger = Mutex::new(Accumulator::default());

        thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| self.worker_loop(&queue, &ledger, languages));
            }
        });

        let accumulator = ledger.into_inner().unwrap_or_else(PoisonError::into_inner);

        tracing::info!(
            succeeded = accumulator.succeeded,
            failed = accumulator.failed,
            "batch finished"
        );

        BatchSummary {
            results: accumulator.results,
            succeeded: accumulator.succeeded,
            failed: accumulator.failed,
            started_at,
            finished_at: OffsetDateTime::now_utc(),
        }
    }

    fn worker_loop(
        &self,
        queue: &Mutex<VecDeque<PageJob>>,
        ledger: &Mutex<Accumulator>,
        languages: &[String],
    ) {
        loop {
            if self.stop.is_stopped() {
                tracing::debug!("stop requested, worker exiting");
                break;
            }

            let job = lock(queue).pop_front();
            let Some(job) = job else { break };

            let url = job.url.clone();
            let url_index = job.url_index;

            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                job.run(
                    self.fetcher.as_ref(),
                    self.translator.as_ref(),
                    languages,
                    &self.config.extract,
                    &self.config.chunk,
                )
            }));

            let result = match outcome {
                Ok(result) => result,
                Err(payload) => {
                    let reason = panic_message(payload);
                    tracing::error!(url = %url, reason = %reason, "job panicked");
                    PageResult::failed(url, url_index, reason)
                }
            };

            // The lock spans only the append and counter update.
            lock(ledger).record(result);
        }
    }
}

/// Locks a mutex, recovering the guard if a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "job panicked".to_string()
    }
}
