//! Bounded-concurrency fan-out runner with streaming progress updates.
//!
//! [`FanoutRunner`] executes an ordered list of independent asynchronous
//! jobs with at most `limit` in flight at any instant. Jobs are handed to
//! the runtime in strictly increasing index order, a new job starts as soon
//! as any slot frees up, and each result lands at the job's original index
//! regardless of completion order.
//!
//! Failure policy is fail-slow: a failed job is reported immediately on the
//! update channel, but in-flight jobs drain and the remaining jobs still
//! start. Only cancellation stops new jobs from starting, and even then the
//! already-started jobs are awaited rather than aborted.
//!
//! The result buffer and completion accounting are owned by the single
//! `run` loop; spawned jobs only ever return values, so no locking is
//! involved.

use std::collections::HashMap;
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// A unit of work: a boxed future producing a result or a job-level error.
pub type Job<R, E> = BoxFuture<'static, Result<R, E>>;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Terminal failure of a single job.
#[derive(Debug, thiserror::Error)]
pub enum JobError<E> {
    /// The job itself returned an error.
    #[error("{0}")]
    Job(E),

    /// The job did not finish within the configured per-job timeout.
    #[error("job timed out after {0:?}")]
    Timeout(Duration),

    /// The job panicked. The panic is contained; other jobs are unaffected.
    #[error("job panicked: {0}")]
    Panicked(String),

    /// The run was cancelled before this job was started.
    #[error("run cancelled before the job started")]
    Cancelled,
}

/// Aggregate failure of a run: the first observed failure plus the indices
/// of every job that did not complete successfully (failed or unstarted).
#[derive(Debug, thiserror::Error)]
#[error("{} of {total} jobs failed; first failure at index {first_index}: {first_error}", .failed_indices.len())]
pub struct RunError<E> {
    /// Index of the first failure observed (completion order).
    pub first_index: usize,
    /// The first failure observed.
    pub first_error: JobError<E>,
    /// Every index without a successful result, ascending.
    pub failed_indices: Vec<usize>,
    /// Total number of jobs submitted.
    pub total: usize,
}

// ---------------------------------------------------------------------------
// Outcome and updates
// ---------------------------------------------------------------------------

/// Final outcome of a fan-out run.
#[derive(Debug)]
pub enum RunOutcome<R, E> {
    /// Every job succeeded; `results[i]` is the value produced by job `i`.
    Succeeded(Vec<R>),

    /// At least one job failed. `partial[i]` holds the result of job `i`
    /// if it completed successfully before the run finished draining.
    Failed {
        error: RunError<E>,
        partial: Vec<Option<R>>,
    },
}

/// Terminal update for a single job, emitted exactly once per started job.
#[derive(Debug, Clone)]
pub enum JobUpdate<R> {
    /// The job at `index` completed successfully.
    Completed {
        index: usize,
        total: usize,
        result: R,
    },
    /// The job at `index` reached a terminal failure.
    Failed {
        index: usize,
        total: usize,
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Bounded-concurrency runner for independent asynchronous jobs.
pub struct FanoutRunner {
    limit: usize,
    job_timeout: Option<Duration>,
    cancel: CancellationToken,
}

impl FanoutRunner {
    /// Create a runner that keeps at most `limit` jobs in flight.
    ///
    /// Values below 1 are clamped to 1.
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            job_timeout: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Fail any job that runs longer than `timeout` with [`JobError::Timeout`].
    pub fn with_job_timeout(mut self, timeout: Duration) -> Self {
        self.job_timeout = Some(timeout);
        self
    }

    /// Stop starting new jobs once `token` is triggered. In-flight jobs are
    /// still awaited.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Execute `jobs`, reporting each terminal outcome on `updates`.
    ///
    /// Jobs are started in index order and at most `limit` run at once. An
    /// empty job list returns `Succeeded(vec![])` without spawning anything.
    /// Sending on `updates` never blocks; a dropped receiver is ignored.
    pub async fn run<R, E>(
        &self,
        jobs: Vec<Job<R, E>>,
        updates: Option<UnboundedSender<JobUpdate<R>>>,
    ) -> RunOutcome<R, E>
    where
        R: Clone + Send + 'static,
        E: std::fmt::Display + Send + 'static,
    {
        let total = jobs.len();
        if total == 0 {
            return RunOutcome::Succeeded(Vec::new());
        }

        let mut results: Vec<Option<R>> = Vec::with_capacity(total);
        results.resize_with(total, || None);

        let mut in_flight: JoinSet<(usize, Result<R, JobError<E>>)> = JoinSet::new();
        let mut task_indices: HashMap<tokio::task::Id, usize> = HashMap::new();
        let mut pending = jobs.into_iter().enumerate();
        let mut first_failure: Option<(usize, JobError<E>)> = None;
        let mut started = 0usize;

        loop {
            // Top up the in-flight window, in index order, unless cancelled.
            while in_flight.len() < self.limit && !self.cancel.is_cancelled() {
                let Some((index, job)) = pending.next() else {
                    break;
                };
                let job_timeout = self.job_timeout;
                let handle = in_flight.spawn(async move {
                    let result = match job_timeout {
                        Some(limit) => match tokio::time::timeout(limit, job).await {
                            Ok(done) => done.map_err(JobError::Job),
                            Err(_) => Err(JobError::Timeout(limit)),
                        },
                        None => job.await.map_err(JobError::Job),
                    };
                    (index, result)
                });
                task_indices.insert(handle.id(), index);
                started += 1;
            }

            let Some(joined) = in_flight.join_next_with_id().await else {
                // Nothing in flight: all jobs finished, or cancellation
                // stopped the rest from starting.
                break;
            };

            let (index, result) = match joined {
                Ok((id, (index, result))) => {
                    task_indices.remove(&id);
                    (index, result)
                }
                Err(join_err) => {
                    // The job panicked; attribute it via the task-id map.
                    let index = task_indices.remove(&join_err.id()).unwrap_or(0);
                    (index, Err(JobError::Panicked(join_err.to_string())))
                }
            };

            match result {
                Ok(value) => {
                    if let Some(tx) = &updates {
                        let _ = tx.send(JobUpdate::Completed {
                            index,
                            total,
                            result: value.clone(),
                        });
                    }
                    results[index] = Some(value);
                }
                Err(error) => {
                    tracing::warn!(index, error = %error, "Fan-out job failed");
                    if let Some(tx) = &updates {
                        let _ = tx.send(JobUpdate::Failed {
                            index,
                            total,
                            message: error.to_string(),
                        });
                    }
                    if first_failure.is_none() {
                        first_failure = Some((index, error));
                    }
                }
            }
        }

        // Jobs that never started because of cancellation count as failed,
        // but emit no update: only started jobs produce events.
        if started < total && first_failure.is_none() {
            first_failure = Some((started, JobError::Cancelled));
        }

        match first_failure {
            None => {
                let ordered: Vec<R> = results.into_iter().flatten().collect();
                debug_assert_eq!(ordered.len(), total);
                RunOutcome::Succeeded(ordered)
            }
            Some((first_index, first_error)) => {
                let failed_indices: Vec<usize> = results
                    .iter()
                    .enumerate()
                    .filter_map(|(i, slot)| slot.is_none().then_some(i))
                    .collect();
                RunOutcome::Failed {
                    error: RunError {
                        first_index,
                        first_error,
                        failed_indices,
                        total,
                    },
                    partial: results,
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
