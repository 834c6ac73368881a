#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Step synchronizer that fans one row task per grid row out to a fixed
//! worker pool and joins them before the day's mark grid is released.
//!
//! The mark grid is split into one mutable slice per row before dispatch, so
//! each task owns the only reference to the memory it writes. No locks are
//! involved and completion order cannot misplace a row.

use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
};

use outbreak_core::{Grid, MarkGrid};
use outbreak_system_infection::mark_row;
use rayon::{prelude::*, ThreadPool, ThreadPoolBuilder};
use thiserror::Error;
use tracing::debug;

/// Failures that abort a simulation day.
#[derive(Debug, Error)]
pub enum StepError {
    /// A worker pool needs at least one thread.
    #[error("worker count must be at least 1")]
    ZeroWorkers,
    /// The worker pool could not be started.
    #[error("failed to start worker pool")]
    PoolBuild(#[from] rayon::ThreadPoolBuildError),
    /// A row task panicked, so the day's marks are incomplete.
    #[error("row task failed: {message}")]
    RowTaskFailed {
        /// Panic payload rendered as text.
        message: String,
    },
}

/// Dispatches row tasks to a fixed-size pool and assembles the mark grid.
#[derive(Debug)]
pub struct StepSynchronizer {
    pool: ThreadPool,
    workers: usize,
}

impl StepSynchronizer {
    /// Starts a pool with exactly `workers` threads.
    pub fn new(workers: usize) -> Result<Self, StepError> {
        if workers == 0 {
            return Err(StepError::ZeroWorkers);
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("outbreak-row-{index}"))
            .build()?;
        debug!(workers, "worker pool started");
        Ok(Self { pool, workers })
    }

    /// Number of threads in the pool.
    #[must_use]
    pub const fn workers(&self) -> usize {
        self.workers
    }

    /// Computes the infection marks for every row of `grid`.
    pub fn compute_marks(&self, grid: &Grid) -> Result<MarkGrid, StepError> {
        self.compute_marks_with(grid, mark_row)
    }

    /// Runs `kernel` once per row of `grid` on the pool and waits for all rows.
    ///
    /// Each invocation receives the row index and that row's slice of the mark
    /// grid. If any invocation panics the whole day fails and no partially
    /// filled mark grid is returned.
    pub fn compute_marks_with<K>(&self, grid: &Grid, kernel: K) -> Result<MarkGrid, StepError>
    where
        K: Fn(&Grid, usize, &mut [bool]) + Sync,
    {
        let side = grid.side();
        let mut marks = MarkGrid::new(side);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.pool.install(|| {
                marks
                    .cells_mut()
                    .par_chunks_mut(side)
                    .enumerate()
                    .for_each(|(row, out)| kernel(grid, row, out));
            });
        }));

        match outcome {
            Ok(()) => Ok(marks),
            Err(payload) => Err(StepError::RowTaskFailed {
                message: panic_message(payload.as_ref()),
            }),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "row task panicked".to_owned()
    }
}
