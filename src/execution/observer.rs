use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use crate::processing::ReducerId;
use crate::types::Value;

/// Events emitted by the [`super::ExecutionEngine`].
///
/// A chunk is a contiguous range of work items: rows of a column for
/// [`super::ExecutionEngine::display_values_parallel`], pipelines for
/// [`super::ExecutionEngine::transform_batch`].
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    RunStarted,
    ThrottleWaited { duration: Duration },
    ChunkStarted { start: usize, len: usize },
    ChunkFinished { output_rows: usize },
    ReduceStarted { column: String, op: ReducerId },
    ReduceFinished { result: Option<Value> },
    RunFinished {
        elapsed: Duration,
        metrics: ExecutionMetricsSnapshot,
    },
}

/// Observer hook for execution events.
pub trait ExecutionObserver: Send + Sync {
    fn on_event(&self, event: &ExecutionEvent);
}

/// Forwards execution events to `tracing`: run boundaries at debug, chunk activity at trace.
#[derive(Debug, Default)]
pub struct TracingExecutionObserver;

impl ExecutionObserver for TracingExecutionObserver {
    fn on_event(&self, event: &ExecutionEvent) {
        match event {
            ExecutionEvent::RunFinished { elapsed, metrics } => {
                tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, %metrics, "execution run finished");
            }
            ExecutionEvent::RunStarted | ExecutionEvent::ReduceStarted { .. } => {
                tracing::debug!(?event, "execution event");
            }
            _ => tracing::trace!(?event, "execution event"),
        }
    }
}

/// Live counters for the current run. Reset by every run; snapshot at any time.
#[derive(Debug, Default)]
pub struct ExecutionMetrics {
    run_id: AtomicU64,
    elapsed_ns: AtomicU64,
    rows_in: AtomicU64,
    rows_out: AtomicU64,
    chunks_started: AtomicU64,
    chunks_finished: AtomicU64,
    throttle_wait_ns: AtomicU64,
    active_chunks: AtomicUsize,
    max_active_chunks: AtomicUsize,
}

impl ExecutionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new run: bumps `run_id` and zeroes everything else.
    pub fn begin_run(&self) {
        self.run_id.fetch_add(1, Ordering::SeqCst);
        for counter in [
            &self.elapsed_ns,
            &self.rows_in,
            &self.rows_out,
            &self.chunks_started,
            &self.chunks_finished,
            &self.throttle_wait_ns,
        ] {
            counter.store(0, Ordering::SeqCst);
        }
        self.active_chunks.store(0, Ordering::SeqCst);
        self.max_active_chunks.store(0, Ordering::SeqCst);
    }

    pub fn end_run(&self, elapsed: Duration) {
        self.elapsed_ns.store(saturating_nanos(elapsed), Ordering::SeqCst);
    }

    /// Input rows (or values) consumed.
    pub fn on_rows_in(&self, rows: usize) {
        self.rows_in.fetch_add(rows as u64, Ordering::SeqCst);
    }

    pub fn on_chunk_start(&self) {
        self.chunks_started.fetch_add(1, Ordering::SeqCst);
        let active = self.active_chunks.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active_chunks.fetch_max(active, Ordering::SeqCst);
    }

    /// A chunk finished having produced `output_rows` rows (or display values).
    pub fn on_chunk_end(&self, output_rows: usize) {
        self.rows_out.fetch_add(output_rows as u64, Ordering::SeqCst);
        self.chunks_finished.fetch_add(1, Ordering::SeqCst);
        self.active_chunks.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn on_throttle_wait(&self, waited: Duration) {
        self.throttle_wait_ns.fetch_add(saturating_nanos(waited), Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> ExecutionMetricsSnapshot {
        let load = |c: &AtomicU64| c.load(Ordering::SeqCst);
        let elapsed_ns = load(&self.elapsed_ns);
        ExecutionMetricsSnapshot {
            run_id: load(&self.run_id),
            elapsed: (elapsed_ns > 0).then(|| Duration::from_nanos(elapsed_ns)),
            rows_in: load(&self.rows_in),
            rows_out: load(&self.rows_out),
            chunks_started: load(&self.chunks_started),
            chunks_finished: load(&self.chunks_finished),
            throttle_wait: Duration::from_nanos(load(&self.throttle_wait_ns)),
            max_active_chunks: self.max_active_chunks.load(Ordering::SeqCst),
        }
    }
}

fn saturating_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

/// Point-in-time copy of [`ExecutionMetrics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionMetricsSnapshot {
    pub run_id: u64,
    /// `None` while a run is in progress.
    pub elapsed: Option<Duration>,
    pub rows_in: u64,
    /// Rows left after the pipelines ran, or display values produced.
    pub rows_out: u64,
    pub chunks_started: u64,
    pub chunks_finished: u64,
    pub throttle_wait: Duration,
    pub max_active_chunks: usize,
}

impl fmt::Display for ExecutionMetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run {}: rows {} -> {}, chunks {}/{} (peak {}), throttled {:?}",
            self.run_id,
            self.rows_in,
            self.rows_out,
            self.chunks_finished,
            self.chunks_started,
            self.max_active_chunks,
            self.throttle_wait,
        )?;
        if let Some(elapsed) = self.elapsed {
            write!(f, ", took {elapsed:?}")?;
        }
        Ok(())
    }
}
