//! Parallel execution of pipelines and display formatting.
//!
//! The transforms themselves are single-threaded pure functions. This module runs many of
//! them at once on a `rayon` pool:
//!
//! - [`ExecutionEngine::transform_batch`]: independent pipelines (one per panel) in parallel
//! - [`ExecutionEngine::display_values_parallel`]: a large column formatted in chunks
//! - throttling of chunks in flight, live [`ExecutionMetrics`] and [`ExecutionObserver`] hooks

mod observer;
mod semaphore;

use std::ops::Range;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::display::{DisplayProcessor, DisplayValue};
use crate::error::{FrameError, FrameResult};
use crate::processing::{ReducerId, reduce};
use crate::transformers::{DataTransformerConfig, TransformContext, TransformerRegistry};
use crate::types::{DataFrame, Field, Value};

pub use observer::{
    ExecutionEvent, ExecutionMetrics, ExecutionMetricsSnapshot, ExecutionObserver, TracingExecutionObserver,
};

use semaphore::Semaphore;

/// One unit of [`ExecutionEngine::transform_batch`]: a pipeline and the frames it runs on.
#[derive(Debug, Clone)]
pub struct PipelineJob {
    pub configs: Vec<DataTransformerConfig>,
    pub frames: Vec<DataFrame>,
}

impl PipelineJob {
    pub fn new(configs: Vec<DataTransformerConfig>, frames: Vec<DataFrame>) -> Self {
        Self { configs, frames }
    }
}

/// Configuration for the [`ExecutionEngine`].
#[derive(Debug, Clone)]
pub struct ExecutionOptions {
    /// Worker threads. `None` uses the available parallelism.
    pub num_threads: Option<usize>,
    /// Values per chunk for [`ExecutionEngine::display_values_parallel`].
    pub chunk_size: usize,
    /// Upper bound on concurrently executing chunks, on top of `num_threads`.
    pub max_in_flight_chunks: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        let n = available_threads();
        Self {
            num_threads: Some(n),
            chunk_size: 4_096,
            max_in_flight_chunks: n,
        }
    }
}

fn available_threads() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}

fn invalid(message: &str) -> FrameError {
    FrameError::InvalidOptions {
        id: "execution".to_string(),
        message: message.to_string(),
    }
}

pub struct ExecutionEngine {
    pool: ThreadPool,
    opts: ExecutionOptions,
    registry: TransformerRegistry,
    observer: Option<Arc<dyn ExecutionObserver>>,
    metrics: Arc<ExecutionMetrics>,
}

impl ExecutionEngine {
    /// Build an engine running the built-in transformers.
    ///
    /// Fails with [`FrameError::InvalidOptions`] when `chunk_size`, `max_in_flight_chunks` or
    /// `num_threads` is zero, and with [`FrameError::ThreadPool`] if the pool cannot start.
    pub fn new(opts: ExecutionOptions) -> FrameResult<Self> {
        if opts.chunk_size == 0 {
            return Err(invalid("chunk_size must be > 0"));
        }
        if opts.max_in_flight_chunks == 0 {
            return Err(invalid("max_in_flight_chunks must be > 0"));
        }
        if opts.num_threads == Some(0) {
            return Err(invalid("num_threads must be > 0 when set"));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(opts.num_threads.unwrap_or_else(available_threads))
            .build()?;

        Ok(Self {
            pool,
            opts,
            registry: TransformerRegistry::standard().clone(),
            observer: None,
            metrics: Arc::new(ExecutionMetrics::new()),
        })
    }

    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Use `registry` instead of the built-in transformers.
    pub fn with_registry(mut self, registry: TransformerRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Handle to live metrics.
    pub fn metrics(&self) -> Arc<ExecutionMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Run independent pipelines in parallel. Results keep the order of `jobs`.
    ///
    /// Each job is one chunk; `rows_in` and `rows_out` count rows over all frames.
    pub fn transform_batch(&self, ctx: &TransformContext, jobs: Vec<PipelineJob>) -> Vec<Vec<DataFrame>> {
        self.pool.install(|| {
            self.run(|sem| {
                jobs.into_par_iter()
                    .enumerate()
                    .map(|(i, job)| {
                        let rows: usize = job.frames.iter().map(|f| f.length).sum();
                        self.chunk(sem, i..i + 1, rows, || {
                            let out = self.registry.apply(ctx, &job.configs, job.frames);
                            let output_rows: usize = out.iter().map(|f| f.length).sum();
                            (out, output_rows)
                        })
                    })
                    .collect()
            })
        })
    }

    /// Display every value of `field` with `processor`, `chunk_size` values at a time.
    pub fn display_values_parallel(&self, field: &Field, processor: &DisplayProcessor) -> Vec<DisplayValue> {
        self.pool.install(|| {
            self.run(|sem| {
                let per_chunk: Vec<Vec<DisplayValue>> = chunk_ranges(field.len(), self.opts.chunk_size)
                    .into_par_iter()
                    .map(|range| {
                        let rows = range.len();
                        self.chunk(sem, range.clone(), rows, || {
                            let out: Vec<DisplayValue> =
                                field.values[range].iter().map(|v| processor.display(v)).collect();
                            let n = out.len();
                            (out, n)
                        })
                    })
                    .collect();
                per_chunk.into_iter().flatten().collect()
            })
        })
    }

    /// Reduce one column. Sequential, but reported through metrics and the observer.
    pub fn reduce(&self, frame: &DataFrame, column: &str, op: ReducerId) -> Option<Value> {
        self.run(|_| {
            self.emit(ExecutionEvent::ReduceStarted {
                column: column.to_string(),
                op,
            });
            let out = reduce(frame, column, op);
            self.metrics.on_rows_in(frame.length);
            self.emit(ExecutionEvent::ReduceFinished { result: out.clone() });
            out
        })
    }

    fn run<R>(&self, body: impl FnOnce(&Semaphore) -> R) -> R {
        let start = Instant::now();
        self.metrics.begin_run();
        self.emit(ExecutionEvent::RunStarted);

        let sem = Semaphore::new(self.opts.max_in_flight_chunks);
        let out = body(&sem);

        let elapsed = start.elapsed();
        self.metrics.end_run(elapsed);
        self.emit(ExecutionEvent::RunFinished {
            elapsed,
            metrics: self.metrics.snapshot(),
        });
        out
    }

    fn chunk<R>(&self, sem: &Semaphore, range: Range<usize>, rows: usize, work: impl FnOnce() -> (R, usize)) -> R {
        let waited = sem.acquire();
        if waited > Duration::ZERO {
            self.metrics.on_throttle_wait(waited);
            self.emit(ExecutionEvent::ThrottleWaited { duration: waited });
        }

        self.metrics.on_chunk_start();
        self.emit(ExecutionEvent::ChunkStarted {
            start: range.start,
            len: range.len(),
        });

        let (out, output_rows) = work();
        self.metrics.on_rows_in(rows);

        self.emit(ExecutionEvent::ChunkFinished { output_rows });
        self.metrics.on_chunk_end(output_rows);
        sem.release();
        out
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}

fn chunk_ranges(len: usize, chunk_size: usize) -> Vec<Range<usize>> {
    (0..len)
        .step_by(chunk_size)
        .map(|start| start..(start + chunk_size).min(len))
        .collect()
}
