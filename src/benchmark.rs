//! Microbenchmark runner with warmup, comparison, and cancellation.
//!
//! A [`Benchmark`] is an immutable configuration: name, iteration count, and
//! warmup iteration count. Running one executes the unit of work for the
//! warmup phase (timing discarded) and then for the measured phase, capturing
//! one duration per iteration in strict execution order. Results never flow
//! into a [`MeasurementStore`](crate::store::MeasurementStore); the caller
//! consumes them directly.
//!
//! # Example
//!
//! ```
//! use chronograph::Benchmark;
//!
//! let result = Benchmark::new("sum")
//!     .iterations(50)
//!     .warmup_iterations(5)
//!     .run(|| (1..=1000).sum::<u64>());
//! assert_eq!(result.durations.len(), 50);
//! ```

use std::future::Future;
use std::hint::black_box;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::statistics::SampleStatistics;

/// Default measured iterations per run.
pub const DEFAULT_ITERATIONS: usize = 100;

/// Default warmup iterations per run.
pub const DEFAULT_WARMUP_ITERATIONS: usize = 10;

/// Immutable benchmark configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Benchmark {
    /// Name carried into the result.
    pub name: String,
    /// Measured iterations (positive).
    pub iterations: usize,
    /// Warmup iterations whose timing is discarded.
    pub warmup_iterations: usize,
}

impl Benchmark {
    /// Create a benchmark with default iteration counts.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            iterations: DEFAULT_ITERATIONS,
            warmup_iterations: DEFAULT_WARMUP_ITERATIONS,
        }
    }

    /// Set the measured iteration count.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the warmup iteration count.
    pub fn warmup_iterations(mut self, warmup_iterations: usize) -> Self {
        self.warmup_iterations = warmup_iterations;
        self
    }

    /// Run the unit of work: warmup first (discarded), then exactly
    /// `iterations` measured executions.
    ///
    /// The work is wrapped in `black_box` so the compiler cannot elide it.
    pub fn run<F, T>(&self, mut work: F) -> BenchmarkResult
    where
        F: FnMut() -> T,
    {
        for _ in 0..self.warmup_iterations {
            black_box(work());
        }

        let mut durations = Vec::with_capacity(self.iterations);
        for _ in 0..self.iterations {
            let start = Instant::now();
            black_box(work());
            durations.push(start.elapsed().as_secs_f64());
        }

        BenchmarkResult {
            name: self.name.clone(),
            durations,
        }
    }

    /// Async variant of [`run`](Self::run) with identical semantics.
    ///
    /// Iterations are strictly sequential: iteration N+1 does not begin until
    /// iteration N's future has fully completed, including any suspension.
    /// Elapsed time per iteration includes suspended time.
    pub async fn run_async<F, Fut, T>(&self, mut work: F) -> BenchmarkResult
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = T>,
    {
        for _ in 0..self.warmup_iterations {
            black_box(work().await);
        }

        let mut durations = Vec::with_capacity(self.iterations);
        for _ in 0..self.iterations {
            let start = Instant::now();
            black_box(work().await);
            durations.push(start.elapsed().as_secs_f64());
        }

        BenchmarkResult {
            name: self.name.clone(),
            durations,
        }
    }

    /// Like [`run`](Self::run), but checks `token` before starting each
    /// iteration (warmup included) and aborts the loop once cancelled.
    ///
    /// Cancellation never interrupts an in-flight iteration. A cancelled run
    /// returns the partial result collected so far; callers can distinguish
    /// it by `result.durations.len() < iterations`.
    pub fn run_cancellable<F, T>(&self, token: &CancelToken, mut work: F) -> BenchmarkResult
    where
        F: FnMut() -> T,
    {
        for _ in 0..self.warmup_iterations {
            if token.is_cancelled() {
                break;
            }
            black_box(work());
        }

        let mut durations = Vec::with_capacity(self.iterations);
        for _ in 0..self.iterations {
            if token.is_cancelled() {
                break;
            }
            let start = Instant::now();
            black_box(work());
            durations.push(start.elapsed().as_secs_f64());
        }

        BenchmarkResult {
            name: self.name.clone(),
            durations,
        }
    }

    /// Async variant of [`run_cancellable`](Self::run_cancellable).
    pub async fn run_cancellable_async<F, Fut, T>(
        &self,
        token: &CancelToken,
        mut work: F,
    ) -> BenchmarkResult
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = T>,
    {
        for _ in 0..self.warmup_iterations {
            if token.is_cancelled() {
                break;
            }
            black_box(work().await);
        }

        let mut durations = Vec::with_capacity(self.iterations);
        for _ in 0..self.iterations {
            if token.is_cancelled() {
                break;
            }
            let start = Instant::now();
            black_box(work().await);
            durations.push(start.elapsed().as_secs_f64());
        }

        BenchmarkResult {
            name: self.name.clone(),
            durations,
        }
    }

    /// Run `baseline` under this configuration, then `candidate` under an
    /// equivalent configuration named `"<name> (candidate)"`.
    ///
    /// The runs are fully independent: no shared warmup, no interleaving.
    pub fn compare<A, B, T, U>(&self, baseline: A, candidate: B) -> BenchmarkComparison
    where
        A: FnMut() -> T,
        B: FnMut() -> U,
    {
        let baseline_result = self.run(baseline);
        let candidate_config = Benchmark {
            name: format!("{} (candidate)", self.name),
            ..self.clone()
        };
        let candidate_result = candidate_config.run(candidate);
        BenchmarkComparison {
            baseline: baseline_result,
            candidate: candidate_result,
        }
    }
}

/// Per-iteration durations from one measured phase, in execution order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Name inherited from the benchmark configuration.
    pub name: String,
    /// One duration (seconds) per measured iteration; excludes warmup.
    pub durations: Vec<f64>,
}

impl BenchmarkResult {
    /// Statistics view over the per-iteration durations.
    pub fn statistics(&self) -> SampleStatistics {
        SampleStatistics::from_samples(&self.durations)
    }
}

/// Paired baseline/candidate results with derived speedup metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    /// Result of the baseline run.
    pub baseline: BenchmarkResult,
    /// Result of the candidate run.
    pub candidate: BenchmarkResult,
}

impl BenchmarkComparison {
    /// `baseline.mean / candidate.mean`. Greater than 1 means the candidate
    /// is faster. An unmeasurably fast candidate yields infinity.
    pub fn speedup(&self) -> f64 {
        let baseline_mean = self.baseline.statistics().mean();
        let candidate_mean = self.candidate.statistics().mean();
        if candidate_mean == 0.0 {
            return if baseline_mean > 0.0 { f64::INFINITY } else { 1.0 };
        }
        baseline_mean / candidate_mean
    }

    /// `(1 - candidate.mean / baseline.mean) * 100`; positive when the
    /// candidate improves on the baseline. Zero if the baseline is empty.
    pub fn improvement_percent(&self) -> f64 {
        let baseline_mean = self.baseline.statistics().mean();
        if baseline_mean == 0.0 {
            return 0.0;
        }
        (1.0 - self.candidate.statistics().mean() / baseline_mean) * 100.0
    }

    /// True when the candidate's mean beats the baseline's.
    pub fn is_faster(&self) -> bool {
        self.speedup() > 1.0
    }
}

/// Cooperative cancellation handle for benchmark runs.
///
/// Clone the token to share it between the requesting side and the runner;
/// all clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// True once [`cancel`](Self::cancel) has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
