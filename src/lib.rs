//! # chronograph
//!
//! Instrumentation core for timing measurement, scoped profiling, and
//! microbenchmarking:
//! - Named duration samples recorded from arbitrary call sites into a
//!   [`MeasurementStore`], with min/max/mean/median/std-dev/percentile
//!   statistics per name
//! - Nested scoped timing trees with an indented textual report
//! - Controlled microbenchmarks with warmup, baseline/candidate comparison,
//!   and ordered multi-benchmark suites
//! - A fixed-format performance report combining store statistics with an
//!   externally sampled process resource snapshot
//!
//! ## Quick start
//!
//! ```
//! use chronograph::{measure, Benchmark, MeasurementStore, Profiler};
//!
//! // Record ad-hoc durations into a store.
//! let store = MeasurementStore::new();
//! let value = measure(&store, "sum", || (1..=1000).sum::<u64>());
//! assert_eq!(value, 500_500);
//!
//! // Time a nested tree of scopes.
//! let profiler = Profiler::new();
//! let root = profiler.start("request");
//! root.child("parse").stop();
//! root.stop();
//!
//! // Benchmark a unit of work.
//! let result = Benchmark::new("sum").iterations(50).run(|| (1..=1000).sum::<u64>());
//! assert_eq!(result.durations.len(), 50);
//! ```
//!
//! ## Concurrency
//!
//! The [`MeasurementStore`] is the only structure safe to mutate from many
//! threads; everything else expects a single logical call chain. The
//! instrumentation bookkeeping itself never suspends or blocks — only
//! caller-supplied work does.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod benchmark;
pub mod measure;
pub mod output;
pub mod profiler;
pub mod report;
pub mod statistics;
pub mod store;
pub mod suite;

#[cfg(feature = "system")]
pub mod system;

pub use benchmark::{
    Benchmark, BenchmarkComparison, BenchmarkResult, CancelToken, DEFAULT_ITERATIONS,
    DEFAULT_WARMUP_ITERATIONS,
};
pub use measure::{measure, measure_async};
pub use profiler::{Profiler, Scope};
pub use report::{generate_report, PerformanceReport, ResourceSampler, ResourceSnapshot};
pub use statistics::{SampleStatistics, StatisticsSummary};
pub use store::MeasurementStore;
pub use suite::BenchmarkSuite;

#[cfg(feature = "system")]
pub use system::ProcessSampler;
