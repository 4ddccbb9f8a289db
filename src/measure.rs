//! One-shot measurement entry points.
//!
//! [`measure`] and [`measure_async`] run a unit of work exactly once, time it
//! with the monotonic clock, record the elapsed seconds into a
//! [`MeasurementStore`], and forward the work's return value unchanged. The
//! two variants share their recording semantics; only how the work completes
//! differs.
//!
//! # Failure policy
//!
//! A unit of work that *returns* is timed and recorded, including one that
//! returns an `Err` value: completion with an error is still a completed,
//! observable execution. A unit of work that panics unwinds past the
//! recording step and contributes no sample.

use std::future::Future;
use std::time::Instant;

use crate::store::MeasurementStore;

/// Run `work` once, record its duration under `name`, and return its result.
///
/// # Example
///
/// ```
/// use chronograph::{measure, MeasurementStore};
///
/// let store = MeasurementStore::new();
/// let sum = measure(&store, "sum", || (1..=100).sum::<u64>());
/// assert_eq!(sum, 5050);
/// assert_eq!(store.statistics("sum").map(|s| s.count()), Some(1));
/// ```
pub fn measure<T, F>(store: &MeasurementStore, name: &str, work: F) -> T
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let value = work();
    store.record(name, start.elapsed().as_secs_f64());
    value
}

/// Async variant of [`measure`] with identical recording semantics.
///
/// The future may suspend during its own execution; bookkeeping around it
/// (timestamp capture, the store append) never suspends. Elapsed time covers
/// the full span from first poll to completion, including suspended time.
pub async fn measure_async<T, Fut>(store: &MeasurementStore, name: &str, work: Fut) -> T
where
    Fut: Future<Output = T>,
{
    let start = Instant::now();
    let value = work.await;
    store.record(name, start.elapsed().as_secs_f64());
    value
}
