//! Process-wide measurement store.
//!
//! The store is an append-only log of duration samples keyed by measurement
//! name. It is the only structure in this crate that is mutated from many
//! concurrent call sites (synchronous callers and async continuations alike),
//! so all access to the underlying map goes through a single mutex.
//!
//! There is deliberately no global instance: construct a
//! [`MeasurementStore`] at session start and pass a reference (or an `Arc`)
//! to whoever records into it.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError};

use crate::statistics::SampleStatistics;

/// Append-only log of named duration samples.
///
/// `record` may be called concurrently from any number of threads; per-name
/// sample order follows append order, but no ordering is guaranteed across
/// different names recorded concurrently.
#[derive(Debug, Default)]
pub struct MeasurementStore {
    samples: Mutex<HashMap<String, Vec<f64>>>,
}

impl MeasurementStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one duration sample (seconds) under `name`, creating the key
    /// if absent. Never fails.
    ///
    /// Durations are non-negative by invariant; a negative input (possible
    /// only through caller arithmetic, never from clock capture) is clamped
    /// to zero.
    pub fn record(&self, name: &str, seconds: f64) {
        let seconds = seconds.max(0.0);
        log::trace!("record {name}: {seconds:.6}s");
        let mut samples = self.lock();
        samples.entry(name.to_string()).or_default().push(seconds);
    }

    /// Statistics for one measurement name.
    ///
    /// Returns `None` if `name` was never recorded. A present name always has
    /// at least one sample, since `record` is the only writer.
    pub fn statistics(&self, name: &str) -> Option<SampleStatistics> {
        let samples = self.lock();
        samples
            .get(name)
            .map(|set| SampleStatistics::from_samples(set))
    }

    /// Point-in-time snapshot of statistics for every recorded name.
    ///
    /// The snapshot is internally consistent per name but may be stale the
    /// instant it is returned when recording continues concurrently.
    pub fn all_statistics(&self) -> BTreeMap<String, SampleStatistics> {
        let samples = self.lock();
        samples
            .iter()
            .map(|(name, set)| (name.clone(), SampleStatistics::from_samples(set)))
            .collect()
    }

    /// Number of distinct measurement names currently recorded.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if nothing has been recorded since creation or the last reset.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Clear every name and all samples.
    pub fn reset(&self) {
        log::debug!("measurement store reset");
        self.lock().clear();
    }

    /// Lock the map, recovering from poisoning. A poisoned lock only means a
    /// recording thread panicked mid-append; the map itself stays valid.
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<f64>>> {
        self.samples.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
