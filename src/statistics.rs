//! Statistics over duration samples.
//!
//! [`SampleStatistics`] is an immutable view over an already-materialized
//! sample set: construction sorts once, and every query after that is a pure
//! read on the sorted buffer. The view is safe to share across reader threads.
//!
//! # Empty sample sets
//!
//! Every statistic on an empty sample set returns `0.0` (and `count` returns
//! zero) rather than failing. Reporting code therefore never has to
//! special-case names that were registered but not yet measured. "Name was
//! never recorded at all" is a distinct condition, surfaced as `None` by
//! [`MeasurementStore::statistics`](crate::store::MeasurementStore::statistics).
//!
//! # Percentile and median policy
//!
//! Percentiles are nearest-rank with no interpolation: sort ascending, index
//! at `floor(count * p / 100)`, clamped to `count - 1`. The median is the
//! element at index `count / 2`, which for even counts is the upper-middle
//! element rather than the averaged middle pair. This is a deliberately
//! simple policy and is preserved exactly for compatibility with existing
//! consumers; it is not the textbook definition.

use serde::{Deserialize, Serialize};

/// Immutable statistics view over a set of duration samples (seconds).
#[derive(Debug, Clone, PartialEq)]
pub struct SampleStatistics {
    /// Samples sorted ascending.
    sorted: Vec<f64>,
    /// Sum of all samples, computed once at construction.
    total: f64,
}

impl SampleStatistics {
    /// Build a statistics view from raw samples.
    ///
    /// The input is copied and sorted ascending; the caller's slice is left
    /// untouched.
    pub fn from_samples(samples: &[f64]) -> Self {
        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let total = sorted.iter().sum();
        Self { sorted, total }
    }

    /// Number of samples.
    pub fn count(&self) -> usize {
        self.sorted.len()
    }

    /// True if no samples were recorded.
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Sum of all samples in seconds.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Smallest sample, or `0.0` when empty.
    pub fn min(&self) -> f64 {
        self.sorted.first().copied().unwrap_or(0.0)
    }

    /// Largest sample, or `0.0` when empty.
    pub fn max(&self) -> f64 {
        self.sorted.last().copied().unwrap_or(0.0)
    }

    /// Arithmetic mean, or `0.0` when empty.
    pub fn mean(&self) -> f64 {
        if self.sorted.is_empty() {
            return 0.0;
        }
        self.total / self.sorted.len() as f64
    }

    /// Median under the index `count / 2` policy (see module docs).
    pub fn median(&self) -> f64 {
        if self.sorted.is_empty() {
            return 0.0;
        }
        self.sorted[self.sorted.len() / 2]
    }

    /// Population standard deviation (divide by N, not N - 1).
    ///
    /// Returns `0.0` when empty.
    pub fn std_dev(&self) -> f64 {
        if self.sorted.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        let variance = self
            .sorted
            .iter()
            .map(|s| {
                let d = s - mean;
                d * d
            })
            .sum::<f64>()
            / self.sorted.len() as f64;
        variance.sqrt()
    }

    /// Nearest-rank percentile for `p` in `[0, 100]`.
    ///
    /// Values of `p` outside the range are clamped. Returns `0.0` when empty.
    pub fn percentile(&self, p: f64) -> f64 {
        if self.sorted.is_empty() {
            return 0.0;
        }
        let p = p.clamp(0.0, 100.0);
        let idx = (self.sorted.len() as f64 * p / 100.0).floor() as usize;
        self.sorted[idx.min(self.sorted.len() - 1)]
    }

    /// Collapse the view into a serializable scalar summary.
    pub fn summary(&self) -> StatisticsSummary {
        StatisticsSummary {
            count: self.count(),
            total_secs: self.total(),
            mean_secs: self.mean(),
            min_secs: self.min(),
            max_secs: self.max(),
            median_secs: self.median(),
            std_dev_secs: self.std_dev(),
            p95_secs: self.percentile(95.0),
        }
    }
}

/// Scalar statistics summary for serialization and report snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    /// Number of samples.
    pub count: usize,
    /// Sum of all samples in seconds.
    pub total_secs: f64,
    /// Arithmetic mean in seconds.
    pub mean_secs: f64,
    /// Smallest sample in seconds.
    pub min_secs: f64,
    /// Largest sample in seconds.
    pub max_secs: f64,
    /// Median sample in seconds (upper-middle policy).
    pub median_secs: f64,
    /// Population standard deviation in seconds.
    pub std_dev_secs: f64,
    /// 95th percentile in seconds (nearest-rank).
    pub p95_secs: f64,
}
