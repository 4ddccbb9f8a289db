//! Report generation over a measurement store and a resource snapshot.
//!
//! The report composes the store's statistics with a process resource
//! snapshot obtained from an external collaborator. The crate only requires
//! that collaborator to expose a synchronous "sample now" call; it never
//! implements the platform sampling itself (see the `system` feature for an
//! optional `sysinfo`-backed implementation).

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::statistics::StatisticsSummary;
use crate::store::MeasurementStore;

/// Point-in-time process resource numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    /// Resident set size in bytes.
    pub resident_bytes: u64,
    /// Virtual memory size in bytes.
    pub virtual_bytes: u64,
    /// Process CPU usage in percent (may exceed 100 on multi-core hosts).
    pub cpu_percent: f64,
}

/// Synchronous process resource sampler.
///
/// Implementations wrap platform-specific memory/CPU introspection. The core
/// calls `sample` exactly once per generated report.
pub trait ResourceSampler {
    /// Capture resource usage now.
    fn sample(&self) -> ResourceSnapshot;
}

/// Serializable report snapshot: store statistics plus resource usage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// When the report was captured.
    pub generated_at: DateTime<Local>,
    /// Resource usage at capture time.
    pub resource: ResourceSnapshot,
    /// Per-name statistics, keyed (and therefore sorted) by measurement name.
    pub measurements: BTreeMap<String, StatisticsSummary>,
}

impl PerformanceReport {
    /// Snapshot the store and the sampler.
    pub fn capture(store: &MeasurementStore, sampler: &dyn ResourceSampler) -> Self {
        let measurements = store
            .all_statistics()
            .into_iter()
            .map(|(name, stats)| (name, stats.summary()))
            .collect();
        Self {
            generated_at: Local::now(),
            resource: sampler.sample(),
            measurements,
        }
    }

    /// Render the fixed-format text report.
    ///
    /// Layout: title line, timestamp line, memory line
    /// (`Resident: %.2f MB, Virtual: %.2f MB`), CPU line (`%.1f%%`), then one
    /// block per measurement name in lexicographic order showing count, mean,
    /// min, and max to four decimal places with a trailing `s` unit.
    pub fn render(&self) -> String {
        const MB: f64 = 1024.0 * 1024.0;

        let mut out = String::new();
        out.push_str("=== Performance Report ===\n");
        out.push_str(&format!(
            "Generated: {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str(&format!(
            "Resident: {:.2} MB, Virtual: {:.2} MB\n",
            self.resource.resident_bytes as f64 / MB,
            self.resource.virtual_bytes as f64 / MB
        ));
        out.push_str(&format!("CPU: {:.1}%\n", self.resource.cpu_percent));

        for (name, summary) in &self.measurements {
            out.push('\n');
            out.push_str(&format!("{name}:\n"));
            out.push_str(&format!("  count: {}\n", summary.count));
            out.push_str(&format!("  mean: {:.4}s\n", summary.mean_secs));
            out.push_str(&format!("  min: {:.4}s\n", summary.min_secs));
            out.push_str(&format!("  max: {:.4}s\n", summary.max_secs));
        }
        out
    }
}

/// Capture and render a report in one call.
pub fn generate_report(store: &MeasurementStore, sampler: &dyn ResourceSampler) -> String {
    PerformanceReport::capture(store, sampler).render()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSampler;

    impl ResourceSampler for FixedSampler {
        fn sample(&self) -> ResourceSnapshot {
            ResourceSnapshot {
                resident_bytes: 128 * 1024 * 1024,
                virtual_bytes: 512 * 1024 * 1024,
                cpu_percent: 12.34,
            }
        }
    }

    #[test]
    fn test_report_header_format() {
        let store = MeasurementStore::new();
        let report = generate_report(&store, &FixedSampler);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "=== Performance Report ===");
        assert!(lines[1].starts_with("Generated: "));
        assert_eq!(lines[2], "Resident: 128.00 MB, Virtual: 512.00 MB");
        assert_eq!(lines[3], "CPU: 12.3%");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_measurement_blocks_sorted_by_name() {
        let store = MeasurementStore::new();
        store.record("zeta", 0.5);
        store.record("alpha", 0.01);
        store.record("alpha", 0.03);

        let report = generate_report(&store, &FixedSampler);
        let alpha = report.find("alpha:").expect("alpha block");
        let zeta = report.find("zeta:").expect("zeta block");
        assert!(alpha < zeta);

        assert!(report.contains("  count: 2\n"));
        assert!(report.contains("  mean: 0.0200s\n"));
        assert!(report.contains("  min: 0.0100s\n"));
        assert!(report.contains("  max: 0.0300s\n"));
    }

    #[test]
    fn test_report_snapshot_serializes() {
        let store = MeasurementStore::new();
        store.record("op", 0.25);
        let snapshot = PerformanceReport::capture(&store, &FixedSampler);
        let json = serde_json::to_string(&snapshot).expect("serializable");
        assert!(json.contains("\"resident_bytes\":134217728"));
        assert!(json.contains("\"op\""));
    }
}
