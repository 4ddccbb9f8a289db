//! `sysinfo`-backed process resource sampler (feature `system`).

use std::sync::{Mutex, PoisonError};

use sysinfo::{Pid, System};

use crate::report::{ResourceSampler, ResourceSnapshot};

/// Samples the current process's memory and CPU usage via `sysinfo`.
///
/// The sampler keeps one `System` handle for its lifetime; CPU usage is
/// computed against the previous refresh, so the first sample after
/// construction reports `0.0` CPU.
#[derive(Debug)]
pub struct ProcessSampler {
    sys: Mutex<System>,
    pid: Pid,
}

impl ProcessSampler {
    /// Create a sampler bound to the current process.
    pub fn new() -> Self {
        Self {
            sys: Mutex::new(System::new()),
            pid: Pid::from_u32(std::process::id()),
        }
    }
}

impl Default for ProcessSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceSampler for ProcessSampler {
    fn sample(&self) -> ResourceSnapshot {
        let mut sys = self.sys.lock().unwrap_or_else(PoisonError::into_inner);
        sys.refresh_processes();
        match sys.process(self.pid) {
            Some(process) => ResourceSnapshot {
                resident_bytes: process.memory(),
                virtual_bytes: process.virtual_memory(),
                cpu_percent: f64::from(process.cpu_usage()),
            },
            // Should not happen for our own pid; report zeros over failing.
            None => ResourceSnapshot::default(),
        }
    }
}
