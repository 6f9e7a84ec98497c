//! Platform CPU utilization sampling.
//!
//! [`SysinfoSampler`] wraps the `sysinfo` crate. Utilization is the share of
//! non-idle time across all cores between two refreshes, so every sample
//! blocks the calling thread for the sampling window.

use std::time::Duration;

use sysinfo::{CpuRefreshKind, RefreshKind, System, MINIMUM_CPU_UPDATE_INTERVAL};

/// Source of aggregate CPU utilization.
pub trait CpuSampler {
    /// Block for `window` and return the non-idle utilization in percent.
    fn sample(&mut self, window: Duration) -> f64;
}

/// [`CpuSampler`] backed by `sysinfo`.
pub struct SysinfoSampler {
    system: System,
}

impl Default for SysinfoSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoSampler {
    pub fn new() -> Self {
        let system = System::new_with_specifics(
            RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing().with_cpu_usage()),
        );
        tracing::debug!(cpus = system.cpus().len(), "CPU sampler initialised");
        Self { system }
    }
}

impl CpuSampler for SysinfoSampler {
    fn sample(&mut self, window: Duration) -> f64 {
        // sysinfo needs a minimum gap between refreshes to compute a delta.
        let window = window.max(MINIMUM_CPU_UPDATE_INTERVAL);

        self.system.refresh_cpu_usage();
        std::thread::sleep(window);
        self.system.refresh_cpu_usage();

        f64::from(self.system.global_cpu_usage())
    }
}
