//! One blocking CPU utilization sample.

use std::time::Duration;

use probekit_core::rounding;

use crate::sampler::CpuSampler;

/// Length of the sampling window. Not configurable.
pub const SAMPLE_WINDOW: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuUsage {
    /// Non-idle utilization in `[0, 100]`, rounded to 3 decimals.
    pub usage_percent: f64,
}

pub struct CpuObservation<S> {
    sampler: S,
}

impl<S: CpuSampler> CpuObservation<S> {
    pub fn new(sampler: S) -> Self {
        Self { sampler }
    }

    /// Take exactly one sample over [`SAMPLE_WINDOW`].
    pub fn run(&mut self) -> CpuUsage {
        let raw = self.sampler.sample(SAMPLE_WINDOW);

        let usage_percent = if raw.is_finite() {
            rounding::round(raw.clamp(0.0, 100.0))
        } else {
            tracing::warn!(raw, "CPU sampler returned a non-finite value, reporting 0%");
            0.0
        };

        tracing::debug!(usage_percent, "CPU sampled");
        CpuUsage { usage_percent }
    }
}
