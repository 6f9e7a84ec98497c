//! `check_local_cpu` orchestration: one sample, one classification.

use probekit_core::metric_names::METRIC_CPU;
use probekit_core::{Outcome, PerfDataEntry, Polarity, Reporter};

use crate::config::CpuCheckConfig;
use crate::observation::{CpuObservation, CpuUsage};
use crate::sampler::CpuSampler;

/// Sample the CPU, record perfdata on `reporter` and classify the sample.
pub fn run<S: CpuSampler>(
    config: &CpuCheckConfig,
    observation: &mut CpuObservation<S>,
    reporter: &mut Reporter,
) -> Outcome {
    let usage = observation.run();

    reporter.add_perf_data(
        PerfDataEntry::new(METRIC_CPU, usage.usage_percent, "%")
            .with_thresholds(config.thresholds.warning, config.thresholds.critical)
            .with_min(0.0)
            .with_max(100.0),
    );

    classify(config, usage)
}

/// Larger is worse.
pub fn classify(config: &CpuCheckConfig, usage: CpuUsage) -> Outcome {
    let verdict = config
        .thresholds
        .evaluate_with(usage.usage_percent, Polarity::Ascending);

    Outcome::new(
        verdict,
        format!(
            "CPU usage {}% (warning {}%, critical {}%)",
            usage.usage_percent, config.thresholds.warning, config.thresholds.critical
        ),
    )
}
