//! `check_local_cpu` -- local CPU utilization probe.
//!
//! Samples aggregate CPU utilization over one second and compares it with
//! the warning/critical percentages. Prints a single status line and exits
//! 0/1/2/3 for OK/WARNING/CRITICAL/UNKNOWN.
//!
//! Logs go to stderr. `RUST_LOG` overrides the level chosen by `--debug`.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use probekit_core::metric_names::CHECK_LOCAL_CPU;
use probekit_core::{ConfigError, Outcome, Reporter};
use probekit_cpu::check;
use probekit_cpu::cli::CpuArgs;
use probekit_cpu::config::CpuCheckConfig;
use probekit_cpu::observation::CpuObservation;
use probekit_cpu::sampler::SysinfoSampler;

fn main() {
    dotenvy::dotenv().ok();

    let mut reporter = Reporter::new(CHECK_LOCAL_CPU);

    let args = match CpuArgs::try_parse() {
        Ok(args) => args,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let err = ConfigError::arguments(&e.to_string());
            reporter.exit(Outcome::new(err.verdict(), err.to_string()))
        }
    };

    let default_level = if args.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match CpuCheckConfig::try_from(args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            reporter.exit(Outcome::new(e.verdict(), e.to_string()))
        }
    };

    let mut observation = CpuObservation::new(SysinfoSampler::new());
    let outcome = check::run(&config, &mut observation, &mut reporter);
    reporter.exit(outcome)
}
