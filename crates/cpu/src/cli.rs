//! Command-line surface of `check_local_cpu`.

use clap::Parser;

/// Sample local CPU utilization and compare it with the thresholds.
#[derive(Debug, Parser)]
#[command(name = "check_local_cpu", version)]
pub struct CpuArgs {
    /// Warning threshold, in percent.
    #[arg(short, long)]
    pub warning: f64,

    /// Critical threshold, in percent.
    #[arg(short, long)]
    pub critical: f64,

    /// Log each step to stderr.
    #[arg(short, long)]
    pub debug: bool,
}
