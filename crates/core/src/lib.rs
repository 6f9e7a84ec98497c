//! `probekit-core` -- shared check evaluation engine.
//!
//! Verdicts and their exit codes, threshold classification, perfdata
//! formatting and the status line reporter. Everything here is pure except
//! [`Reporter::exit`], which terminates the process.

pub mod error;
pub mod metric_names;
pub mod perfdata;
pub mod reporter;
pub mod rounding;
pub mod thresholds;
pub mod verdict;

pub use error::ConfigError;
pub use perfdata::{PerfData, PerfDataEntry};
pub use reporter::{Outcome, Reporter};
pub use thresholds::{evaluate, Polarity, ThresholdPair};
pub use verdict::Verdict;
