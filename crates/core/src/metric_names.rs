//! Check names and perfdata labels.
//!
//! Labels are written into the perfdata line unescaped, so they must stay
//! free of `=`, `;` and whitespace.

/// Status line prefix for the HTTP check.
pub const CHECK_WEB: &str = "CHECK WEB";

/// Status line prefix for the local CPU check.
pub const CHECK_LOCAL_CPU: &str = "CHECK LOCAL CPU";

/// Round-trip latency of the HTTP check, in milliseconds.
pub const METRIC_TIME: &str = "time";

/// Response body length of the HTTP check, in bytes.
pub const METRIC_SIZE: &str = "size";

/// Aggregate non-idle CPU utilization percentage (0-100).
pub const METRIC_CPU: &str = "cpu";
