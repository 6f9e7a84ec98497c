//! Threshold evaluation engine.
//!
//! Pure logic: the caller samples the metric and passes the value in.
//! Values sitting exactly on a threshold are classified as WARNING.

use crate::error::ConfigError;
use crate::verdict::Verdict;

/// Which direction of a metric is "worse".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Larger is worse (CPU load, latency).
    Ascending,
    /// Smaller is worse (free space).
    Descending,
}

impl Polarity {
    /// Infer polarity from the ordering of the two thresholds.
    ///
    /// `warn < crit` means Ascending, anything else Descending. This is a
    /// convenience heuristic, not the monitoring-plugins range syntax
    /// (`10:20`, `@5:10`, ...), which is not supported.
    pub fn detect(warning: f64, critical: f64) -> Self {
        if warning < critical {
            Polarity::Ascending
        } else {
            Polarity::Descending
        }
    }
}

/// Classify `value` against the warning/critical thresholds.
///
/// Never returns [`Verdict::Unknown`].
pub fn evaluate(value: f64, warning: f64, critical: f64, polarity: Polarity) -> Verdict {
    match polarity {
        Polarity::Ascending => {
            if value < warning {
                Verdict::Ok
            } else if value > critical {
                Verdict::Critical
            } else {
                Verdict::Warning
            }
        }
        Polarity::Descending => {
            if value > warning {
                Verdict::Ok
            } else if value < critical {
                Verdict::Critical
            } else {
                Verdict::Warning
            }
        }
    }
}

/// Caller-supplied warning/critical pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdPair {
    pub warning: f64,
    pub critical: f64,
}

impl ThresholdPair {
    pub fn new(warning: f64, critical: f64) -> Self {
        Self { warning, critical }
    }

    /// Build a pair from user input, rejecting non-finite values.
    ///
    /// Ordering is not checked: `warning` may sit above `critical`, and the
    /// caller decides how the pair is read.
    pub fn checked(warning: f64, critical: f64) -> Result<Self, ConfigError> {
        if !warning.is_finite() {
            return Err(ConfigError::invalid("warning", "must be a finite number"));
        }
        if !critical.is_finite() {
            return Err(ConfigError::invalid("critical", "must be a finite number"));
        }
        Ok(Self { warning, critical })
    }

    pub fn polarity(&self) -> Polarity {
        Polarity::detect(self.warning, self.critical)
    }

    /// Evaluate with the auto-detected polarity.
    pub fn evaluate(&self, value: f64) -> Verdict {
        evaluate(value, self.warning, self.critical, self.polarity())
    }

    /// Evaluate with an explicit polarity.
    pub fn evaluate_with(&self, value: f64, polarity: Polarity) -> Verdict {
        evaluate(value, self.warning, self.critical, polarity)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
