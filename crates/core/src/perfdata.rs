//! Performance data accumulator.
//!
//! Fragment format: `label=value[uom];[warn];[crit];[min];[max]`, each
//! fragment followed by a single space. Labels are not escaped; callers pass
//! the constants from [`crate::metric_names`].

use std::fmt::{self, Write as _};

/// One perfdata measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct PerfDataEntry {
    pub label: &'static str,
    pub value: f64,
    pub uom: &'static str,
    pub warning: Option<f64>,
    pub critical: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PerfDataEntry {
    pub fn new(label: &'static str, value: f64, uom: &'static str) -> Self {
        Self {
            label,
            value,
            uom,
            warning: None,
            critical: None,
            min: None,
            max: None,
        }
    }

    pub fn with_thresholds(mut self, warning: f64, critical: f64) -> Self {
        self.warning = Some(warning);
        self.critical = Some(critical);
        self
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

impl fmt::Display for PerfDataEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}{}", self.label, self.value, self.uom)?;
        for field in [self.warning, self.critical, self.min, self.max] {
            f.write_char(';')?;
            if let Some(v) = field {
                write!(f, "{v}")?;
            }
        }
        Ok(())
    }
}

/// Append-only perfdata buffer for the lifetime of one check run.
#[derive(Debug, Default, Clone)]
pub struct PerfData {
    rendered: String,
}

impl PerfData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one fragment.
    pub fn add(&mut self, entry: PerfDataEntry) {
        // Writing into a String cannot fail.
        let _ = write!(self.rendered, "{entry} ");
    }

    pub fn is_empty(&self) -> bool {
        self.rendered.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.rendered
    }
}

impl fmt::Display for PerfData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}
