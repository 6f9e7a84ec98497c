use probekit_core::{ConfigError, ThresholdPair};

use crate::cli::CpuArgs;

/// Validated thresholds for the CPU check, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuCheckConfig {
    pub thresholds: ThresholdPair,
}

impl CpuCheckConfig {
    pub fn new(warning: f64, critical: f64) -> Result<Self, ConfigError> {
        let thresholds = ThresholdPair::checked(warning, critical)?;
        for (name, value) in [("warning", warning), ("critical", critical)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::invalid(
                    name,
                    format!("{value} is outside 0-100%"),
                ));
            }
        }
        Ok(Self { thresholds })
    }
}

impl TryFrom<CpuArgs> for CpuCheckConfig {
    type Error = ConfigError;

    fn try_from(args: CpuArgs) -> Result<Self, Self::Error> {
        Self::new(args.warning, args.critical)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn accepts_ordered_percentages() {
        let config = CpuCheckConfig::new(75.0, 90.0).unwrap();
        assert_eq!(config.thresholds, ThresholdPair::new(75.0, 90.0));
    }

    #[test]
    fn rejects_out_of_range() {
        assert_matches!(
            CpuCheckConfig::new(75.0, 120.0),
            Err(ConfigError::Invalid { name: "critical", .. })
        );
        assert_matches!(
            CpuCheckConfig::new(-1.0, 90.0),
            Err(ConfigError::Invalid { name: "warning", .. })
        );
    }

    #[test]
    fn keeps_warning_above_critical() {
        let config = CpuCheckConfig::new(90.0, 75.0).unwrap();
        assert_eq!(config.thresholds, ThresholdPair::new(90.0, 75.0));
    }
}
