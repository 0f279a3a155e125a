use crate::error::ConfigError;
use crate::source::{env_lookup, parse_var};
use serde::Serialize;
use tracing::warn;

pub const DECISION_THRESHOLD_KEY: &str = "SCOREWATCH_DECISION_THRESHOLD";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MetricSettings {
    /// Scores at or above this value are predicted positive
    pub decision_threshold: f64,
}

impl MetricSettings {
    pub fn from_source<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let decision_threshold = parse_var(&lookup, DECISION_THRESHOLD_KEY, 0.5)?;

        if !(0.0..=1.0).contains(&decision_threshold) {
            return Err(ConfigError::InvalidValue {
                key: DECISION_THRESHOLD_KEY.to_string(),
                value: decision_threshold.to_string(),
            });
        }

        Ok(Self { decision_threshold })
    }

    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::from_source(env_lookup)
    }
}

impl Default for MetricSettings {
    fn default() -> Self {
        Self::try_from_env().unwrap_or_else(|e| {
            warn!("{e}, using default metric settings");
            Self {
                decision_threshold: 0.5,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_default() {
        let settings = MetricSettings::from_source(|_| None).unwrap();
        assert_eq!(settings.decision_threshold, 0.5);
    }

    #[test]
    fn test_threshold_out_of_range() {
        let result = MetricSettings::from_source(|_| Some("1.5".to_string()));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
