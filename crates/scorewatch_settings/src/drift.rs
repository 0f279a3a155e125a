use crate::error::ConfigError;
use crate::source::{env_lookup, parse_var};
use scorewatch_types::PsiSeverity;
use serde::Serialize;
use tracing::warn;

pub const PSI_BINS_KEY: &str = "SCOREWATCH_PSI_BINS";
pub const PSI_MODERATE_KEY: &str = "SCOREWATCH_PSI_MODERATE";
pub const PSI_SIGNIFICANT_KEY: &str = "SCOREWATCH_PSI_SIGNIFICANT";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DriftSettings {
    pub psi_bins: usize,
    pub moderate_threshold: f64,
    pub significant_threshold: f64,
}

impl DriftSettings {
    pub fn from_source<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let psi_bins = parse_var(&lookup, PSI_BINS_KEY, 10usize)?;
        let moderate_threshold = parse_var(&lookup, PSI_MODERATE_KEY, 0.1)?;
        let significant_threshold = parse_var(&lookup, PSI_SIGNIFICANT_KEY, 0.25)?;

        if psi_bins == 0 {
            return Err(ConfigError::InvalidValue {
                key: PSI_BINS_KEY.to_string(),
                value: psi_bins.to_string(),
            });
        }

        if moderate_threshold > significant_threshold {
            return Err(ConfigError::Error(format!(
                "{PSI_MODERATE_KEY} ({moderate_threshold}) must not exceed {PSI_SIGNIFICANT_KEY} ({significant_threshold})"
            )));
        }

        Ok(Self {
            psi_bins,
            moderate_threshold,
            significant_threshold,
        })
    }

    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::from_source(env_lookup)
    }

    pub fn severity(&self, psi: f64) -> PsiSeverity {
        PsiSeverity::from_value(psi, self.moderate_threshold, self.significant_threshold)
    }
}

impl Default for DriftSettings {
    fn default() -> Self {
        Self::try_from_env().unwrap_or_else(|e| {
            warn!("{e}, using default drift settings");
            Self {
                psi_bins: 10,
                moderate_threshold: 0.1,
                significant_threshold: 0.25,
            }
        })
    }
}
