pub mod drift;
pub mod error;
pub mod logging;
pub mod metric;
mod source;

pub use drift::DriftSettings;
pub use error::ConfigError;
pub use logging::{setup_logging, LogSettings};
pub use metric::MetricSettings;

use serde::Serialize;

#[derive(Debug, Clone, Serialize, Default)]
pub struct ScorewatchConfig {
    pub metric_settings: MetricSettings,
    pub drift_settings: DriftSettings,
    pub log_settings: LogSettings,
}

impl ScorewatchConfig {
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            metric_settings: MetricSettings::try_from_env()?,
            drift_settings: DriftSettings::try_from_env()?,
            log_settings: LogSettings::try_from_env()?,
        })
    }
}
