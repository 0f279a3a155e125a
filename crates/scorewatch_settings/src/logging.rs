use crate::error::ConfigError;
use crate::source::{env_lookup, parse_var};
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

pub const LOG_LEVEL_KEY: &str = "LOG_LEVEL";
pub const LOG_JSON_KEY: &str = "LOG_JSON";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LogSettings {
    pub log_level: String,
    pub use_json: bool,
}

impl LogSettings {
    pub fn from_source<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let log_level = parse_var(&lookup, LOG_LEVEL_KEY, "info".to_string())?.to_lowercase();
        let use_json = parse_var(&lookup, LOG_JSON_KEY, false)?;

        Ok(Self {
            log_level,
            use_json,
        })
    }

    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::from_source(env_lookup)
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self::try_from_env().unwrap_or_else(|e| {
            warn!("{e}, using default log settings");
            Self {
                log_level: "info".to_string(),
                use_json: false,
            }
        })
    }
}

/// Installs a global `tracing` subscriber.
///
/// Returns an error if a subscriber has already been installed or the level
/// does not parse as an env-filter directive.
pub fn setup_logging(settings: &LogSettings) -> Result<(), ConfigError> {
    let filter = EnvFilter::try_new(&settings.log_level)
        .map_err(|e| ConfigError::LoggingError(e.to_string()))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = if settings.use_json {
        builder.json().with_current_span(false).try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| ConfigError::LoggingError(e.to_string()))
}
