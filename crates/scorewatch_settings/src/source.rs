use crate::error::ConfigError;
use std::str::FromStr;

/// Reads `key` through `lookup`, falling back to `default` when unset
pub(crate) fn parse_var<T, L>(lookup: &L, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    L: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
    }
}

pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
