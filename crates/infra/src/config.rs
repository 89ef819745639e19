//! Configuration loading and representation.
//!
//! Values come from the environment with defaults for everything:
//!
//! | variable                            | default | meaning                                 |
//! |-------------------------------------|---------|-----------------------------------------|
//! | `CONTENTREPO_LOG_FILTER`            | `info`  | tracing filter (overridden by `RUST_LOG`) |
//! | `CONTENTREPO_LOG_FORMAT`            | `json`  | `json` or `pretty`                      |
//! | `CONTENTREPO_MAX_AUTO_CREATE_DEPTH` | `32`    | nesting limit for auto-created children |

use thiserror::Error;

use contentrepo_nodes::DEFAULT_MAX_AUTO_CREATE_DEPTH;
use contentrepo_observability::{LogConfig, LogFormat};

pub const LOG_FILTER_VAR: &str = "CONTENTREPO_LOG_FILTER";
pub const LOG_FORMAT_VAR: &str = "CONTENTREPO_LOG_FORMAT";
pub const MAX_AUTO_CREATE_DEPTH_VAR: &str = "CONTENTREPO_MAX_AUTO_CREATE_DEPTH";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Process configuration for the content repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    pub log: LogConfig,
    pub max_auto_create_depth: usize,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            log: LogConfig::default(),
            max_auto_create_depth: DEFAULT_MAX_AUTO_CREATE_DEPTH,
        }
    }
}

impl RepositoryConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (used by `from_env` and tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(filter) = lookup(LOG_FILTER_VAR) {
            if filter.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    key: LOG_FILTER_VAR,
                    value: filter,
                    reason: "filter cannot be empty".to_string(),
                });
            }
            config.log.filter = filter;
        }

        if let Some(format) = lookup(LOG_FORMAT_VAR) {
            config.log.format = match format.trim().to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" => LogFormat::Pretty,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: LOG_FORMAT_VAR,
                        value: format,
                        reason: "expected `json` or `pretty`".to_string(),
                    });
                }
            };
        }

        if let Some(depth) = lookup(MAX_AUTO_CREATE_DEPTH_VAR) {
            config.max_auto_create_depth =
                depth.trim().parse().map_err(|e| ConfigError::Invalid {
                    key: MAX_AUTO_CREATE_DEPTH_VAR,
                    value: depth.clone(),
                    reason: format!("{e}"),
                })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = RepositoryConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, RepositoryConfig::default());
        assert_eq!(config.log.filter, "info");
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.max_auto_create_depth, 32);
    }

    #[test]
    fn values_are_read_from_lookup() {
        let config = RepositoryConfig::from_lookup(lookup(&[
            (LOG_FILTER_VAR, "contentrepo=debug"),
            (LOG_FORMAT_VAR, "Pretty"),
            (MAX_AUTO_CREATE_DEPTH_VAR, " 4 "),
        ]))
        .unwrap();

        assert_eq!(config.log.filter, "contentrepo=debug");
        assert_eq!(config.log.format, LogFormat::Pretty);
        assert_eq!(config.max_auto_create_depth, 4);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = RepositoryConfig::from_lookup(lookup(&[(MAX_AUTO_CREATE_DEPTH_VAR, "deep")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { key: MAX_AUTO_CREATE_DEPTH_VAR, .. }
        ));

        let err = RepositoryConfig::from_lookup(lookup(&[(LOG_FORMAT_VAR, "xml")])).unwrap_err();
        assert!(err.to_string().contains(LOG_FORMAT_VAR));
    }
}
