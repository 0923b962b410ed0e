//! # Configuration
//!
//! Store configuration is managed by [`confique`], layering environment
//! variables over an optional TOML file over compiled defaults.
//!
//! ## Priority
//!
//! 1. **Environment variables**: `ENTRYATTRS_TRACE_VALUES`, `ENTRYATTRS_LOG_NOTIFICATIONS`.
//! 2. **Config file**: the TOML file passed to [`StoreConfig::load`], if any.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `trace_values` | `false` | Include unprotected values in debug logs |
//! | `log_notifications` | `true` | Emit a trace event per dispatched notification |
//!
//! Configuration only affects diagnostics. It never changes what the store
//! holds or which notifications it publishes. Protected values are never
//! logged, whatever `trace_values` says.

use std::path::Path;

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Diagnostics settings for an [`AttributeStore`](crate::AttributeStore).
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Include values of unprotected attributes in `debug` log events.
    #[config(default = false, env = "ENTRYATTRS_TRACE_VALUES")]
    pub trace_values: bool,

    /// Emit a `trace` log event for every notification dispatched.
    #[config(default = true, env = "ENTRYATTRS_LOG_NOTIFICATIONS")]
    pub log_notifications: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            trace_values: false,
            log_notifications: true,
        }
    }
}

impl StoreConfig {
    /// Load configuration from the environment and an optional TOML file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert!(!config.trace_values);
        assert!(config.log_notifications);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "trace_values = true").unwrap();
        writeln!(file, "log_notifications = false").unwrap();

        let config = StoreConfig::load(Some(file.path())).unwrap();
        assert!(config.trace_values);
        assert!(!config.log_notifications);
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "trace_values = true").unwrap();

        let config = StoreConfig::load(Some(file.path())).unwrap();
        assert!(config.trace_values);
        assert!(config.log_notifications);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "trace_values = \"not a bool\"").unwrap();

        let err = StoreConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, crate::error::AttributesError::Config(_)));
    }

    // The only test that touches the environment. Other file-loading tests
    // expect `trace_values = true` or a parse error, so they are unaffected.
    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "trace_values = false").unwrap();

        std::env::set_var("ENTRYATTRS_TRACE_VALUES", "true");
        let loaded = StoreConfig::load(Some(file.path()));
        std::env::remove_var("ENTRYATTRS_TRACE_VALUES");

        assert!(loaded.unwrap().trace_values);
    }

    #[test]
    fn test_toml_roundtrip_of_non_default() {
        let config = StoreConfig {
            trace_values: true,
            log_notifications: false,
        };
        let text = toml::to_string(&config).unwrap();
        let loaded: StoreConfig = toml::from_str(&text).unwrap();
        assert_eq!(loaded, config);
    }
}
