// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runtime configuration.
//!
//! Environment variables set the baseline; command-line flags (applied by the binary) win.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::logging::default_log_level;
use crate::scheduler::{DEFAULT_FAST_INTERVAL, DEFAULT_SLOW_INTERVAL};
use crate::store::WriteDurability;

pub const ENV_FAST_TICK_MS: &str = "FATESHEET_FAST_TICK_MS";
pub const ENV_SLOW_TICK_MS: &str = "FATESHEET_SLOW_TICK_MS";
pub const ENV_LOG_LEVEL: &str = "FATESHEET_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "FATESHEET_LOG_DIR";

/// Sheet files land here when no directory is given.
pub const DEFAULT_SHEET_DIR: &str = "saved";
const DEFAULT_LOG_SUBDIR: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub sheet_dir: PathBuf,
    pub demo: bool,
    pub durability: WriteDurability,
    pub fast_interval: Duration,
    pub slow_interval: Duration,
    pub log_level: String,
    /// Defaults to `<sheet-dir>/logs`.
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet_dir: PathBuf::from(DEFAULT_SHEET_DIR),
            demo: false,
            durability: WriteDurability::default(),
            fast_interval: DEFAULT_FAST_INTERVAL,
            slow_interval: DEFAULT_SLOW_INTERVAL,
            log_level: default_log_level().to_owned(),
            log_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| match env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidEnv {
                name: name.to_owned(),
                value: "<non-unicode>".to_owned(),
            }),
        })
    }

    /// Builds a config from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<Option<String>, ConfigError>,
    {
        let mut config = Self::default();
        let get = |name: &str| -> Result<Option<String>, ConfigError> {
            Ok(lookup(name)?.map(|value| value.trim().to_owned()).filter(|value| !value.is_empty()))
        };

        if let Some(raw) = get(ENV_FAST_TICK_MS)? {
            config.fast_interval = parse_interval(ENV_FAST_TICK_MS, &raw)?;
        }
        if let Some(raw) = get(ENV_SLOW_TICK_MS)? {
            config.slow_interval = parse_interval(ENV_SLOW_TICK_MS, &raw)?;
        }
        if let Some(level) = get(ENV_LOG_LEVEL)? {
            config.log_level = level;
        }
        if let Some(dir) = get(ENV_LOG_DIR)? {
            config.log_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }

    pub fn effective_log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| self.sheet_dir.join(DEFAULT_LOG_SUBDIR))
    }
}

fn parse_interval(name: &str, raw: &str) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(ConfigError::InvalidEnv {
            name: name.to_owned(),
            value: format!("{raw} (expected a positive number of milliseconds)"),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidEnv { name: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnv { name, value } => write!(f, "invalid env {name}={value}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use std::time::Duration;

    use super::{Config, ConfigError, ENV_FAST_TICK_MS, ENV_LOG_DIR, ENV_SLOW_TICK_MS};

    fn lookup_from(
        vars: &[(&str, &str)],
    ) -> impl Fn(&str) -> Result<Option<String>, ConfigError> {
        let vars: BTreeMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        move |name| Ok(vars.get(name).cloned())
    }

    #[test]
    fn defaults_without_env() {
        let config = Config::from_lookup(lookup_from(&[])).expect("config");
        assert_eq!(config, Config::default());
        assert_eq!(config.fast_interval, Duration::from_millis(100));
        assert_eq!(config.slow_interval, Duration::from_secs(2));
        assert_eq!(config.effective_log_dir(), PathBuf::from("saved").join("logs"));
    }

    #[test]
    fn env_overrides_intervals_and_log_dir() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_FAST_TICK_MS, "50"),
            (ENV_SLOW_TICK_MS, " 500 "),
            (ENV_LOG_DIR, "/tmp/fatesheet-logs"),
        ]))
        .expect("config");
        assert_eq!(config.fast_interval, Duration::from_millis(50));
        assert_eq!(config.slow_interval, Duration::from_millis(500));
        assert_eq!(config.effective_log_dir(), PathBuf::from("/tmp/fatesheet-logs"));
    }

    #[test]
    fn rejects_zero_and_garbage_intervals() {
        for raw in ["0", "fast", "-5"] {
            let err = Config::from_lookup(lookup_from(&[(ENV_FAST_TICK_MS, raw)])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidEnv { ref name, .. } if name == ENV_FAST_TICK_MS));
        }
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = Config::from_lookup(lookup_from(&[(ENV_SLOW_TICK_MS, "  ")])).expect("config");
        assert_eq!(config.slow_interval, Duration::from_secs(2));
    }
}
