//! Runtime configuration from the command line and environment
//!
//! | Source | Meaning | Default |
//! |---|---|---|
//! | first argument, else `PARTICLE_DATA` | dataset path | `particle_data.py` |
//! | `PARTICLE_INTERVAL_MS` | milliseconds between frames | `10` |
//! | `PARTICLE_REPEAT` | `0`/`false`/`no`/`off` stops after the last frame | on |

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::core::{PlaybackOptions, DEFAULT_INTERVAL};

pub const DEFAULT_DATA_PATH: &str = "particle_data.py";

/// Tracing filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info,particle_anim=debug";

pub const ENV_DATA: &str = "PARTICLE_DATA";
pub const ENV_INTERVAL_MS: &str = "PARTICLE_INTERVAL_MS";
pub const ENV_REPEAT: &str = "PARTICLE_REPEAT";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("PARTICLE_INTERVAL_MS={0:?} is not a whole number of milliseconds")]
    Interval(String),
    #[error("PARTICLE_REPEAT={0:?} is not a boolean")]
    Repeat(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub data_path: PathBuf,
    pub interval: Duration,
    pub repeat: bool,
}

impl Config {
    pub fn from_env_and_args() -> Result<Self, ConfigError> {
        let config = Self::resolve(std::env::args().nth(1), |key| std::env::var(key).ok())?;
        info!(
            path = %config.data_path.display(),
            interval_ms = config.interval.as_millis() as u64,
            repeat = config.repeat,
            "Configuration resolved"
        );
        Ok(config)
    }

    /// Resolve from an optional path argument and an environment lookup
    pub fn resolve(
        arg: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let data_path: PathBuf = arg
            .or_else(|| env(ENV_DATA))
            .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string())
            .into();

        let interval = match env(ENV_INTERVAL_MS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::Interval(raw))?,
            None => DEFAULT_INTERVAL,
        };

        let repeat = match env(ENV_REPEAT) {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::Repeat(raw))?,
            None => true,
        };

        Ok(Self {
            data_path,
            interval,
            repeat,
        })
    }

    pub fn playback(&self) -> PlaybackOptions {
        PlaybackOptions {
            interval: self.interval,
            repeat: self.repeat,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::resolve(None, env(&[])).unwrap();
        assert_eq!(config.data_path, PathBuf::from("particle_data.py"));
        assert_eq!(config.interval, Duration::from_millis(10));
        assert!(config.repeat);
        assert_eq!(config.playback(), PlaybackOptions::default());
    }

    #[test]
    fn test_argument_overrides_env_path() {
        let vars = env(&[(ENV_DATA, "from_env.py")]);
        let config = Config::resolve(Some("frames.json".into()), vars).unwrap();
        assert_eq!(config.data_path, PathBuf::from("frames.json"));

        let config = Config::resolve(None, env(&[(ENV_DATA, "from_env.py")])).unwrap();
        assert_eq!(config.data_path, PathBuf::from("from_env.py"));
    }

    #[test]
    fn test_interval_and_repeat_from_env() {
        let vars = env(&[(ENV_INTERVAL_MS, "40"), (ENV_REPEAT, "off")]);
        let config = Config::resolve(None, vars).unwrap();
        assert_eq!(config.interval, Duration::from_millis(40));
        assert!(!config.repeat);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            Config::resolve(None, env(&[(ENV_INTERVAL_MS, "fast")])).unwrap_err(),
            ConfigError::Interval("fast".into())
        );
        assert_eq!(
            Config::resolve(None, env(&[(ENV_REPEAT, "maybe")])).unwrap_err(),
            ConfigError::Repeat("maybe".into())
        );
    }
}
