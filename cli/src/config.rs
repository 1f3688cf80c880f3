//! Runtime configuration from the environment, overridden by flags.
//!
//! | variable | values | default |
//! |---|---|---|
//! | `TASKFLOW_SEED` | path to a seed JSON file | built-in dataset |
//! | `TASKFLOW_LATENCY` | `simulated` \| `instant` | `simulated` |
//! | `TASKFLOW_WEEK_START` | `sunday` \| `monday` | `sunday` |

use std::path::PathBuf;

use taskflow_core::{StoreError, WeekStart};
use taskflow_store::LatencyProfile;
use thiserror::Error;

use crate::cli::Cli;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}: {source}")]
    Invalid {
        var: &'static str,
        #[source]
        source: StoreError,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub seed_path: Option<PathBuf>,
    pub latency: LatencyProfile,
    pub week_start: WeekStart,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        if let Some(path) = lookup("TASKFLOW_SEED").filter(|p| !p.trim().is_empty()) {
            config.seed_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = lookup("TASKFLOW_LATENCY") {
            config.latency = raw.parse().map_err(|source| ConfigError::Invalid {
                var: "TASKFLOW_LATENCY",
                source,
            })?;
        }
        if let Some(raw) = lookup("TASKFLOW_WEEK_START") {
            config.week_start = raw.parse().map_err(|source| ConfigError::Invalid {
                var: "TASKFLOW_WEEK_START",
                source,
            })?;
        }
        Ok(config)
    }

    /// Command-line flags take precedence over the environment.
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(seed) = &cli.seed {
            self.seed_path = Some(seed.clone());
        }
        if cli.instant {
            self.latency = LatencyProfile::Instant;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.latency, LatencyProfile::Simulated);
    }

    #[test]
    fn reads_environment() {
        let config = Config::from_lookup(lookup(&[
            ("TASKFLOW_SEED", "/tmp/seed.json"),
            ("TASKFLOW_LATENCY", "instant"),
            ("TASKFLOW_WEEK_START", "monday"),
        ]))
        .unwrap();
        assert_eq!(config.seed_path, Some(PathBuf::from("/tmp/seed.json")));
        assert_eq!(config.latency, LatencyProfile::Instant);
        assert_eq!(config.week_start, WeekStart::Monday);
    }

    #[test]
    fn bad_value_names_the_variable() {
        let err = Config::from_lookup(lookup(&[("TASKFLOW_LATENCY", "warp")])).unwrap_err();
        assert!(err.to_string().contains("TASKFLOW_LATENCY"));
    }

    #[test]
    fn flags_override_environment() {
        let cli = Cli::parse_from(["taskflow", "--instant", "--seed", "/data/s.json", "summary"]);
        let config = Config::from_lookup(lookup(&[("TASKFLOW_SEED", "/tmp/seed.json")]))
            .unwrap()
            .merge_cli(&cli);
        assert_eq!(config.seed_path, Some(PathBuf::from("/data/s.json")));
        assert_eq!(config.latency, LatencyProfile::Instant);
    }
}
