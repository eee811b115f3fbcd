use std::env;
use std::str::FromStr;

use thiserror::Error;

/// Default seed for `kpl sample`.
pub const SEED_VAR: &str = "KPL_SEED";
/// Default sample count for `kpl sample`.
pub const SAMPLE_COUNT_VAR: &str = "KPL_SAMPLE_COUNT";
pub const DEFAULT_SAMPLE_COUNT: usize = 1000;

/// A variable was set but could not be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Defaults for the CLI, read from the environment (and `.env` via `dotenv`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seed: Option<u64>,
    pub sample_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            sample_count: DEFAULT_SAMPLE_COUNT,
        }
    }
}

impl Config {
    /// Reads the process environment. Call `dotenv` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds a config from any variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var| lookup(var).filter(|v| !v.trim().is_empty());
        let seed = get(SEED_VAR)
            .map(|v| parse(SEED_VAR, &v, "an unsigned 64-bit integer"))
            .transpose()?;
        let sample_count = get(SAMPLE_COUNT_VAR)
            .map(|v| parse(SAMPLE_COUNT_VAR, &v, "a non-negative integer"))
            .transpose()?
            .unwrap_or(DEFAULT_SAMPLE_COUNT);
        Ok(Self { seed, sample_count })
    }
}

fn parse<T: FromStr>(
    var: &'static str,
    value: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value: value.to_string(),
        expected,
    })
}
