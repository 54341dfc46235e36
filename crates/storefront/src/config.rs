//! Process configuration read from the environment.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `DATABASE_URL` | unset | Document store URL; unset runs the catalog in memory |
//! | `RPC_BUFFER` | `32` | Request channel capacity per service |
//! | `RPC_TIMEOUT_MS` | `5000` | Per-call deadline for inter-service calls |
//! | `BOOTSTRAP_RETRY_DELAY_MS` | `2000` | Pause between store connection attempts |
//! | `BOOTSTRAP_MAX_ATTEMPTS` | `0` | Connection attempts before giving up; `0` retries forever |

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a non-negative integer, got {value:?}")]
    NotANumber { name: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Fixed-delay retry for the one-off store connection at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
    /// `None` keeps trying until the store answers.
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(2),
            max_attempts: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    pub database_url: Option<String>,
    pub rpc_buffer: usize,
    pub rpc_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            rpc_buffer: 32,
            rpc_timeout: Duration::from_millis(5000),
            retry: RetryPolicy::default(),
        }
    }
}

fn parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::NotANumber { name, value }),
    }
}

impl StorefrontConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let rpc_buffer = parse(&lookup, "RPC_BUFFER", defaults.rpc_buffer)?;
        if rpc_buffer == 0 {
            return Err(ConfigError::Zero("RPC_BUFFER"));
        }
        let timeout_ms = parse(&lookup, "RPC_TIMEOUT_MS", 5000u64)?;
        if timeout_ms == 0 {
            return Err(ConfigError::Zero("RPC_TIMEOUT_MS"));
        }
        let delay_ms = parse(&lookup, "BOOTSTRAP_RETRY_DELAY_MS", 2000u64)?;
        let max_attempts = parse(&lookup, "BOOTSTRAP_MAX_ATTEMPTS", 0u32)?;

        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            rpc_buffer,
            rpc_timeout: Duration::from_millis(timeout_ms),
            retry: RetryPolicy {
                delay: Duration::from_millis(delay_ms),
                max_attempts: (max_attempts > 0).then_some(max_attempts),
            },
        })
    }
}
