//! Process configuration read from the environment.

use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use pizzeria_observability::LogFormat;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_RECIPE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}={value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Base URL of the recipe service. `None` serves from an empty in-memory book.
    pub recipe_service_url: Option<String>,
    pub recipe_timeout: Duration,
    pub log_format: LogFormat,
    /// Only honoured when built with the `postgres` feature.
    pub database_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_addr = match get("BIND_ADDR") {
            Some(raw) => parse_var("BIND_ADDR", &raw)?,
            None => SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
        };

        let recipe_timeout = match get("RECIPE_TIMEOUT_SECS") {
            Some(raw) => match parse_var::<u64>("RECIPE_TIMEOUT_SECS", &raw)? {
                0 => {
                    return Err(ConfigError::Invalid {
                        var: "RECIPE_TIMEOUT_SECS",
                        value: raw,
                        reason: "must be at least 1".to_string(),
                    });
                }
                secs => Duration::from_secs(secs),
            },
            None => Duration::from_secs(DEFAULT_RECIPE_TIMEOUT_SECS),
        };

        let log_format = match get("LOG_FORMAT") {
            Some(raw) => parse_var("LOG_FORMAT", &raw)?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            recipe_service_url: get("RECIPE_SERVICE_URL").map(|v| v.trim().to_string()),
            recipe_timeout,
            log_format,
            database_url: get("DATABASE_URL"),
        })
    }
}

fn parse_var<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
