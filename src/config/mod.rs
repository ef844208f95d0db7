use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::utils::error::{AppError, AppResult};

const DEFAULT_DB_NAME: &str = "event_booking";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Server-style settings the embedded engine has no use for.
const UNUSED_SERVER_KEYS: [&str; 3] = ["DB_HOST", "DB_USER", "DB_PASSWORD"];

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub busy_timeout: Duration,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in UNUSED_SERVER_KEYS {
            if lookup(key).is_some() {
                tracing::debug!(key, "Ignoring setting not used by the SQLite backend");
            }
        }

        let database_url = match lookup("DATABASE_URL") {
            Some(url) if !url.trim().is_empty() => url,
            _ => {
                let name = lookup("DB_NAME")
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_DB_NAME.to_string());
                format!("sqlite://{}.db", name.trim())
            }
        };

        let max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        if max_connections == 0 {
            return Err(AppError::ConfigError(
                "DB_MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }
        let busy_timeout_ms = parse_or(&lookup, "DB_BUSY_TIMEOUT_MS", DEFAULT_BUSY_TIMEOUT_MS)?;

        Ok(Self {
            database_url,
            max_connections,
            busy_timeout: Duration::from_millis(busy_timeout_ms),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::ConfigError(format!("Invalid {key} '{raw}': {e}"))),
        None => Ok(default),
    }
}
