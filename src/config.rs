//! Service configuration loaded from environment variables.
//!
//! Every value has a default; unset variables are logged at `info`, and the
//! admin secret falling back to its hardcoded default is logged at `warn`.

use std::{env, fmt, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

use crate::record::DEFAULT_GAME_ID;
use crate::retention::DEFAULT_RETENTION_LIMIT;

/// Hardcoded admin secret used when `ADMIN_KEY` is unset. Not safe for deployment.
pub const FALLBACK_ADMIN_KEY: &str = "admin_secret_123";
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

const DEFAULT_PORT: &str = "3000";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Shared secret that unlocks the admin scan.
#[derive(Clone)]
pub struct AdminKey {
    secret: String,
    fallback: bool,
}

impl AdminKey {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            fallback: false,
        }
    }

    pub fn fallback() -> Self {
        Self {
            secret: FALLBACK_ADMIN_KEY.to_string(),
            fallback: true,
        }
    }

    /// Plain string equality against the configured secret.
    pub fn matches(&self, candidate: &str) -> bool {
        candidate == self.secret
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

impl fmt::Debug for AdminKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminKey")
            .field("secret", &"<redacted>")
            .field("fallback", &self.fallback)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bind_address: String,
    pub admin_key: AdminKey,
    pub retention_limit: usize,
    pub leaderboard_limit: usize,
    pub default_game_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            admin_key: AdminKey::fallback(),
            retention_limit: DEFAULT_RETENTION_LIMIT,
            leaderboard_limit: DEFAULT_LEADERBOARD_LIMIT,
            default_game_id: DEFAULT_GAME_ID.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any variable lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let retention_limit = try_load(&lookup, "RETENTION_LIMIT", "100")?;
        let leaderboard_limit = try_load(&lookup, "LEADERBOARD_LIMIT", "10")?;
        non_zero("RETENTION_LIMIT", retention_limit)?;
        non_zero("LEADERBOARD_LIMIT", leaderboard_limit)?;

        Ok(Self {
            port: try_load(&lookup, "RUST_PORT", DEFAULT_PORT)?,
            bind_address: try_load(&lookup, "BIND_ADDRESS", DEFAULT_BIND_ADDRESS)?,
            admin_key: load_admin_key(&lookup),
            retention_limit,
            leaderboard_limit,
            default_game_id: try_load(&lookup, "DEFAULT_GAME_ID", DEFAULT_GAME_ID)?,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

fn var<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.trim().is_empty())
}

fn try_load<T, F>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let value = var(lookup, key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}

fn non_zero(key: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn load_admin_key<F: Fn(&str) -> Option<String>>(lookup: &F) -> AdminKey {
    match var(lookup, "ADMIN_KEY") {
        Some(secret) => AdminKey::new(secret),
        None => {
            warn!("ADMIN_KEY not set, falling back to the built-in admin secret; set ADMIN_KEY before exposing this service");
            AdminKey::fallback()
        }
    }
}
