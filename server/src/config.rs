//! Server configuration parsed from environment variables.
//!
//! `.env` is loaded by `main` before this runs, so values there behave like
//! real environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use client::config::{API_ENV_VAR, ClientConfig, WS_ENV_VAR};

pub const DEFAULT_PORT: u16 = 3000;
pub const PORT_ENV_VAR: &str = "PORT";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} is not a port number")]
    InvalidPort { var: &'static str, value: String },
}

/// Everything the dashboard host needs at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Backend endpoints rendered into the HTML shell for the browser.
    pub client: ClientConfig,
}

impl ServerConfig {
    /// Build from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `PARKING_API_BASE_URL`: REST base of the parking backend
    /// - `PARKING_WS_URL`: relay endpoint
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] when `PORT` is set but not a `u16`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] when the port value does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup(PORT_ENV_VAR).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty()) {
            None => DEFAULT_PORT,
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { var: PORT_ENV_VAR, value: raw })?,
        };
        let client = ClientConfig::from_values(lookup(API_ENV_VAR), lookup(WS_ENV_VAR));
        Ok(Self { port, client })
    }
}
