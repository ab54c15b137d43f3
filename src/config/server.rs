//! Server configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::{ConfigError, ValidationError};
use super::{env_source, EnvVars};

/// Server configuration, read from `ACE_*` variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Tracing filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Timeout for each outbound upstream request, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(None)
    }

    /// Load from an explicit variable map instead of the process environment.
    pub fn load_from(vars: EnvVars) -> Result<Self, ConfigError> {
        Self::build(Some(vars))
    }

    fn build(vars: Option<EnvVars>) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(env_source("ACE", vars))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// `host:port` string suitable for binding a listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the outbound request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate server configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info,ace_relay=debug".to_string()
}

fn default_request_timeout() -> u64 {
    30
}
