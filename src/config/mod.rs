//! Application configuration module
//!
//! Configuration is read from environment variables using the `config` and
//! `dotenvy` crates. Two groups of variables exist:
//!
//! - `CUSTOMGPT_*` - upstream credentials and base URL ([`Settings`])
//! - `ACE_*` - local server settings ([`ServerConfig`])
//!
//! # Example
//!
//! ```no_run
//! use ace_relay::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.bind_address());
//! ```

mod error;
mod server;
mod settings;

pub use error::{ConfigError, ValidationError};
pub use server::ServerConfig;
pub use settings::{Settings, SettingsProvider, DEFAULT_API_BASE};

/// Environment variables keyed by name, as passed to the `load_from` loaders.
pub type EnvVars = config::Map<String, String>;

/// Environment source for `prefix`, reading `vars` instead of the process
/// environment when given.
fn env_source(prefix: &str, vars: Option<EnvVars>) -> config::Environment {
    config::Environment::with_prefix(prefix).source(vars)
}

/// Root application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Local server configuration (bind address, logging, timeouts)
    pub server: ServerConfig,

    /// Upstream API settings
    pub settings: Settings,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` first if present (development), then reads both the
    /// `ACE_*` and `CUSTOMGPT_*` variable groups.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the API key is missing or a value cannot be
    /// parsed into its expected type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::load()?,
            settings: Settings::load()?,
        })
    }

    /// Load configuration from an explicit variable map.
    pub fn load_from(vars: EnvVars) -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::load_from(vars.clone())?,
            settings: Settings::load_from(vars)?,
        })
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.settings.validate()?;
        Ok(())
    }
}
