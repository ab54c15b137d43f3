//! Upstream (CustomGPT) settings

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::sync::{Arc, RwLock};

use super::error::{ConfigError, ValidationError};
use super::{env_source, EnvVars};

/// Production base URL of the CustomGPT REST API.
pub const DEFAULT_API_BASE: &str = "https://app.customgpt.ai/api/v1";

const API_KEY_VAR: &str = "CUSTOMGPT_API_KEY";
const API_BASE_VAR: &str = "CUSTOMGPT_API_BASE";
const SERVICE_BASE_URL_VAR: &str = "ACE_SERVICE_BASE_URL";

/// Variables exactly as found in the environment, before precedence rules.
#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    customgpt_api_key: Option<String>,
    customgpt_api_base: Option<String>,
    /// Legacy name for `customgpt_api_base`.
    customgpt_base_url: Option<String>,
    ace_service_base_url: Option<String>,
}

/// Credentials and endpoints for the upstream API.
///
/// The API key is never empty once a `Settings` exists.
#[derive(Debug, Clone)]
pub struct Settings {
    api_key: Secret<String>,
    api_base: String,
    service_base_url: Option<String>,
}

impl Settings {
    /// Build settings directly. Fails if `api_key` is blank.
    pub fn new(
        api_key: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ValidationError::MissingRequired(API_KEY_VAR));
        }
        Ok(Self {
            api_key: Secret::new(api_key),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            service_base_url: None,
        })
    }

    /// Attach the informational local service URL.
    pub fn with_service_base_url(mut self, url: impl Into<String>) -> Self {
        self.service_base_url = Some(url.into());
        self
    }

    /// Load settings from the process environment (and `.env`, if present).
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::build(None)
    }

    /// Load settings from an explicit variable map.
    pub fn load_from(vars: EnvVars) -> Result<Self, ConfigError> {
        Self::build(Some(vars))
    }

    fn build(vars: Option<EnvVars>) -> Result<Self, ConfigError> {
        let raw: RawSettings = config::Config::builder()
            .add_source(env_source("CUSTOMGPT", vars.clone()).keep_prefix(true))
            .add_source(env_source("ACE", vars).keep_prefix(true))
            .build()?
            .try_deserialize()?;

        let api_key = raw.customgpt_api_key.unwrap_or_default();
        let api_base = raw
            .customgpt_api_base
            .or(raw.customgpt_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let mut settings = Self::new(api_key, api_base)?;
        settings.service_base_url = raw.ace_service_base_url;
        Ok(settings)
    }

    /// Exposes the API key (for building request headers).
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Upstream base URL without a trailing slash.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn service_base_url(&self) -> Option<&str> {
        self.service_base_url.as_deref()
    }

    /// API key safe for display: first and last four characters only.
    pub fn masked_api_key(&self) -> String {
        let key: Vec<char> = self.api_key().chars().collect();
        if key.len() <= 8 {
            return "*".repeat(key.len());
        }
        let head: String = key[..4].iter().collect();
        let tail: String = key[key.len() - 4..].iter().collect();
        format!("{}{}{}", head, "*".repeat(key.len() - 8), tail)
    }

    /// Every problem with these settings; empty when valid.
    pub fn problems(&self) -> Vec<ValidationError> {
        let mut problems = Vec::new();
        if !is_http_url(&self.api_base) {
            problems.push(ValidationError::InvalidUrl {
                variable: API_BASE_VAR,
                value: self.api_base.clone(),
            });
        }
        if let Some(url) = self.service_base_url.as_deref() {
            if !is_http_url(url) {
                problems.push(ValidationError::InvalidUrl {
                    variable: SERVICE_BASE_URL_VAR,
                    value: url.to_string(),
                });
            }
        }
        problems
    }

    /// Validate settings, returning the first problem found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.problems().into_iter().next() {
            Some(problem) => Err(problem),
            None => Ok(()),
        }
    }
}

fn is_http_url(value: &str) -> bool {
    reqwest::Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

type Loader = Box<dyn Fn() -> Result<Settings, ConfigError> + Send + Sync>;

/// Load-once cache for [`Settings`].
///
/// Constructed explicitly at startup and handed to whoever needs settings.
/// `clear` forces the next `get` to reload, which lets tests vary the source.
pub struct SettingsProvider {
    loader: Loader,
    cached: RwLock<Option<Arc<Settings>>>,
}

impl SettingsProvider {
    /// Provider backed by an arbitrary loader.
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> Result<Settings, ConfigError> + Send + Sync + 'static,
    {
        Self {
            loader: Box::new(loader),
            cached: RwLock::new(None),
        }
    }

    /// Provider that reads the process environment.
    pub fn from_env() -> Self {
        Self::new(Settings::load)
    }

    /// Return the cached settings, loading them on first use.
    pub fn get(&self) -> Result<Arc<Settings>, ConfigError> {
        if let Some(settings) = self
            .cached
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
        {
            return Ok(Arc::clone(settings));
        }

        let mut slot = self.cached.write().unwrap_or_else(|e| e.into_inner());
        if let Some(settings) = slot.as_ref() {
            return Ok(Arc::clone(settings));
        }
        let settings = Arc::new((self.loader)()?);
        *slot = Some(Arc::clone(&settings));
        Ok(settings)
    }

    /// Drop the cached value.
    pub fn clear(&self) {
        *self.cached.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}
