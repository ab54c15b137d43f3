//! Command line entry points: `serve` and `config`.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use thiserror::Error;

use crate::adapters::http::{api_router, ConversationAppState};
use crate::adapters::CustomGptClient;
use crate::config::{AppConfig, ConfigError, Settings, SettingsProvider, ValidationError};
use crate::logging::{self, LoggingError};
use crate::ports::UpstreamError;

/// A.C.E relay service.
#[derive(Parser, Debug)]
#[command(name = "ace-relay", about = "Relay between the orchestrator and CustomGPT")]
pub struct Cli {
    /// Subcommand to execute (defaults to `serve`).
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP service.
    Serve,
    /// Inspect upstream configuration.
    Config(ConfigArgs),
}

/// Flags for `ace-relay config`.
#[derive(Args, Debug, PartialEq, Eq)]
pub struct ConfigArgs {
    /// Validate settings and report problems (the default).
    #[arg(long, conflicts_with = "show")]
    pub check: bool,

    /// Print settings as JSON with the API key masked.
    #[arg(long)]
    pub show: bool,
}

/// Fatal errors while starting or running the server.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error("Failed to create upstream client: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Cli {
    /// Run the selected command and return the process exit code.
    pub async fn run(self) -> ExitCode {
        match self.command.unwrap_or(Command::Serve) {
            Command::Serve => match serve().await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("{}", e);
                    ExitCode::FAILURE
                }
            },
            Command::Config(args) => {
                let provider = SettingsProvider::from_env();
                let (code, out, err) = run_config(&args, provider.get().map(|s| (*s).clone()));
                if !out.is_empty() {
                    println!("{}", out);
                }
                if !err.is_empty() {
                    eprintln!("{}", err);
                }
                ExitCode::from(code)
            }
        }
    }
}

/// Problems that make `settings` unusable; empty when they are fine.
pub fn check_settings(settings: &Result<Settings, ConfigError>) -> Vec<String> {
    match settings {
        Ok(settings) => settings.problems().iter().map(ToString::to_string).collect(),
        Err(e) => vec![e.to_string()],
    }
}

/// Settings as displayable JSON, with the API key masked.
pub fn show_settings(settings: &Settings) -> Value {
    json!({
        "customgpt_api_key": settings.masked_api_key(),
        "customgpt_api_base": settings.api_base(),
        "service_base_url": settings.service_base_url(),
    })
}

/// Evaluate `config` flags. Returns `(exit code, stdout, stderr)`.
pub fn run_config(
    args: &ConfigArgs,
    settings: Result<Settings, ConfigError>,
) -> (u8, String, String) {
    if args.show {
        return match settings {
            Ok(ref s) => match serde_json::to_string_pretty(&show_settings(s)) {
                Ok(out) => (0, out, String::new()),
                Err(e) => (1, String::new(), e.to_string()),
            },
            Err(_) => (1, String::new(), check_settings(&settings).join("\n")),
        };
    }

    let problems = check_settings(&settings);
    if problems.is_empty() {
        (0, "Configuration looks good.".to_string(), String::new())
    } else {
        (1, String::new(), problems.join("\n"))
    }
}

/// Load configuration, then serve HTTP until Ctrl-C.
pub async fn serve() -> Result<(), ServeError> {
    let config = AppConfig::load()?;
    config.validate()?;
    logging::init(&config.server.log_level)?;

    let client = CustomGptClient::new(&config.settings, config.server.request_timeout())?;
    let app = api_router(ConversationAppState::new(Arc::new(client)));

    let listener = tokio::net::TcpListener::bind(config.server.bind_address()).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        upstream = config.settings.api_base(),
        "ace-relay listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("ace-relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_API_BASE;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn no_subcommand_means_serve() {
        assert_eq!(parse(&["ace-relay"]).command, None);
        assert_eq!(parse(&["ace-relay", "serve"]).command, Some(Command::Serve));
    }

    #[test]
    fn config_flags_parse() {
        let cli = parse(&["ace-relay", "config", "--show"]);
        assert_eq!(
            cli.command,
            Some(Command::Config(ConfigArgs {
                check: false,
                show: true
            }))
        );
    }

    #[test]
    fn check_and_show_conflict() {
        assert!(Cli::try_parse_from(["ace-relay", "config", "--check", "--show"]).is_err());
    }

    #[test]
    fn check_success() {
        let settings = Settings::new("secret-value", DEFAULT_API_BASE);
        let args = ConfigArgs {
            check: true,
            show: false,
        };
        let (code, out, err) = run_config(&args, settings.map_err(ConfigError::from));

        assert_eq!(code, 0);
        assert!(out.contains("Configuration looks good."));
        assert!(err.is_empty());
    }

    #[test]
    fn check_failure_for_missing_key() {
        let settings = Settings::load_from(Default::default());
        let args = ConfigArgs {
            check: true,
            show: false,
        };
        let (code, out, err) = run_config(&args, settings);

        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert!(err.contains("CUSTOMGPT_API_KEY environment variable is required"));
    }

    #[test]
    fn check_settings_reports_load_error_once() {
        let problems = check_settings(&Settings::load_from(Default::default()));

        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("CUSTOMGPT_API_KEY environment variable is required"));
    }

    #[test]
    fn check_failure_for_bad_url() {
        let settings = Settings::new("key", "not-a-url").map_err(ConfigError::from);
        let (code, _, err) = run_config(
            &ConfigArgs {
                check: true,
                show: false,
            },
            settings,
        );

        assert_eq!(code, 1);
        assert!(err.contains("CUSTOMGPT_API_BASE"));
    }

    #[test]
    fn show_masks_api_key() {
        let settings =
            Settings::new("abcd1234efgh", "https://example.com/api").map_err(ConfigError::from);
        let (code, out, _) = run_config(
            &ConfigArgs {
                check: false,
                show: true,
            },
            settings,
        );

        assert_eq!(code, 0);
        let payload: Value = serde_json::from_str(&out).unwrap();
        let key = payload["customgpt_api_key"].as_str().unwrap();
        assert!(key.starts_with("abcd"));
        assert!(key.ends_with("efgh"));
        assert!(!key.contains("1234"));
        assert_eq!(payload["customgpt_api_base"], "https://example.com/api");
    }

    #[test]
    fn show_fails_without_settings() {
        let (code, out, err) = run_config(
            &ConfigArgs {
                check: false,
                show: true,
            },
            Settings::load_from(Default::default()),
        );

        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert!(!err.is_empty());
    }
}
