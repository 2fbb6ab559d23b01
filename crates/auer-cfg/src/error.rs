//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text. Every failure exits with status 1.

use miette::Diagnostic;
use thiserror::Error;

use auer_config::ConfigError;
use auer_core::CoreError;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Usage ────────────────────────────────────────────────────────
    #[error("The 'select' command requires a number")]
    #[diagnostic(
        code(auer_cfg::usage),
        help("Usage: auer-cfg select <NUMBER>\nRun: auer-cfg show to list the identification numbers")
    )]
    MissingNumber,

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration file not found")]
    #[diagnostic(
        code(auer_cfg::no_config),
        help(
            "Create auerswald.cfg.yaml next to the executable or pass --config <PATH>.\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Missing required key '{key}' in {path}")]
    #[diagnostic(
        code(auer_cfg::missing_key),
        help("Add '{key}' to the config file or set AUER_CFG_{env_key}.")
    )]
    MissingKey {
        key: String,
        env_key: String,
        path: String,
    },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(auer_cfg::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(auer_cfg::config))]
    Config(Box<figment::Error>),

    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to PBX at {url}")]
    #[diagnostic(
        code(auer_cfg::connection_failed),
        help("Check that auer_address is reachable.\nReason: {reason}")
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to {url} timed out")]
    #[diagnostic(
        code(auer_cfg::timeout),
        help("Increase 'timeout' in the config file or check the appliance.")
    )]
    Timeout { url: String },

    #[error("SSH tunnel failed: {reason}")]
    #[diagnostic(
        code(auer_cfg::tunnel),
        help("Check ssh_host, ssh_port, ssh_user and ssh_pass, or set ssh_tunnel: false.")
    )]
    Tunnel { reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(auer_cfg::auth_failed),
        help("Verify auer_admin_user and auer_admin_pass in the config file.")
    )]
    AuthFailed { message: String },

    // ── Lookup ───────────────────────────────────────────────────────
    #[error("Identifikationsnummer {number} not found")]
    #[diagnostic(
        code(auer_cfg::not_found),
        help("Run: auer-cfg show to list the available configurations")
    )]
    ConfigurationNotFound { number: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(auer_cfg::api_error))]
    ApiError { message: String },

    #[error("Internal error: {0}")]
    #[diagnostic(code(auer_cfg::internal))]
    Internal(String),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    #[diagnostic(code(auer_cfg::json))]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    #[diagnostic(code(auer_cfg::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    #[allow(clippy::unused_self)]
    pub fn exit_code(&self) -> i32 {
        exit_code::FAILURE
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl CliError {
    /// Attach the config file location to a loading or validation error.
    pub fn from_config(err: ConfigError, path: &std::path::Path) -> Self {
        match err {
            ConfigError::NotFound { path } => CliError::NoConfig {
                path: path.display().to_string(),
            },
            ConfigError::Missing { key } => CliError::MissingKey {
                key: key.into(),
                env_key: key.to_uppercase(),
                path: path.display().to_string(),
            },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Figment(e) => CliError::Config(e),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => {
                CliError::ConnectionFailed { url, reason }
            }
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::Timeout { url } => CliError::Timeout { url },
            CoreError::Tunnel { reason } => CliError::Tunnel { reason },
            CoreError::ConfigurationNotFound { number } => {
                CliError::ConfigurationNotFound { number }
            }
            CoreError::Api { message, status } => CliError::ApiError {
                message: match status {
                    Some(code) if !message.contains(&code.to_string()) => {
                        format!("{message} (HTTP {code})")
                    }
                    _ => message,
                },
            },
            CoreError::Config { message } => CliError::Validation {
                field: "auer_address".into(),
                reason: message,
            },
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn every_failure_exits_with_one() {
        let errors = [
            CliError::MissingNumber,
            CliError::ConfigurationNotFound {
                number: "99".into(),
            },
            CliError::Tunnel {
                reason: "refused".into(),
            },
            CliError::AuthFailed {
                message: "rejected".into(),
            },
        ];
        for err in errors {
            assert_eq!(err.exit_code(), exit_code::FAILURE, "{err}");
        }
    }

    #[test]
    fn not_found_names_the_number() {
        let err = CliError::from(CoreError::ConfigurationNotFound {
            number: "99".into(),
        });
        assert_eq!(err.to_string(), "Identifikationsnummer 99 not found");
    }

    #[test]
    fn missing_key_suggests_env_override() {
        let err = CliError::from_config(
            ConfigError::Missing { key: "ssh_pass" },
            Path::new("/opt/auer/auerswald.cfg.yaml"),
        );
        match err {
            CliError::MissingKey { env_key, path, .. } => {
                assert_eq!(env_key, "SSH_PASS");
                assert_eq!(path, "/opt/auer/auerswald.cfg.yaml");
            }
            other => panic!("expected MissingKey, got {other:?}"),
        }
    }
}
