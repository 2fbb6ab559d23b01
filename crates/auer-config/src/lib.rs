//! Configuration for auer-cfg.
//!
//! One flat YAML file (`auerswald.cfg.yaml`, next to the executable by
//! default), environment overrides (`AUER_CFG_<KEY>`), validation, and
//! translation to `auer_core::PbxConfig`. Core never reads files; this
//! crate is the only place that does.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::debug;

use auer_core::{PbxConfig, TlsVerification, TunnelConfig};

/// File name looked up next to the executable.
pub const CONFIG_FILE_NAME: &str = "auerswald.cfg.yaml";

/// Prefix of the environment variables overriding file keys.
pub const ENV_PREFIX: &str = "AUER_CFG_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("missing required key '{key}'")]
    Missing { key: &'static str },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── YAML config struct ──────────────────────────────────────────────

/// The configuration file, key for key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Appliance host name or IP address.
    #[serde(default, deserialize_with = "scalar_text")]
    pub auer_address: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub auer_admin_user: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub auer_admin_pass: Option<String>,

    /// Reach the appliance through an SSH jump host.
    #[serde(default)]
    pub ssh_tunnel: bool,
    #[serde(default, deserialize_with = "scalar_text")]
    pub ssh_host: Option<String>,
    #[serde(default = "default_ssh_port")]
    pub ssh_port: u16,
    #[serde(default, deserialize_with = "scalar_text")]
    pub ssh_user: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub ssh_pass: Option<String>,

    /// Verify the appliance certificate against the system CA store.
    #[serde(default)]
    pub ssl_verify: bool,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auer_address: None,
            auer_admin_user: None,
            auer_admin_pass: None,
            ssh_tunnel: false,
            ssh_host: None,
            ssh_port: default_ssh_port(),
            ssh_user: None,
            ssh_pass: None,
            ssl_verify: false,
            timeout: default_timeout(),
        }
    }
}

fn default_ssh_port() -> u16 {
    22
}
fn default_timeout() -> u64 {
    30
}

/// A YAML or environment scalar. Unquoted `4711` arrives as a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Bool(bool),
}

/// Read any scalar as text, so numeric passwords and user names load.
fn scalar_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(
        Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
            Scalar::Text(s) => s,
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Signed(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }),
    )
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path.
///
/// An explicit path wins. Otherwise `auerswald.cfg.yaml` next to the
/// executable, if it exists, then the platform config directory.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    if let Some(beside_exe) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME)))
        .filter(|p| p.is_file())
    {
        return beside_exe;
    }

    ProjectDirs::from("de", "auerswald", "auer-cfg").map_or_else(
        || PathBuf::from(CONFIG_FILE_NAME),
        |dirs| dirs.config_dir().join(CONFIG_FILE_NAME),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config file at `path`, then apply environment overrides.
///
/// The file must exist: running without one is a configuration error,
/// even if every key could come from the environment.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), "loading config");

    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Yaml::file(path))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()?;
    Ok(config)
}

// ── Translation ─────────────────────────────────────────────────────

impl Config {
    /// Validate presence of the required keys and build the runtime config.
    ///
    /// The SSH keys are required only when `ssh_tunnel` is set.
    pub fn to_pbx_config(&self) -> Result<PbxConfig, ConfigError> {
        let address = required(self.auer_address.as_deref(), "auer_address")?;
        let username = required(self.auer_admin_user.as_deref(), "auer_admin_user")?;
        let password = required(self.auer_admin_pass.as_deref(), "auer_admin_pass")?;

        if address.contains("://") {
            return Err(ConfigError::Validation {
                field: "auer_address".into(),
                reason: format!("expected a host name or IP address, got '{address}'"),
            });
        }

        let tunnel = if self.ssh_tunnel {
            Some(TunnelConfig {
                host: required(self.ssh_host.as_deref(), "ssh_host")?.to_owned(),
                port: self.ssh_port,
                username: required(self.ssh_user.as_deref(), "ssh_user")?.to_owned(),
                password: SecretString::from(required(self.ssh_pass.as_deref(), "ssh_pass")?.to_owned()),
            })
        } else {
            None
        };

        let mut config = PbxConfig::new(address, username, SecretString::from(password.to_owned()));
        config.tunnel = tunnel;
        config.tls = if self.ssl_verify {
            TlsVerification::SystemDefaults
        } else {
            TlsVerification::DangerAcceptInvalid
        };
        config.timeout = Duration::from_secs(self.timeout);
        Ok(config)
    }
}

fn required<'a>(value: Option<&'a str>, key: &'static str) -> Result<&'a str, ConfigError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing { key })
}
