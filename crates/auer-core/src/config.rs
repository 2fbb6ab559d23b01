// ── Runtime connection configuration ──
//
// These types describe *how* to reach one appliance. They carry credential
// data and connection tuning, but never touch disk. The CLI constructs a
// `PbxConfig` once at startup and hands it in.

use std::time::Duration;

use secrecy::SecretString;

use auer_api::{DigestCredentials, SshSettings, TlsMode, TransportConfig};

/// Port the appliance serves its web UI on; the tunnel always targets it.
pub const APPLIANCE_HTTPS_PORT: u16 = 443;

/// TLS verification strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Skip verification. The appliance ships a self-signed certificate.
    #[default]
    DangerAcceptInvalid,
}

/// SSH jump host used to reach an appliance that is not directly routable.
#[derive(Debug, Clone)]
pub struct TunnelConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
}

/// Everything needed to talk to one appliance.
///
/// Built by the CLI, passed to [`Session::open`](crate::Session::open);
/// core never reads config files.
#[derive(Debug, Clone)]
pub struct PbxConfig {
    /// Appliance host name or IP address.
    pub address: String,
    /// Web UI admin user.
    pub username: String,
    pub password: SecretString,
    /// Route through an SSH tunnel when set.
    pub tunnel: Option<TunnelConfig>,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl PbxConfig {
    pub fn new(address: impl Into<String>, username: impl Into<String>, password: SecretString) -> Self {
        Self {
            address: address.into(),
            username: username.into(),
            password,
            tunnel: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    pub(crate) fn credentials(&self) -> DigestCredentials {
        DigestCredentials::new(self.username.clone(), self.password.clone())
    }

    pub(crate) fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            tls: match self.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
        }
    }
}

impl TunnelConfig {
    pub(crate) fn ssh_settings(&self) -> SshSettings {
        SshSettings {
            host: self.host.clone(),
            port: self.port,
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}
