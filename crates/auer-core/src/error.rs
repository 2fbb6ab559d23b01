// ── Core error types ──
//
// User-facing errors from auer-core. Consumers never see HTTP status codes
// or JSON parse failures directly; the `From<auer_api::Error>` impl
// translates transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to PBX at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("SSH tunnel failed: {reason}")]
    Tunnel { reason: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Identifikationsnummer {number} not found")]
    ConfigurationNotFound { number: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<auer_api::Error> for CoreError {
    fn from(err: auer_api::Error) -> Self {
        match err {
            auer_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            auer_api::Error::DigestChallenge(reason) => CoreError::AuthenticationFailed {
                message: format!("digest handshake failed: {reason}"),
            },
            auer_api::Error::Transport(ref e) => {
                let url = e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string);
                if e.is_timeout() {
                    CoreError::Timeout { url }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url,
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            auer_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid appliance address: {e}"),
            },
            auer_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            auer_api::Error::Http { status, path, body } => CoreError::Api {
                message: if body.is_empty() {
                    format!("{path} returned HTTP {status}")
                } else {
                    format!("{path} returned HTTP {status}: {body}")
                },
                status: Some(status),
            },
            auer_api::Error::Tunnel(reason) => CoreError::Tunnel { reason },
            auer_api::Error::Io(e) => CoreError::Tunnel {
                reason: e.to_string(),
            },
            auer_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
            auer_api::Error::UnexpectedResponse { path, message } => CoreError::Api {
                message: format!("{path}: {message}"),
                status: None,
            },
        }
    }
}
