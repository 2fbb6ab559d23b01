use thiserror::Error;

/// Top-level error type for the `auer-api` crate.
///
/// Covers every failure mode of talking to the appliance: Digest
/// authentication, HTTP transport, the SSH tunnel, and response decoding.
/// `auer-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The appliance rejected the Digest credentials.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The `WWW-Authenticate` challenge was missing or unparseable.
    #[error("Invalid digest challenge: {0}")]
    DigestChallenge(String),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Non-success HTTP status that is not an authentication failure.
    #[error("HTTP {status} from {path}")]
    Http {
        status: u16,
        path: String,
        body: String,
    },

    // ── Tunnel ──────────────────────────────────────────────────────
    /// SSH connection, authentication, or channel failure.
    #[error("SSH tunnel error: {0}")]
    Tunnel(String),

    /// Local socket error (tunnel listener).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// The response decoded but lacks data the caller relies on.
    #[error("Unexpected response from {path}: {message}")]
    UnexpectedResponse { path: String, message: String },
}

impl From<russh::Error> for Error {
    fn from(err: russh::Error) -> Self {
        Self::Tunnel(err.to_string())
    }
}

impl Error {
    /// Returns `true` if the appliance refused our credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::DigestChallenge(_))
    }

    /// Returns `true` if the appliance answered 404.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Http { status: 404, .. } => true,
            _ => false,
        }
    }
}
