// PBX HTTP client
//
// Thin wrapper around `Transport`. Endpoint modules (state, settings) are
// implemented as inherent methods in separate files to keep this module
// focused on construction.

use url::Url;

use crate::digest::DigestCredentials;
use crate::error::Error;
use crate::transport::{PbxEndpoint, Transport, TransportConfig};

/// Raw client for the appliance's web management API.
///
/// Every method issues exactly one request. Nothing is cached here; the
/// caching of identity documents is the caller's concern.
pub struct PbxClient {
    transport: Transport,
}

impl PbxClient {
    /// Create a client for `endpoint`, building the HTTP client from `config`.
    pub fn new(
        endpoint: &PbxEndpoint,
        credentials: DigestCredentials,
        config: &TransportConfig,
    ) -> Result<Self, Error> {
        Ok(Self {
            transport: Transport::new(endpoint, credentials, config)?,
        })
    }

    /// Create a client against an explicit base URL.
    ///
    /// Unlike [`new()`](Self::new) the scheme is taken as given, so a plain
    /// `http://` root works too.
    pub fn with_base_url(
        base_url: Url,
        credentials: DigestCredentials,
        config: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = config.build_client()?;
        Ok(Self {
            transport: Transport::with_client(http, base_url, credentials),
        })
    }

    /// Create a client over an existing transport.
    pub fn with_transport(transport: Transport) -> Self {
        Self { transport }
    }

    /// The underlying transport (for requests without a typed wrapper).
    pub fn transport(&self) -> &Transport {
        &self.transport
    }
}
