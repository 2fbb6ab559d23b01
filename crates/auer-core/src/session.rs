// ── Session lifecycle ──
//
// One invocation talks to one appliance over one route: directly, or
// through a single SSH tunnel opened here and closed in `close()`.

use tracing::{debug, warn};

use auer_api::{PbxClient, PbxEndpoint, SshTunnel};

use crate::config::{APPLIANCE_HTTPS_PORT, PbxConfig};
use crate::error::CoreError;
use crate::pbx::Pbx;

/// An open route to the appliance plus its query adapter.
pub struct Session {
    pbx: Pbx,
    tunnel: Option<SshTunnel>,
}

impl Session {
    /// Open the tunnel (if configured) and build the authenticated client.
    ///
    /// No request is sent yet; the first appliance request happens on the
    /// first [`Pbx`] call.
    pub async fn open(config: &PbxConfig) -> Result<Self, CoreError> {
        let tunnel = match &config.tunnel {
            Some(tunnel) => {
                let settings = tunnel.ssh_settings();
                let opened = SshTunnel::open(&settings, &config.address, APPLIANCE_HTTPS_PORT)
                    .await
                    .map_err(|e| CoreError::Tunnel {
                        reason: format!("{}:{}: {e}", tunnel.host, tunnel.port),
                    })?;
                Some(opened)
            }
            None => None,
        };

        let endpoint = match &tunnel {
            Some(t) => PbxEndpoint::Tunneled {
                local_port: t.local_port(),
            },
            None => PbxEndpoint::Direct {
                address: config.address.clone(),
            },
        };
        debug!(?endpoint, "session endpoint resolved");

        let client = match PbxClient::new(&endpoint, config.credentials(), &config.transport_config())
        {
            Ok(client) => client,
            Err(e) => {
                if let Some(t) = tunnel {
                    if let Err(close_err) = t.close().await {
                        warn!("failed to close SSH tunnel: {close_err}");
                    }
                }
                return Err(e.into());
            }
        };

        Ok(Self {
            pbx: Pbx::new(client, config.address.clone()),
            tunnel,
        })
    }

    pub fn pbx(&self) -> &Pbx {
        &self.pbx
    }

    pub fn is_tunneled(&self) -> bool {
        self.tunnel.is_some()
    }

    /// Tear down the tunnel, if any.
    pub async fn close(self) -> Result<(), CoreError> {
        if let Some(tunnel) = self.tunnel {
            tunnel.close().await?;
        }
        Ok(())
    }
}
