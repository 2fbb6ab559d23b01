// SSH local port forward to the appliance's HTTPS port.
//
// A loopback listener on an OS-assigned port. Every accepted connection is
// relayed through its own `direct-tcpip` channel of a single SSH session.
// The acceptor task owns the session and disconnects it on cancellation.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use russh::client;
use russh::keys::PublicKey;
use russh::Disconnect;
use secrecy::{ExposeSecret, SecretString};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::error::Error;

/// SSH jump host the tunnel is opened through.
#[derive(Debug, Clone)]
pub struct SshSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
}

/// Client-side handler: host keys are not pinned.
struct TunnelClient;

impl client::Handler for TunnelClient {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        _server_public_key: &PublicKey,
    ) -> Result<bool, Self::Error> {
        debug!("accepting SSH host key");
        Ok(true)
    }
}

#[derive(Debug, Clone)]
struct ForwardTarget {
    host: String,
    port: u16,
}

/// A running local port forward.
///
/// Dropping the handle without [`close()`](Self::close) leaves the forward
/// running until the runtime shuts down.
pub struct SshTunnel {
    local_port: u16,
    cancel: CancellationToken,
    acceptor: JoinHandle<Result<(), Error>>,
}

impl SshTunnel {
    /// Connect to the jump host and start forwarding
    /// `127.0.0.1:<local_port>` to `remote_host:remote_port`.
    pub async fn open(
        settings: &SshSettings,
        remote_host: &str,
        remote_port: u16,
    ) -> Result<Self, Error> {
        debug!(host = %settings.host, port = settings.port, "connecting SSH tunnel");

        let config = Arc::new(client::Config::default());
        let mut session =
            client::connect(config, (settings.host.as_str(), settings.port), TunnelClient).await?;

        let auth = session
            .authenticate_password(
                settings.username.as_str(),
                settings.password.expose_secret(),
            )
            .await?;
        if !auth.success() {
            return Err(Error::Tunnel(format!(
                "SSH password authentication failed for user '{}' at {}:{}",
                settings.username, settings.host, settings.port
            )));
        }

        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        let local_port = listener.local_addr()?.port();

        let cancel = CancellationToken::new();
        let target = ForwardTarget {
            host: remote_host.to_owned(),
            port: remote_port,
        };
        let acceptor = tokio::spawn(accept_loop(listener, session, target, cancel.clone()));

        info!(local_port, remote_host, remote_port, "SSH tunnel established");

        Ok(Self {
            local_port,
            cancel,
            acceptor,
        })
    }

    /// The loopback port requests should be sent to.
    pub fn local_port(&self) -> u16 {
        self.local_port
    }

    /// Stop accepting, abort open relays, and disconnect the SSH session.
    pub async fn close(self) -> Result<(), Error> {
        self.cancel.cancel();
        let result = match self.acceptor.await {
            Ok(result) => result,
            Err(e) => Err(Error::Tunnel(format!("tunnel task failed: {e}"))),
        };
        debug!("SSH tunnel closed");
        result
    }
}

async fn accept_loop(
    listener: TcpListener,
    session: client::Handle<TunnelClient>,
    target: ForwardTarget,
    cancel: CancellationToken,
) -> Result<(), Error> {
    loop {
        let (socket, peer) = tokio::select! {
            () = cancel.cancelled() => break,
            accepted = listener.accept() => match accepted {
                Ok(pair) => pair,
                Err(e) => {
                    warn!("tunnel listener accept failed: {e}");
                    continue;
                }
            },
        };

        let channel = session
            .channel_open_direct_tcpip(
                target.host.as_str(),
                u32::from(target.port),
                peer.ip().to_string(),
                u32::from(peer.port()),
            )
            .await;

        match channel {
            Ok(channel) => {
                trace!(%peer, "forwarding channel opened");
                tokio::spawn(relay(socket, channel.into_stream(), peer, cancel.clone()));
            }
            Err(e) => warn!(%peer, "could not open forwarding channel: {e}"),
        }
    }

    session
        .disconnect(Disconnect::ByApplication, "", "en")
        .await?;
    Ok(())
}

async fn relay<S>(mut socket: TcpStream, mut remote: S, peer: SocketAddr, cancel: CancellationToken)
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    tokio::select! {
        () = cancel.cancelled() => trace!(%peer, "relay cancelled"),
        copied = tokio::io::copy_bidirectional(&mut socket, &mut remote) => match copied {
            Ok((sent, received)) => trace!(%peer, sent, received, "relay finished"),
            Err(e) => warn!(%peer, "tunnel relay failed: {e}"),
        },
    }
}
