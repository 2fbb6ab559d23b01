#![allow(clippy::unwrap_used)]
// Session lifecycle: route selection and tunnel setup failures.

use auer_core::{CoreError, PbxConfig, Session, TunnelConfig};

fn config(address: &str) -> PbxConfig {
    PbxConfig::new(address, "admin", "secret".to_string().into())
}

#[tokio::test]
async fn test_direct_session_opens_without_tunnel() {
    let session = Session::open(&config("pbx.example.lan")).await.unwrap();

    assert!(!session.is_tunneled());
    session.close().await.unwrap();
}

#[tokio::test]
async fn test_unreachable_ssh_host_is_tunnel_error() {
    let mut cfg = config("10.0.0.2");
    // Port 1 on loopback refuses connections.
    cfg.tunnel = Some(TunnelConfig {
        host: "127.0.0.1".into(),
        port: 1,
        username: "ops".into(),
        password: "x".to_string().into(),
    });

    match Session::open(&cfg).await {
        Err(CoreError::Tunnel { reason }) => {
            assert!(reason.contains("127.0.0.1:1"), "unexpected reason: {reason}");
        }
        Err(other) => panic!("expected Tunnel error, got: {other:?}"),
        Ok(_) => panic!("expected Tunnel error, got an open session"),
    }
}
