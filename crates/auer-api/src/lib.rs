// auer-api: Async client for the Auerswald PBX web management API

pub mod digest;
pub mod error;
pub mod pbx;
pub mod transport;
pub mod tunnel;

pub use digest::DigestCredentials;
pub use error::Error;
pub use pbx::PbxClient;
pub use pbx::models::{
    About, AutoswitchForm, AutoswitchState, ConfigId, ConfigList, ConfigurationEntry, Flag,
    LogStatus, TreeHeader, UserData,
};
pub use transport::{PbxEndpoint, TlsMode, Transport, TransportConfig};
pub use tunnel::{SshSettings, SshTunnel};
