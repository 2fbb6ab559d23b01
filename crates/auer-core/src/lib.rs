//! Business logic between `auer-api` and the `auer-cfg` binary.
//!
//! - **[`Session`]**: opens the optional SSH tunnel, resolves the request
//!   endpoint, and owns the one [`Pbx`] of an invocation.
//! - **[`Pbx`]**: query adapter with lazily cached identity accessors and
//!   always-fresh live state.
//! - **Command actions** ([`Pbx::enable_autoswitch`],
//!   [`Pbx::disable_autoswitch`], [`Pbx::select_configuration`]): read,
//!   compare, write at most once.
//! - **Domain model** ([`model`]): the serializable [`Overview`] every
//!   presentation renders.

mod actions;
pub mod config;
pub mod error;
pub mod model;
pub mod pbx;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{APPLIANCE_HTTPS_PORT, PbxConfig, TlsVerification, TunnelConfig};
pub use error::CoreError;
pub use model::{AutoswitchStatus, Configuration, Outcome, Overview, PbxIdentity};
pub use pbx::{Pbx, SETTLE_DELAY};
pub use session::Session;
