// PBX endpoint client
//
// Typed wrappers over the web UI's JSON state documents (`*_state`) and
// the form endpoints that change them. Read endpoints live in `state`,
// write endpoints in `settings`.

pub mod client;
pub mod models;
pub mod settings;
pub mod state;

pub use client::PbxClient;
