// ── Domain types ──
//
// Normalized views of the appliance's wire documents, as consumed by the
// presentation layer. All serializable for JSON / YAML output.

use std::fmt;

use serde::Serialize;

use auer_api::{AutoswitchState, ConfigurationEntry};

/// Identity of the appliance and the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PbxIdentity {
    /// Product name (`/tree`).
    pub product: String,
    /// Operator-assigned device name (`/tree`).
    pub name: String,
    /// Firmware version, whitespace trimmed (`/about_state`).
    pub firmware: String,
    /// Firmware build date (`/about_state`).
    pub date: String,
    pub serial: String,
    /// Logged-in administrative user (`/logstatus_state`).
    pub user: String,
}

/// Automatic configuration switching, as shown in the status panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutoswitchStatus {
    pub enabled: bool,
    /// Whether the system relay may trigger a switch.
    pub relay_enabled: bool,
    pub relay_name: String,
}

impl From<&AutoswitchState> for AutoswitchStatus {
    fn from(state: &AutoswitchState) -> Self {
        Self {
            enabled: state.switch_cfg_cb.is_enabled(),
            relay_enabled: state.switch_sys_relais.is_enabled(),
            relay_name: state.switch_sys_relais_name.clone(),
        }
    }
}

/// One configuration profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    /// Server-assigned id.
    pub id: String,
    pub name: String,
    /// Identification number, the operator-facing key.
    pub number: String,
    pub active: bool,
}

impl From<&ConfigurationEntry> for Configuration {
    fn from(entry: &ConfigurationEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            name: entry.name().unwrap_or_default(),
            number: entry.number().unwrap_or_default(),
            active: entry.is_active(),
        }
    }
}

/// Everything the `show` view renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overview {
    /// Appliance address as configured (not the tunnel endpoint).
    pub address: String,
    pub identity: PbxIdentity,
    pub autoswitch: AutoswitchStatus,
    /// In server order.
    pub configurations: Vec<Configuration>,
}

impl Overview {
    pub fn active_configuration(&self) -> Option<&Configuration> {
        self.configurations.iter().find(|c| c.active)
    }
}

/// Result of a command action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// One write was sent to the appliance.
    Applied,
    /// The appliance was already in the desired state; nothing was sent.
    Unchanged,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied => f.write_str("applied"),
            Self::Unchanged => f.write_str("unchanged"),
        }
    }
}
