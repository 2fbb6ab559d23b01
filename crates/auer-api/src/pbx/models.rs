// Wire types for the appliance's JSON state documents.
//
// The web UI backend is loosely typed: booleans arrive as `true`, `1` or
// `"1"` depending on firmware, identifiers as numbers or strings. These
// types accept all of them and expose normalized accessors.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ── Flag ────────────────────────────────────────────────────────────

/// A checkbox-style value whose wire encoding is firmware-dependent.
///
/// The raw value is kept; [`is_enabled()`](Self::is_enabled) decides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flag(Value);

impl Flag {
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    /// `true`, a non-zero number, or one of `"1"`, `"true"`, `"on"`, `"yes"`.
    pub fn is_enabled(&self) -> bool {
        match &self.0 {
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
            Value::String(s) => {
                let s = s.trim();
                ["1", "true", "on", "yes"]
                    .iter()
                    .any(|word| s.eq_ignore_ascii_case(word))
            }
            Value::Null | Value::Array(_) | Value::Object(_) => false,
        }
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }
}

// ── /tree, /about_state, /logstatus_state ───────────────────────────

/// Head of the menu tree: the first element of `/tree`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeHeader {
    /// Product name, e.g. "COMpact 5500R".
    pub pbx: String,
    /// Operator-assigned device name.
    #[serde(rename = "pbxEdit", default)]
    pub pbx_edit: String,
}

/// `/about_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct About {
    pub version: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub serial: String,
}

/// `/logstatus_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogStatus {
    /// Name of the logged-in administrative user.
    pub logstatus: String,
}

// ── /config_autoswitch_state ────────────────────────────────────────

/// Automatic configuration switching state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoswitchState {
    #[serde(rename = "switchCfgCb", default)]
    pub switch_cfg_cb: Flag,
    #[serde(rename = "switchSysRelais", default)]
    pub switch_sys_relais: Flag,
    #[serde(rename = "switchSysRelaisName", default)]
    pub switch_sys_relais_name: String,
}

/// Form body for `/config_autoswitch_save`.
///
/// The appliance treats these as HTML checkboxes: a present field is
/// checked, an absent one unchecked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoswitchForm {
    pub switch_cfg_cb: bool,
    pub switch_sys_relais: bool,
    pub switch_sys_relais_name: String,
}

impl AutoswitchForm {
    /// Encode as form pairs, omitting unchecked boxes.
    pub fn to_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(3);
        if self.switch_cfg_cb {
            pairs.push(("switchCfgCb", "switchCfgCb"));
        }
        if self.switch_sys_relais {
            pairs.push(("switchSysRelais", "switchSysRelais"));
        }
        pairs.push(("switchSysRelaisName", self.switch_sys_relais_name.as_str()));
        pairs
    }
}

// ── /configs_state ──────────────────────────────────────────────────

/// Server-assigned configuration id, used in `/configs_set?configId=`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ConfigId(String);

impl ConfigId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ConfigId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Self(s)),
            Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "expected string or number for config id, got {other}"
            ))),
        }
    }
}

/// Per-row UI metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default)]
    pub active: Flag,
}

/// One row of `/configs_state`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationEntry {
    pub id: ConfigId,
    /// `[display name, identification number, ...]`.
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub userdata: Option<UserData>,
}

impl ConfigurationEntry {
    /// Display name (`data[0]`).
    pub fn name(&self) -> Option<String> {
        self.data.first().and_then(scalar_text)
    }

    /// Identification number as text (`data[1]`).
    pub fn number(&self) -> Option<String> {
        self.data.get(1).and_then(scalar_text)
    }

    /// Whether `userdata.active` is set. A missing key means inactive.
    pub fn is_active(&self) -> bool {
        self.userdata.as_ref().is_some_and(|u| u.active.is_enabled())
    }
}

/// `/configs_state`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigList {
    #[serde(default)]
    pub rows: Vec<ConfigurationEntry>,
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn flag_truthiness_follows_wire_encodings() {
        for enabled in [json!(true), json!(1), json!("1"), json!("on"), json!("TRUE")] {
            assert!(Flag::new(enabled.clone()).is_enabled(), "{enabled} should be enabled");
        }
        for disabled in [json!(false), json!(0), json!("0"), json!(""), json!(null), json!("off")] {
            assert!(!Flag::new(disabled.clone()).is_enabled(), "{disabled} should be disabled");
        }
    }

    #[test]
    fn configuration_entry_accepts_numeric_fields() {
        let entry: ConfigurationEntry = serde_json::from_value(json!({
            "id": 7,
            "data": ["Urlaub", 30]
        }))
        .expect("entry should decode");

        assert_eq!(entry.id.as_str(), "7");
        assert_eq!(entry.name().as_deref(), Some("Urlaub"));
        assert_eq!(entry.number().as_deref(), Some("30"));
        assert!(!entry.is_active());
    }

    #[test]
    fn configuration_entry_reads_active_marker() {
        let entry: ConfigurationEntry = serde_json::from_value(json!({
            "id": "1",
            "data": ["Tag", "10"],
            "userdata": { "active": true }
        }))
        .expect("entry should decode");

        assert!(entry.is_active());
    }

    #[test]
    fn disabled_form_omits_the_autoswitch_box() {
        let form = AutoswitchForm {
            switch_cfg_cb: false,
            switch_sys_relais: true,
            switch_sys_relais_name: "Relais 1".into(),
        };
        assert_eq!(
            form.to_pairs(),
            vec![
                ("switchSysRelais", "switchSysRelais"),
                ("switchSysRelaisName", "Relais 1"),
            ]
        );
    }
}
