// ── PBX query adapter ──
//
// Typed read access to one appliance. The three identity documents
// (`/tree`, `/about_state`, `/logstatus_state`) are fetched on first use and
// cached for the lifetime of the adapter. Autoswitch state and the
// configuration list are always fetched fresh, since actions must see the
// latest value before deciding whether to write.

use std::time::Duration;

use tokio::sync::OnceCell;

use auer_api::{About, AutoswitchState, ConfigurationEntry, LogStatus, PbxClient, TreeHeader};

use crate::error::CoreError;
use crate::model::{AutoswitchStatus, Configuration, Overview, PbxIdentity};

/// Pause after activating a configuration before the next state read.
pub const SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Query adapter and command target for one appliance.
pub struct Pbx {
    client: PbxClient,
    address: String,
    pub(crate) settle_delay: Duration,
    tree: OnceCell<TreeHeader>,
    about: OnceCell<About>,
    logstatus: OnceCell<LogStatus>,
}

impl Pbx {
    /// Wrap a client. `address` is the configured appliance address, used
    /// for display only.
    pub fn new(client: PbxClient, address: impl Into<String>) -> Self {
        Self {
            client,
            address: address.into(),
            settle_delay: SETTLE_DELAY,
            tree: OnceCell::new(),
            about: OnceCell::new(),
            logstatus: OnceCell::new(),
        }
    }

    /// Override the pause that follows a configuration switch.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub(crate) fn client(&self) -> &PbxClient {
        &self.client
    }

    // ── Cached documents ─────────────────────────────────────────────

    async fn tree(&self) -> Result<&TreeHeader, CoreError> {
        Ok(self
            .tree
            .get_or_try_init(|| self.client.tree_header())
            .await?)
    }

    async fn about(&self) -> Result<&About, CoreError> {
        Ok(self.about.get_or_try_init(|| self.client.about()).await?)
    }

    async fn logstatus(&self) -> Result<&LogStatus, CoreError> {
        Ok(self
            .logstatus
            .get_or_try_init(|| self.client.logstatus())
            .await?)
    }

    // ── Identity accessors ───────────────────────────────────────────

    /// Product name, e.g. "COMpact 5500R".
    pub async fn product(&self) -> Result<&str, CoreError> {
        Ok(&self.tree().await?.pbx)
    }

    /// Operator-assigned device name.
    pub async fn name(&self) -> Result<&str, CoreError> {
        Ok(&self.tree().await?.pbx_edit)
    }

    /// Firmware version without surrounding whitespace.
    pub async fn firmware(&self) -> Result<&str, CoreError> {
        Ok(self.about().await?.version.trim())
    }

    /// Firmware build date.
    pub async fn date(&self) -> Result<&str, CoreError> {
        Ok(&self.about().await?.date)
    }

    pub async fn serial(&self) -> Result<&str, CoreError> {
        Ok(&self.about().await?.serial)
    }

    /// Administrative user of the current session.
    pub async fn user(&self) -> Result<&str, CoreError> {
        Ok(&self.logstatus().await?.logstatus)
    }

    pub async fn identity(&self) -> Result<PbxIdentity, CoreError> {
        Ok(PbxIdentity {
            product: self.product().await?.to_owned(),
            name: self.name().await?.to_owned(),
            firmware: self.firmware().await?.to_owned(),
            date: self.date().await?.to_owned(),
            serial: self.serial().await?.to_owned(),
            user: self.user().await?.to_owned(),
        })
    }

    // ── Live state ───────────────────────────────────────────────────

    /// Current autoswitch state, fetched fresh.
    pub async fn autoswitch_state(&self) -> Result<AutoswitchState, CoreError> {
        Ok(self.client.autoswitch_state().await?)
    }

    /// Configuration list in server order, fetched fresh.
    pub async fn configurations(&self) -> Result<Vec<ConfigurationEntry>, CoreError> {
        Ok(self.client.configs().await?.rows)
    }

    /// Raw switch-time schedule.
    pub async fn switch_times(&self) -> Result<serde_json::Value, CoreError> {
        Ok(self.client.switch_times().await?)
    }

    /// Identity, autoswitch state, and configuration list in one view.
    pub async fn overview(&self) -> Result<Overview, CoreError> {
        let identity = self.identity().await?;
        let autoswitch = AutoswitchStatus::from(&self.autoswitch_state().await?);
        let configurations = self
            .configurations()
            .await?
            .iter()
            .map(Configuration::from)
            .collect();

        Ok(Overview {
            address: self.address.clone(),
            identity,
            autoswitch,
            configurations,
        })
    }
}
