// ── Command actions ──
//
// Each action reads the current state, compares it with the desired one,
// and sends at most one write. An action that finds the appliance already
// in the desired state reports `Outcome::Unchanged` and sends nothing.

use tracing::{debug, info};

use auer_api::AutoswitchForm;

use crate::error::CoreError;
use crate::model::Outcome;
use crate::pbx::Pbx;

impl Pbx {
    /// Turn automatic configuration switching on.
    pub async fn enable_autoswitch(&self) -> Result<Outcome, CoreError> {
        self.set_autoswitch(true).await
    }

    /// Turn automatic configuration switching off.
    pub async fn disable_autoswitch(&self) -> Result<Outcome, CoreError> {
        self.set_autoswitch(false).await
    }

    /// The relay checkbox is always sent checked and the relay name is
    /// echoed back unchanged, so only `switchCfgCb` differs between the
    /// two directions.
    async fn set_autoswitch(&self, enabled: bool) -> Result<Outcome, CoreError> {
        let current = self.client().autoswitch_state().await?;
        if current.switch_cfg_cb.is_enabled() == enabled {
            debug!(enabled, raw = %current.switch_cfg_cb.raw(), "autoswitch already in desired state");
            return Ok(Outcome::Unchanged);
        }

        let form = AutoswitchForm {
            switch_cfg_cb: enabled,
            switch_sys_relais: true,
            switch_sys_relais_name: current.switch_sys_relais_name,
        };
        self.client().save_autoswitch(&form).await?;

        info!(enabled, "autoswitch updated");
        Ok(Outcome::Applied)
    }

    /// Activate the configuration whose identification number is `number`.
    ///
    /// After a switch the call waits for the settle delay so that a
    /// following state read sees the new profile.
    pub async fn select_configuration(&self, number: u32) -> Result<Outcome, CoreError> {
        let wanted = number.to_string();
        let configurations = self.configurations().await?;

        let Some(entry) = configurations
            .iter()
            .find(|entry| entry.number().as_deref() == Some(wanted.as_str()))
        else {
            return Err(CoreError::ConfigurationNotFound { number: wanted });
        };

        if entry.is_active() {
            debug!(number, "configuration already active");
            return Ok(Outcome::Unchanged);
        }

        self.client().set_config(&entry.id).await?;
        info!(number, config_id = %entry.id, "configuration activated");

        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }
        Ok(Outcome::Applied)
    }
}
