// Mutating endpoints
//
// `POST /config_autoswitch_save` and `POST /configs_set`. Response bodies
// carry nothing the client needs; only the status is checked.

use tracing::debug;

use crate::error::Error;
use crate::pbx::client::PbxClient;
use crate::pbx::models::{AutoswitchForm, ConfigId};

impl PbxClient {
    /// Store the autoswitch checkboxes and relay binding.
    ///
    /// `POST /config_autoswitch_save` (form-encoded)
    pub async fn save_autoswitch(&self, form: &AutoswitchForm) -> Result<(), Error> {
        debug!(
            enabled = form.switch_cfg_cb,
            relay = %form.switch_sys_relais_name,
            "saving autoswitch state"
        );
        let pairs = form.to_pairs();
        self.transport()
            .send("/config_autoswitch_save", &[], Some(pairs.as_slice()))
            .await?;
        Ok(())
    }

    /// Activate a configuration profile by its server-assigned id.
    ///
    /// `POST /configs_set?configId={id}`
    pub async fn set_config(&self, id: &ConfigId) -> Result<(), Error> {
        debug!(config_id = %id, "activating configuration");
        self.transport()
            .send("/configs_set", &[("configId", id.as_str())], None)
            .await?;
        Ok(())
    }
}
