// Read-only state documents
//
// `GET /tree`, `/about_state`, `/logstatus_state`,
// `/config_autoswitch_state`, `/configs_state`, `/configs_switchtimes_state`.

use tracing::debug;

use crate::error::Error;
use crate::pbx::client::PbxClient;
use crate::pbx::models::{About, AutoswitchState, ConfigList, LogStatus, TreeHeader};

impl PbxClient {
    /// Fetch the full menu tree.
    ///
    /// `GET /tree`
    ///
    /// Returns loosely-typed JSON; only the first node carries identity
    /// fields, see [`tree_header()`](Self::tree_header).
    pub async fn menu_tree(&self) -> Result<Vec<serde_json::Value>, Error> {
        debug!("fetching menu tree");
        self.transport().fetch_json("/tree").await
    }

    /// Product and device name from the first menu tree node.
    ///
    /// `GET /tree`
    pub async fn tree_header(&self) -> Result<TreeHeader, Error> {
        let mut tree = self.menu_tree().await?;
        if tree.is_empty() {
            return Err(Error::UnexpectedResponse {
                path: "/tree".into(),
                message: "menu tree is empty".into(),
            });
        }
        let head = tree.swap_remove(0);
        serde_json::from_value(head).map_err(|e| Error::UnexpectedResponse {
            path: "/tree".into(),
            message: format!("first node lacks product fields: {e}"),
        })
    }

    /// Firmware version, build date, and serial number.
    ///
    /// `GET /about_state`
    pub async fn about(&self) -> Result<About, Error> {
        debug!("fetching about state");
        self.transport().fetch_json("/about_state").await
    }

    /// The administrative user of the current session.
    ///
    /// `GET /logstatus_state`
    pub async fn logstatus(&self) -> Result<LogStatus, Error> {
        debug!("fetching login status");
        self.transport().fetch_json("/logstatus_state").await
    }

    /// Automatic configuration switching state.
    ///
    /// `GET /config_autoswitch_state`
    pub async fn autoswitch_state(&self) -> Result<AutoswitchState, Error> {
        debug!("fetching autoswitch state");
        self.transport().fetch_json("/config_autoswitch_state").await
    }

    /// All configuration profiles in server order.
    ///
    /// `GET /configs_state`
    pub async fn configs(&self) -> Result<ConfigList, Error> {
        debug!("fetching configuration list");
        self.transport().fetch_json("/configs_state").await
    }

    /// The switch-time schedule.
    ///
    /// `GET /configs_switchtimes_state`
    ///
    /// Returned as raw JSON; its layout varies with the firmware.
    pub async fn switch_times(&self) -> Result<serde_json::Value, Error> {
        debug!("fetching switch times");
        self.transport().fetch_json("/configs_switchtimes_state").await
    }
}
