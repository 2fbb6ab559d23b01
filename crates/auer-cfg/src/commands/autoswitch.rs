use auer_core::Pbx;
use tracing::debug;

use crate::cli::GlobalOpts;
use crate::error::CliError;

use super::show;

/// Enable or disable automatic switching, then show the result.
pub async fn handle(pbx: &Pbx, enabled: bool, global: &GlobalOpts) -> Result<(), CliError> {
    let outcome = if enabled {
        pbx.enable_autoswitch().await?
    } else {
        pbx.disable_autoswitch().await?
    };
    debug!(enabled, %outcome, "autoswitch command finished");

    show::handle(pbx, global).await
}
