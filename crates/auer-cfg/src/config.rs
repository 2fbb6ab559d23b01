//! CLI-side config resolution: `--config` / `AUER_CFG_CONFIG`, then the
//! file next to the executable, then the platform config directory.

use auer_core::PbxConfig;
use tracing::debug;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Load, validate, and translate the config file for this invocation.
pub fn load_pbx_config(global: &GlobalOpts) -> Result<PbxConfig, CliError> {
    let path = auer_config::config_path(global.config.as_deref());
    debug!(path = %path.display(), "resolved config path");

    auer_config::load_config(&path)
        .and_then(|cfg| cfg.to_pbx_config())
        .map_err(|e| CliError::from_config(e, &path))
}
