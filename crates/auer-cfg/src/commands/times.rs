use auer_core::Pbx;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Print the switch-time schedule as the appliance reports it.
pub async fn handle(pbx: &Pbx, global: &GlobalOpts) -> Result<(), CliError> {
    let schedule = pbx.switch_times().await?;
    let rendered = output::render_value(global.output, &schedule)?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
