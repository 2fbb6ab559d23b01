use auer_core::Pbx;
use tracing::debug;

use crate::cli::GlobalOpts;
use crate::error::CliError;

use super::show;

/// Activate configuration `number`, then show the result.
pub async fn handle(pbx: &Pbx, number: u32, global: &GlobalOpts) -> Result<(), CliError> {
    let outcome = pbx.select_configuration(number).await?;
    debug!(number, %outcome, "select command finished");

    show::handle(pbx, global).await
}
