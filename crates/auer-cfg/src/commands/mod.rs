//! Command dispatch: bridges CLI args -> core actions -> output formatting.

pub mod autoswitch;
pub mod select;
pub mod show;
pub mod times;

use auer_core::Pbx;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an appliance-bound command to its handler.
pub async fn dispatch(cmd: Command, pbx: &Pbx, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Show => show::handle(pbx, global).await,
        Command::Enable => autoswitch::handle(pbx, true, global).await,
        Command::Disable => autoswitch::handle(pbx, false, global).await,
        Command::Select(args) => {
            let number = args.number.ok_or(CliError::MissingNumber)?;
            select::handle(pbx, number, global).await
        }
        Command::Times => times::handle(pbx, global).await,
        Command::Completions(_) => Err(CliError::Internal(
            "completions are generated before connecting".into(),
        )),
    }
}
