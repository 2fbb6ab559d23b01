mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use auer_core::Session;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

/// Filter used by `--debug`: everything from the HTTP and SSH stacks.
const DEBUG_FILTER: &str = "trace,hyper=debug,h2=debug,rustls=debug";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(&cli.global);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(global: &GlobalOpts) {
    let filter = if global.debug {
        DEBUG_FILTER
    } else {
        match global.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(global.debug)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "auer-cfg", &mut std::io::stdout());
            Ok(())
        }

        // Usage failure, before touching config or network
        Command::Select(ref args) if args.number.is_none() => Err(CliError::MissingNumber),

        cmd => {
            let pbx_config = config::load_pbx_config(&cli.global)?;
            let session = Session::open(&pbx_config).await?;

            tracing::debug!(command = ?cmd, tunneled = session.is_tunneled(), "dispatching command");
            let result = commands::dispatch(cmd, session.pbx(), &cli.global).await;

            if let Err(e) = session.close().await {
                warn!("failed to close SSH tunnel: {e}");
            }
            result
        }
    }
}
