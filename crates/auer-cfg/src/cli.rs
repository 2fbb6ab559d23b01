//! Clap derive structures for the `auer-cfg` CLI.
//!
//! Also compiled by `build.rs` for man page generation, so this module may
//! only depend on `clap` and `clap_complete`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// auer-cfg -- manage the configuration templates of an Auerswald PBX
#[derive(Debug, Parser)]
#[command(
    name = "auer-cfg",
    version,
    about = "Manage the Auerswald PBX configuration templates",
    long_about = "View and switch the configuration profiles of an Auerswald PBX.\n\n\
        Talks to the appliance's web management API over HTTPS with Digest\n\
        authentication, optionally through an SSH tunnel.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (default: auerswald.cfg.yaml next to the executable)
    #[arg(long, short = 'c', env = "AUER_CFG_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Presentation layout
    #[arg(long, short = 'l', default_value = "detailed", global = true)]
    pub layout: LayoutStyle,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Trace every request, including the HTTP and SSH stacks
    #[arg(long, global = true)]
    pub debug: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutStyle {
    /// Full identity header, upper-case section titles
    Detailed,
    /// One-line header, plain titles
    Compact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable layout (default)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Identification number of the active configuration (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current configuration state
    #[command(alias = "ls")]
    Show,

    /// Enable automatic configuration switching
    Enable,

    /// Disable automatic configuration switching
    Disable,

    /// Manually select and activate a configuration
    Select(SelectArgs),

    /// Print the configured switch times
    Times,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct SelectArgs {
    /// Identification number of the configuration to activate
    pub number: Option<u32>,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
