use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod cmd;

use cmd::{BuildArgs, GetArgs, ListArgs};
use shoestring_cmd::{config, utils};

/// shoestring-cmd - builds argument lists for the `shoestring` node tool
///
/// Command layout:
///   shoestring-cmd list [--json]
///   shoestring-cmd get   <operation> [--json]
///   shoestring-cmd build <operation> [-d DIR] [-s DIR] [--ca-key PATH] [--package PKG]
///                        [--custom-rest-overrides] [--dry-run] [--json | --plain]
///
/// Operations:
///   setup, upgrade, reset-data, renew-certificates, renew-voting-keys,
///   import-bootstrap (declared, no shoestring mapping; always rejected)
///
/// Global flags / env:
///   -v / -vv                Increase verbosity (logs go to stderr)
///   -q / --quiet            Errors only
///   -c / --config PATH      Settings file (YAML or JSON)
///   SHOESTRING_CMD_CONFIG   Environment fallback if -c not provided
///   RUST_LOG                Overrides the -v / -q derived log filter
///
/// Examples:
///   shoestring-cmd build setup -d /opt/node -s /opt/shoestring --ca-key ca.key.pem --package mainnet
///   shoestring-cmd -c node.yaml build upgrade --plain
///   shoestring-cmd get renew-certificates --json
#[derive(Parser, Debug)]
#[command(
    name = "shoestring-cmd",
    version,
    about = "Build shoestring node-management command lines",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Settings file with build defaults (YAML or JSON)
    #[arg(short = 'c', long = "config", global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List supported operations
    List(ListArgs),

    /// Show the argument layout of one operation
    Get(GetArgs),

    /// Build the shoestring command for an operation
    Build(BuildArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    utils::init_logging(utils::derive_level(cli.verbose, cli.quiet));

    // Settings path: CLI flag > SHOESTRING_CMD_CONFIG env
    let settings_path = config::resolve_path(cli.config.clone());
    if let Some(p) = &settings_path {
        tracing::debug!(path = %p.display(), "using settings file");
    }

    match cli.command {
        Commands::List(args) => cmd::execute_list(args),
        Commands::Get(args) => cmd::execute_get(args),
        Commands::Build(args) => {
            let settings = config::load_optional(settings_path.as_deref())
                .context("failed to load settings")?;
            cmd::execute_build(args, &settings)
        }
    }
}
