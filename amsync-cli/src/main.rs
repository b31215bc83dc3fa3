//! amsync: keep `Makefile.am` build manifests in sync with project descriptors.
//!
//! # Usage
//!
//! ```text
//! amsync sync   [ROOT] [--descriptor <PATH>]... [--dry-run] [--config <FILE>]
//! amsync diff   [ROOT] [--config <FILE>]
//! amsync status [ROOT] [--json] [--config <FILE>]
//! amsync show   <DESCRIPTOR> [--json] [--config <FILE>]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{diff::DiffArgs, show::ShowArgs, status::StatusArgs, sync::SyncArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "amsync",
    version,
    about = "Synchronize autotools build manifests with IDE project descriptors",
    long_about = None,
)]
struct Cli {
    /// Log debug output (RUST_LOG overrides).
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create or patch the manifest next to every descriptor.
    Sync(SyncArgs),

    /// Show unified diff of what sync would write.
    Diff(DiffArgs),

    /// Show which manifests are missing, stale, or malformed.
    Status(StatusArgs),

    /// Print the file lists extracted from one descriptor.
    Show(ShowArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Diff(args) => args.run(),
        Commands::Status(args) => args.run(),
        Commands::Show(args) => args.run(),
    }
}
