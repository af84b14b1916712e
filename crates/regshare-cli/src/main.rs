//! # regshare CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Compliance-gated share ledger runner.
///
/// Replays scenario files of whitelist, mint, scrub, and transfer
/// operations against an in-memory ledger and reports the final state.
#[derive(Parser, Debug)]
#[command(name = "regshare", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Execute a scenario file and print the resulting ledger state.
    Run(regshare_cli::scenario::RunArgs),
    /// Run the built-in issuance, scrub, and transfer demonstration.
    Demo,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => regshare_cli::scenario::run(args),
        Commands::Demo => regshare_cli::scenario::demo(),
    }
}
