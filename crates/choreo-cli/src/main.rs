//! # choreo CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Choreography engine CLI — drive the booking collaboration.
///
/// Initializes the process on a file-backed ledger, fires element
/// transitions as either party, and inspects or validates process
/// state.
#[derive(Parser, Debug)]
#[command(name = "choreo", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Seed the process instance.
    Init(choreo_cli::init::InitArgs),
    /// Fire an element's transition as a given party.
    Advance(choreo_cli::advance::AdvanceArgs),
    /// Print one element's stored record.
    Show(choreo_cli::show::ShowArgs),
    /// Print every message record.
    ListMessages(choreo_cli::list::ListArgs),
    /// Structurally check a topology definition.
    ValidateDefinition(choreo_cli::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => choreo_cli::init::run(args),
        Commands::Advance(args) => choreo_cli::advance::run(args),
        Commands::Show(args) => choreo_cli::show::run(args),
        Commands::ListMessages(args) => choreo_cli::list::run(args),
        Commands::ValidateDefinition(args) => choreo_cli::validate::run(args),
    }
}
