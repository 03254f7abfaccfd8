//! # Init Subcommand
//!
//! Seeds the booking process instance on the ledger file.

use std::path::PathBuf;

use clap::Args;

use crate::common::{open_process, resolve_party, DEFAULT_LEDGER};

/// Arguments for the init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path of the ledger file.
    #[arg(long, default_value = DEFAULT_LEDGER)]
    pub ledger: PathBuf,
}

/// Seed the process: every element at its initial state.
pub fn run(args: InitArgs) -> anyhow::Result<()> {
    tracing::info!(ledger = %args.ledger.display(), "seeding process instance");
    // Seeding is not party-specific; attribute it to the initiator.
    let mut process = open_process(&args.ledger, resolve_party("client"))?;
    process.initialize()?;
    println!("process initialized at {}", args.ledger.display());
    Ok(())
}
