//! # List-Messages Subcommand
//!
//! Prints every stored message record as a JSON array.

use std::path::PathBuf;

use clap::Args;

use crate::common::{open_process, resolve_party, DEFAULT_LEDGER};

/// Arguments for the list-messages subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Path of the ledger file.
    #[arg(long, default_value = DEFAULT_LEDGER)]
    pub ledger: PathBuf,
}

/// Scan and print every message record.
pub fn run(args: ListArgs) -> anyhow::Result<()> {
    // Listing is read-only; the attributed party is irrelevant.
    let mut process = open_process(&args.ledger, resolve_party("client"))?;
    let messages = process.engine_mut().list_all_messages()?;
    println!("{}", serde_json::to_string_pretty(&messages)?);
    Ok(())
}
