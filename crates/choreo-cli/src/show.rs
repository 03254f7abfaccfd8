//! # Show Subcommand
//!
//! Prints one element's stored record as JSON.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use choreo_core::ElementId;
use choreo_engine::ElementStore;
use choreo_ledger::FileLedger;
use choreo_topology::booking_collaboration;

use crate::common::DEFAULT_LEDGER;

/// Arguments for the show subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Element to print, by its diagram identifier.
    pub element: String,

    /// Path of the ledger file.
    #[arg(long, default_value = DEFAULT_LEDGER)]
    pub ledger: PathBuf,
}

/// Read the element and print its record.
pub fn run(args: ShowArgs) -> anyhow::Result<()> {
    let id = ElementId::new(&args.element);
    let definition = booking_collaboration();
    let node = definition
        .node(&id)
        .with_context(|| format!("{id} is not part of the booking collaboration"))?;

    let mut ledger = FileLedger::open(&args.ledger)
        .with_context(|| format!("opening ledger {}", args.ledger.display()))?;
    let store = ElementStore::new(&mut ledger);
    let element = store.read(node.kind.element_kind(), &id)?;
    println!("{}", serde_json::to_string_pretty(&element)?);
    Ok(())
}
