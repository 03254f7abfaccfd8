//! # Advance Subcommand
//!
//! Fires one element's transition as a given party.

use std::path::PathBuf;

use clap::Args;

use choreo_core::{CorrelationId, ElementId};
use choreo_engine::AdvancePayload;

use crate::common::{open_process, resolve_party, DEFAULT_LEDGER};

/// Arguments for the advance subcommand.
#[derive(Args, Debug)]
pub struct AdvanceArgs {
    /// Element to fire, by its diagram identifier.
    pub element: String,

    /// Path of the ledger file.
    #[arg(long, default_value = DEFAULT_LEDGER)]
    pub ledger: PathBuf,

    /// Party issuing the command: `client`, `hotel`, or a raw
    /// participant id.
    #[arg(long = "as", value_name = "PARTY")]
    pub party: String,

    /// External transaction reference to record on the message.
    #[arg(long)]
    pub correlation_id: Option<String>,

    /// Value for the confirm flag, where the element sets it.
    #[arg(long)]
    pub confirm: Option<bool>,

    /// Value for the cancel flag, where the element sets it.
    #[arg(long)]
    pub cancel: Option<bool>,
}

/// Fire the transition and report the element's new state.
pub fn run(args: AdvanceArgs) -> anyhow::Result<()> {
    let mut process = open_process(&args.ledger, resolve_party(&args.party))?;

    let mut payload = AdvancePayload::new();
    if let Some(correlation_id) = args.correlation_id {
        payload = payload.with_correlation_id(CorrelationId::new(correlation_id));
    }
    if let Some(confirm) = args.confirm {
        payload = payload.with_confirm(confirm);
    }
    if let Some(cancel) = args.cancel {
        payload = payload.with_cancel(cancel);
    }

    let id = ElementId::new(&args.element);
    tracing::info!(element = %id, party = args.party, "firing transition");
    process.engine_mut().advance(&id, &payload)?;
    println!("{} advanced", args.element);
    Ok(())
}
