//! Shared plumbing for the subcommand handlers.

use std::path::PathBuf;

use anyhow::Context;

use choreo_core::PartyId;
use choreo_engine::BookingProcess;
use choreo_ledger::{FileLedger, StaticIdentity, TracingSink};
use choreo_topology::parties;

/// Default location of the file-backed ledger.
pub const DEFAULT_LEDGER: &str = "choreo-ledger.json";

/// Open the booking process over the ledger file at `path`, with every
/// invocation attributed to `party`.
pub fn open_process(
    path: &PathBuf,
    party: PartyId,
) -> anyhow::Result<BookingProcess<FileLedger, StaticIdentity, TracingSink>> {
    let ledger = FileLedger::open(path)
        .with_context(|| format!("opening ledger {}", path.display()))?;
    Ok(BookingProcess::new(
        ledger,
        StaticIdentity::new(party),
        TracingSink,
    ))
}

/// Resolve a `--as` argument: the shorthand party names, or a raw
/// participant identifier.
pub fn resolve_party(name: &str) -> PartyId {
    let known = parties();
    match name {
        "client" => known.client,
        "hotel" => known.hotel,
        other => PartyId::new(other),
    }
}
