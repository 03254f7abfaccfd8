//! # choreo-ledger — Substrate Interfaces
//!
//! The engine runs on top of three external collaborators, each consumed
//! through a trait defined here:
//!
//! - [`KeyValueLedger`] — the shared append-style store: `get`, `put`,
//!   `range_scan`. The host platform decides atomicity and ordering per
//!   invocation; this crate adds [`LedgerBatch`] so a multi-write
//!   transition commits all-or-nothing even on substrates without native
//!   transactions.
//! - [`IdentityResolver`] — the membership layer. The engine only consumes
//!   a resolved [`PartyId`]; verification happens upstream.
//! - [`EventSink`] — fire-and-forget event emission. Delivery and
//!   subscription are external concerns.
//!
//! Two ledger implementations ship with the crate: [`MemoryLedger`] for
//! tests and embedding, and [`FileLedger`] so the CLI keeps process state
//! across invocations.

pub mod batch;
pub mod error;
pub mod events;
pub mod identity;
pub mod kv;

pub use batch::LedgerBatch;
pub use error::LedgerError;
pub use events::{EventSink, RecordingSink, TracingSink};
pub use identity::{IdentityResolver, SharedIdentity, StaticIdentity};
pub use kv::{FileLedger, KeyValueLedger, MemoryLedger};

pub use choreo_core::PartyId;
