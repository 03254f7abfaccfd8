//! # choreo-engine — Guarded State-Transition Engine
//!
//! Executes a [`choreo_topology::ProcessDefinition`] over the substrate
//! traits of `choreo-ledger`:
//!
//! - [`ElementStore`] — typed element persistence with canonical
//!   encoding, plus the reserved variables and sentinel records.
//! - [`ProcessEngine`] — the uniform transition algorithm: authorize,
//!   require `Enabled`, mark `Done`, record payload inputs, propagate
//!   along guarded edges, commit atomically, then emit events.
//! - [`BookingProcess`] — typed entry points for the fixed hotel-booking
//!   collaboration, one method per firable element.
//!
//! Everything is synchronous: one invocation is one unit of work, and
//! concurrent invocations are serialized by the substrate, not here.

pub mod booking;
pub mod engine;
pub mod error;
pub mod store;

pub use booking::BookingProcess;
pub use engine::{AdvancePayload, ProcessEngine, INITIALIZED_EVENT};
pub use error::EngineError;
pub use store::{ElementStore, SENTINEL_KEY, VARIABLES_KEY};
