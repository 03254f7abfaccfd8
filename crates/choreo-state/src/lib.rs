//! # choreo-state — Element Data Model
//!
//! The persisted units of process state and their shared lifecycle.
//!
//! ## State machine (per element)
//!
//! ```text
//! Disabled ──(enable)──▶ Enabled ──(advance)──▶ Done
//! ```
//!
//! `advance` never retracts state: a `Done` element cannot be advanced
//! again, a `Disabled` element cannot be advanced at all. Topology-driven
//! propagation may re-arm an element the definition names as a retry
//! target; that is the topology's call, not the element's.
//!
//! ## Element kinds
//!
//! - [`Message`] — one directed inter-party communication, carrying the
//!   sending and receiving party plus the correlation id assigned when it
//!   fires.
//! - [`Gateway`] — a branching or fan-out control point. Exclusive versus
//!   event-based behavior lives in the topology's edges, not in the
//!   record shape.
//! - [`ActionEvent`] — a start or end marker.
//!
//! All three persist through the kind-tagged [`Element`] envelope: one
//! ledger entry per element, key = element id, value = canonical JSON.
//!
//! [`ProcessVariables`] are the cross-transaction memory of the single
//! running instance — flags written by one transition and read by the
//! exclusive-gateway branch logic that follows.

pub mod element;
pub mod variables;

pub use element::{ActionEvent, Element, ElementKind, ElementState, Gateway, Message};
pub use variables::{Flag, ProcessSentinel, ProcessVariables, VariableError};
