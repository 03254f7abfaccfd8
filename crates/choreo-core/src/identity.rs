//! # Identifier Newtypes
//!
//! Newtype wrappers for the three identifier namespaces of the stack.
//! You cannot pass a `PartyId` where an `ElementId` is expected — the
//! type system keeps the namespaces apart.
//!
//! Identifiers here are stable strings fixed by the process definition
//! (BPMN element ids, membership identifiers of the collaborating
//! parties) or assigned by external transaction plumbing (correlation
//! ids). None of them are generated inside this workspace: a record
//! written twice for the same transition must be byte-identical, so
//! there is no room for random ids.

use serde::{Deserialize, Serialize};

/// Identifier of a process element (message, gateway, or action event).
///
/// Stable across the life of the process; doubles as the ledger key of
/// the element's persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

/// Identifier of a collaborating party, as resolved by the host
/// platform's membership layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyId(String);

/// External transaction reference attached to a message when it fires.
///
/// Opaque to the engine; assigned by the off-ledger transport that
/// actually carries the message payload between the parties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(String);

impl ElementId {
    /// Wrap an element identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartyId {
    /// Wrap a party identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl CorrelationId {
    /// Wrap a correlation identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for PartyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<&str> for PartyId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<&str> for CorrelationId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
