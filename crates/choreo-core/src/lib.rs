//! # choreo-core — Foundational Types for the Choreography Stack
//!
//! Defines the type-system primitives every other crate in the workspace
//! builds on. This crate depends on nothing internal; it is the leaf of
//! the workspace DAG.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `ElementId`, `PartyId`,
//!    `CorrelationId` — validated newtypes, no bare strings at API
//!    boundaries.
//!
//! 2. **`CanonicalBytes` newtype.** Every byte sequence persisted to the
//!    ledger or hashed for an event record flows through
//!    `CanonicalBytes::new()`. Redundant executors replaying the same
//!    transition must produce byte-identical records; RFC 8785 (JCS)
//!    serialization with sorted keys guarantees that.
//!
//! 3. **`sha256_digest()` accepts only `&CanonicalBytes`.** Compile-time
//!    enforcement that no digest is ever computed over non-canonical bytes.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `choreo-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;

pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, ContentDigest};
pub use error::CanonicalizationError;
pub use identity::{CorrelationId, ElementId, PartyId};
