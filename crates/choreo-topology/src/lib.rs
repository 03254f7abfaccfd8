//! # choreo-topology — Process Topology as Data
//!
//! The shape of a collaboration, expressed as a table the engine walks
//! rather than logic baked into transition handlers: every node carries
//! its outgoing [`Edge`]s, each edge a target element, the state to put
//! it in, and a [`VariableGuard`] deciding whether the edge applies.
//!
//! The branching discipline lives in the node kind:
//!
//! - [`NodeKind::ExclusiveGateway`] applies at most one matching edge
//!   (the first whose guard holds, in definition order).
//! - [`NodeKind::EventBasedGateway`] applies every edge, arming all
//!   competing continuations at once.
//! - Everything else applies every edge whose guard holds.
//!
//! Definitions are plain serde data, so a topology can be reviewed,
//! diffed, and loaded from YAML or JSON without touching engine code.
//! [`booking_collaboration`] is the fixed two-party hotel-booking
//! choreography this stack ships with.

pub mod booking;
pub mod definition;
pub mod edge;
pub mod node;

pub use booking::{booking_collaboration, parties, BookingParties};
pub use definition::{ProcessDefinition, TopologyError};
pub use edge::{Edge, VariableGuard};
pub use node::{Node, NodeKind};
