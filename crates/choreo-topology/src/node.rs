//! Node descriptions: what each element is and what firing it does.

use serde::{Deserialize, Serialize};

use choreo_core::{ElementId, PartyId};
use choreo_state::{
    ActionEvent, Element, ElementKind, ElementState, Flag, Gateway, Message,
};

use crate::edge::Edge;

/// What kind of process element a node describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// The single entry point of the collaboration.
    StartEvent,
    /// A terminal marker; firing one concludes a path.
    EndEvent,
    /// Applies at most one outgoing edge, picked by guard.
    ExclusiveGateway,
    /// Applies every outgoing edge, arming competing continuations.
    EventBasedGateway,
    /// A directed message between the two parties.
    Message {
        /// The party allowed to fire the message.
        sender: PartyId,
        /// The addressed party.
        receiver: PartyId,
    },
}

impl NodeKind {
    /// Whether the node is a message.
    pub fn is_message(&self) -> bool {
        matches!(self, Self::Message { .. })
    }

    /// Whether the node is one of the two gateway kinds.
    pub fn is_gateway(&self) -> bool {
        matches!(self, Self::ExclusiveGateway | Self::EventBasedGateway)
    }

    /// The record kind this node persists as.
    pub fn element_kind(&self) -> ElementKind {
        match self {
            Self::Message { .. } => ElementKind::Message,
            Self::ExclusiveGateway | Self::EventBasedGateway => ElementKind::Gateway,
            Self::StartEvent | Self::EndEvent => ElementKind::Event,
        }
    }
}

/// One element of a process definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Element identifier, unique within the definition.
    pub id: ElementId,
    /// Element kind and its kind-specific data.
    pub kind: NodeKind,
    /// State the element is seeded in at initialization.
    pub initial_state: ElementState,
    /// Whether the engine fires this element itself, in the same
    /// invocation that enabled it. Gateways and end events carry this;
    /// messages wait for their sender.
    pub auto_advance: bool,
    /// Process flag this element writes when it fires, taken from the
    /// caller's payload.
    pub sets_flag: Option<Flag>,
    /// Outgoing edges, applied in order after the element fires.
    pub edges: Vec<Edge>,
}

impl Node {
    /// Materialize the element record this node seeds at initialization.
    pub fn seed(&self) -> Element {
        match &self.kind {
            NodeKind::Message { sender, receiver } => Message::new(
                self.id.clone(),
                sender.clone(),
                receiver.clone(),
                self.initial_state,
            )
            .into(),
            NodeKind::ExclusiveGateway | NodeKind::EventBasedGateway => {
                Gateway::new(self.id.clone(), self.initial_state).into()
            }
            NodeKind::StartEvent | NodeKind::EndEvent => {
                ActionEvent::new(self.id.clone(), self.initial_state).into()
            }
        }
    }
}

/// Builder-style constructors, used by definition literals.
impl Node {
    /// A start event, seeded `Enabled`, fired by the initiating party's
    /// first command.
    pub fn start_event(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::StartEvent,
            initial_state: ElementState::Enabled,
            auto_advance: false,
            sets_flag: None,
            edges: Vec::new(),
        }
    }

    /// An end event, driven to completion by the engine when enabled.
    pub fn end_event(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::EndEvent,
            initial_state: ElementState::Disabled,
            auto_advance: true,
            sets_flag: None,
            edges: Vec::new(),
        }
    }

    /// An exclusive gateway, engine-driven.
    pub fn exclusive_gateway(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::ExclusiveGateway,
            initial_state: ElementState::Disabled,
            auto_advance: true,
            sets_flag: None,
            edges: Vec::new(),
        }
    }

    /// An event-based gateway, engine-driven.
    pub fn event_based_gateway(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::EventBasedGateway,
            initial_state: ElementState::Disabled,
            auto_advance: true,
            sets_flag: None,
            edges: Vec::new(),
        }
    }

    /// A message from `sender` to `receiver`, fired by the sender.
    pub fn message(id: impl Into<ElementId>, sender: &PartyId, receiver: &PartyId) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Message {
                sender: sender.clone(),
                receiver: receiver.clone(),
            },
            initial_state: ElementState::Disabled,
            auto_advance: false,
            sets_flag: None,
            edges: Vec::new(),
        }
    }

    /// Attach the flag this node writes when it fires.
    pub fn setting_flag(mut self, flag: Flag) -> Self {
        self.sets_flag = Some(flag);
        self
    }

    /// Attach the node's outgoing edges.
    pub fn with_edges(mut self, edges: impl IntoIterator<Item = Edge>) -> Self {
        self.edges = edges.into_iter().collect();
        self
    }
}
