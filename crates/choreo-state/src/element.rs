//! Element records and the shared lifecycle state.

use serde::{Deserialize, Serialize};

use choreo_core::{CorrelationId, ElementId, PartyId};

// ─── Lifecycle State ─────────────────────────────────────────────────

/// Lifecycle state shared by every element kind.
///
/// Monotonic under `advance`: an element only moves forward, and `Done`
/// is terminal for its own transition handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementState {
    /// Not yet reachable; no operation may act on the element.
    Disabled,
    /// Armed by an upstream transition; the element's own transition may
    /// now fire.
    Enabled,
    /// The element's transition has fired.
    Done,
}

impl ElementState {
    /// The canonical state name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Disabled => "DISABLED",
            Self::Enabled => "ENABLED",
            Self::Done => "DONE",
        }
    }

    /// Whether this state is terminal for the element's own handler.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Position in the forward order, for monotonicity assertions.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Disabled => 0,
            Self::Enabled => 1,
            Self::Done => 2,
        }
    }
}

impl std::fmt::Display for ElementState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Element Kinds ───────────────────────────────────────────────────

/// Discriminates the three persisted record shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Inter-party message.
    Message,
    /// Exclusive or event-based gateway.
    Gateway,
    /// Start or end event.
    Event,
}

impl ElementKind {
    /// The canonical kind name, as stored in the record's `kind` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Gateway => "gateway",
            Self::Event => "event",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Records ─────────────────────────────────────────────────────────

/// One directed inter-party communication.
///
/// A transition on a message is only valid when the resolved caller
/// equals `sender` and the state is `Enabled` beforehand. The
/// correlation id stays empty until the message fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Element identifier; doubles as the ledger key.
    pub id: ElementId,
    /// The party allowed to fire this message.
    pub sender: PartyId,
    /// The party the message is addressed to.
    pub receiver: PartyId,
    /// External transaction reference, set when the message fires.
    pub correlation_id: Option<CorrelationId>,
    /// Lifecycle state.
    pub state: ElementState,
}

impl Message {
    /// Build a message record in the given starting state.
    pub fn new(id: ElementId, sender: PartyId, receiver: PartyId, state: ElementState) -> Self {
        Self {
            id,
            sender,
            receiver,
            correlation_id: None,
            state,
        }
    }
}

/// A branching or fan-out control point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gateway {
    /// Element identifier; doubles as the ledger key.
    pub id: ElementId,
    /// Lifecycle state.
    pub state: ElementState,
}

impl Gateway {
    /// Build a gateway record in the given starting state.
    pub fn new(id: ElementId, state: ElementState) -> Self {
        Self { id, state }
    }
}

/// A process start or end marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEvent {
    /// Element identifier; doubles as the ledger key.
    pub id: ElementId,
    /// Lifecycle state.
    pub state: ElementState,
}

impl ActionEvent {
    /// Build an event record in the given starting state.
    pub fn new(id: ElementId, state: ElementState) -> Self {
        Self { id, state }
    }
}

// ─── Envelope ────────────────────────────────────────────────────────

/// The persisted record envelope, tagged by kind.
///
/// This is exactly what lands in the ledger: canonical JSON of the
/// variant with a `kind` discriminator, so a range scan can tell the
/// record shapes apart without an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    /// A [`Message`] record.
    Message(Message),
    /// A [`Gateway`] record.
    Gateway(Gateway),
    /// An [`ActionEvent`] record.
    Event(ActionEvent),
}

impl Element {
    /// The element's identifier.
    pub fn id(&self) -> &ElementId {
        match self {
            Self::Message(m) => &m.id,
            Self::Gateway(g) => &g.id,
            Self::Event(e) => &e.id,
        }
    }

    /// The element's kind tag.
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Message(_) => ElementKind::Message,
            Self::Gateway(_) => ElementKind::Gateway,
            Self::Event(_) => ElementKind::Event,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ElementState {
        match self {
            Self::Message(m) => m.state,
            Self::Gateway(g) => g.state,
            Self::Event(e) => e.state,
        }
    }

    /// Overwrite the lifecycle state.
    pub fn set_state(&mut self, state: ElementState) {
        match self {
            Self::Message(m) => m.state = state,
            Self::Gateway(g) => g.state = state,
            Self::Event(e) => e.state = state,
        }
    }

    /// Borrow the message record, if this is a message.
    pub fn as_message(&self) -> Option<&Message> {
        match self {
            Self::Message(m) => Some(m),
            _ => None,
        }
    }

    /// Mutably borrow the message record, if this is a message.
    pub fn as_message_mut(&mut self) -> Option<&mut Message> {
        match self {
            Self::Message(m) => Some(m),
            _ => None,
        }
    }
}

impl From<Message> for Element {
    fn from(m: Message) -> Self {
        Self::Message(m)
    }
}

impl From<Gateway> for Element {
    fn from(g: Gateway) -> Self {
        Self::Gateway(g)
    }
}

impl From<ActionEvent> for Element {
    fn from(e: ActionEvent) -> Self {
        Self::Event(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg() -> Message {
        Message::new(
            ElementId::new("Message_045i10y"),
            PartyId::new("Participant_1080bkg"),
            PartyId::new("Participant_0sktaei"),
            ElementState::Disabled,
        )
    }

    // ── State semantics ──────────────────────────────────────────────

    #[test]
    fn test_state_names() {
        assert_eq!(ElementState::Disabled.to_string(), "DISABLED");
        assert_eq!(ElementState::Enabled.to_string(), "ENABLED");
        assert_eq!(ElementState::Done.to_string(), "DONE");
    }

    #[test]
    fn test_state_ranks_are_ordered() {
        assert!(ElementState::Disabled.rank() < ElementState::Enabled.rank());
        assert!(ElementState::Enabled.rank() < ElementState::Done.rank());
    }

    #[test]
    fn test_only_done_is_terminal() {
        assert!(!ElementState::Disabled.is_terminal());
        assert!(!ElementState::Enabled.is_terminal());
        assert!(ElementState::Done.is_terminal());
    }

    #[test]
    fn test_state_serde_names() {
        let json = serde_json::to_string(&ElementState::Enabled).unwrap();
        assert_eq!(json, "\"ENABLED\"");
        let parsed: ElementState = serde_json::from_str("\"DONE\"").unwrap();
        assert_eq!(parsed, ElementState::Done);
    }

    // ── Records ──────────────────────────────────────────────────────

    #[test]
    fn test_new_message_has_no_correlation_id() {
        assert!(msg().correlation_id.is_none());
    }

    #[test]
    fn test_envelope_accessors() {
        let mut el: Element = msg().into();
        assert_eq!(el.id().as_str(), "Message_045i10y");
        assert_eq!(el.kind(), ElementKind::Message);
        assert_eq!(el.state(), ElementState::Disabled);
        el.set_state(ElementState::Enabled);
        assert_eq!(el.state(), ElementState::Enabled);
        assert!(el.as_message().is_some());
    }

    #[test]
    fn test_envelope_kind_tag_in_json() {
        let el: Element = Gateway::new(
            ElementId::new("ExclusiveGateway_0hs3ztq"),
            ElementState::Disabled,
        )
        .into();
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["kind"], "gateway");
        assert_eq!(json["state"], "DISABLED");
    }

    #[test]
    fn test_envelope_roundtrip() {
        let el: Element = ActionEvent::new(
            ElementId::new("StartEvent_1jtgn3j"),
            ElementState::Enabled,
        )
        .into();
        let json = serde_json::to_string(&el).unwrap();
        let parsed: Element = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, el);
    }

    #[test]
    fn test_gateway_record_is_not_a_message() {
        let el: Element =
            Gateway::new(ElementId::new("g"), ElementState::Disabled).into();
        assert!(el.as_message().is_none());
    }
}
