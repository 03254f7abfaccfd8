//! The generic transition engine.
//!
//! One invocation is one unit of work: read, authorize, transition,
//! propagate, commit, emit. All writes stage in a [`LedgerBatch`] and
//! land together; events queue in memory and flush only after the
//! commit, so a failed invocation leaves nothing visible.

use serde::Serialize;

use choreo_core::{sha256_digest, CanonicalBytes, CorrelationId, ElementId, PartyId};
use choreo_ledger::{EventSink, IdentityResolver, KeyValueLedger, LedgerBatch};
use choreo_state::{
    ActionEvent, Element, ElementKind, ElementState, Flag, Gateway, Message, ProcessSentinel,
    ProcessVariables,
};
use choreo_topology::{Node, NodeKind, ProcessDefinition};

use crate::error::EngineError;
use crate::store::ElementStore;

/// Name of the event emitted by a successful initialization.
pub const INITIALIZED_EVENT: &str = "process_initialized";

// ─── Payload ─────────────────────────────────────────────────────────

/// Caller-supplied inputs to a transition.
///
/// Only the fields the fired element declares are consumed: the
/// correlation id lands on messages, each flag only on the element that
/// sets it. Everything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvancePayload {
    /// External transaction reference to record on the message.
    pub correlation_id: Option<CorrelationId>,
    /// Value for the confirm flag, where the element sets it.
    pub confirm: Option<bool>,
    /// Value for the cancel flag, where the element sets it.
    pub cancel: Option<bool>,
}

impl AdvancePayload {
    /// An empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a correlation id.
    pub fn with_correlation_id(mut self, correlation_id: CorrelationId) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    /// Attach a confirm flag value.
    pub fn with_confirm(mut self, confirm: bool) -> Self {
        self.confirm = Some(confirm);
        self
    }

    /// Attach a cancel flag value.
    pub fn with_cancel(mut self, cancel: bool) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn flag_value(&self, flag: Flag) -> Option<bool> {
        match flag {
            Flag::Confirm => self.confirm,
            Flag::Cancel => self.cancel,
        }
    }
}

// ─── Event records ───────────────────────────────────────────────────

/// Payload of the event a mutated element emits, named by element id.
///
/// The digest is over the element's stored canonical bytes, so an
/// observer can verify the record a transition produced.
#[derive(Debug, Serialize)]
struct TransitionEvent<'a> {
    element: &'a ElementId,
    state: ElementState,
    digest: String,
}

/// Payload of [`INITIALIZED_EVENT`].
#[derive(Debug, Serialize)]
struct InitializedEvent {
    elements: usize,
}

type QueuedEvent = (String, Vec<u8>);

fn queue_mutation(element: &Element, queued: &mut Vec<QueuedEvent>) -> Result<(), EngineError> {
    let record = CanonicalBytes::new(element)?;
    let event = TransitionEvent {
        element: element.id(),
        state: element.state(),
        digest: sha256_digest(&record).to_string(),
    };
    let payload = CanonicalBytes::new(&event)?;
    queued.push((element.id().as_str().to_string(), payload.as_bytes().to_vec()));
    Ok(())
}

// ─── Engine ──────────────────────────────────────────────────────────

/// Executes a [`ProcessDefinition`] over a ledger, an identity resolver,
/// and an event sink.
#[derive(Debug)]
pub struct ProcessEngine<L, I, E> {
    ledger: L,
    identity: I,
    events: E,
    definition: ProcessDefinition,
}

impl<L, I, E> ProcessEngine<L, I, E>
where
    L: KeyValueLedger,
    I: IdentityResolver,
    E: EventSink,
{
    /// Build an engine for `definition`.
    pub fn new(ledger: L, identity: I, events: E, definition: ProcessDefinition) -> Self {
        Self {
            ledger,
            identity,
            events,
            definition,
        }
    }

    /// The definition this engine executes.
    pub fn definition(&self) -> &ProcessDefinition {
        &self.definition
    }

    /// Borrow the underlying ledger.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Seed the process instance: every element at its initial state,
    /// fresh variables, and the one-shot sentinel. Refuses to run twice.
    pub fn initialize(&mut self) -> Result<(), EngineError> {
        let definition = &self.definition;
        let mut store = ElementStore::new(LedgerBatch::new(&mut self.ledger));
        if store.sentinel()?.initialized {
            return Err(EngineError::AlreadyInitialized);
        }
        for node in definition.iter() {
            store.create(&node.seed())?;
        }
        store.write_variables(&ProcessVariables::new())?;
        store.write_sentinel(&ProcessSentinel::initialized())?;
        store.into_inner().commit()?;

        let payload = CanonicalBytes::new(&InitializedEvent {
            elements: definition.len(),
        })?;
        self.events.emit(INITIALIZED_EVENT, payload.as_bytes());
        tracing::info!(elements = definition.len(), "process initialized");
        Ok(())
    }

    /// Fire the transition of `id` and propagate along its edges.
    ///
    /// The uniform algorithm for every element kind: read, authorize
    /// (messages only), require `Enabled`, mark `Done`, record payload
    /// inputs, write, then apply outgoing edges — at most one for an
    /// exclusive gateway, all of them otherwise. Propagation targets
    /// marked for auto-advance are fired recursively within the same
    /// invocation. The whole invocation commits atomically; queued
    /// events flush only after the commit.
    pub fn advance(&mut self, id: &ElementId, payload: &AdvancePayload) -> Result<(), EngineError> {
        let caller = self.identity.caller();
        let definition = &self.definition;
        let node = definition
            .node(id)
            .ok_or_else(|| EngineError::UnknownElement { id: id.clone() })?;

        let mut store = ElementStore::new(LedgerBatch::new(&mut self.ledger));
        let mut queued = Vec::new();
        advance_element(definition, &mut store, &caller, node, payload, &mut queued)?;
        store.into_inner().commit()?;

        for (name, bytes) in queued {
            self.events.emit(&name, &bytes);
        }
        Ok(())
    }

    // ─── Admin surface ───────────────────────────────────────────────

    /// Store a message record outside the definition flow.
    pub fn create_message(&mut self, message: Message) -> Result<(), EngineError> {
        self.create_element(message.into())
    }

    /// Store a gateway record outside the definition flow.
    pub fn create_gateway(&mut self, gateway: Gateway) -> Result<(), EngineError> {
        self.create_element(gateway.into())
    }

    /// Store an event record outside the definition flow.
    pub fn create_event(&mut self, event: ActionEvent) -> Result<(), EngineError> {
        self.create_element(event.into())
    }

    fn create_element(&mut self, element: Element) -> Result<(), EngineError> {
        let mut store = ElementStore::new(&mut self.ledger);
        store.create(&element)?;
        let mut queued = Vec::new();
        queue_mutation(&element, &mut queued)?;
        for (name, bytes) in queued {
            self.events.emit(&name, &bytes);
        }
        Ok(())
    }

    /// Read a message record.
    pub fn read_message(&mut self, id: &ElementId) -> Result<Message, EngineError> {
        match ElementStore::new(&mut self.ledger).read(ElementKind::Message, id)? {
            Element::Message(m) => Ok(m),
            other => Err(EngineError::WrongKind {
                id: id.clone(),
                expected: ElementKind::Message,
                actual: other.kind(),
            }),
        }
    }

    /// Read a gateway record.
    pub fn read_gateway(&mut self, id: &ElementId) -> Result<Gateway, EngineError> {
        match ElementStore::new(&mut self.ledger).read(ElementKind::Gateway, id)? {
            Element::Gateway(g) => Ok(g),
            other => Err(EngineError::WrongKind {
                id: id.clone(),
                expected: ElementKind::Gateway,
                actual: other.kind(),
            }),
        }
    }

    /// Read an event record.
    pub fn read_event(&mut self, id: &ElementId) -> Result<ActionEvent, EngineError> {
        match ElementStore::new(&mut self.ledger).read(ElementKind::Event, id)? {
            Element::Event(e) => Ok(e),
            other => Err(EngineError::WrongKind {
                id: id.clone(),
                expected: ElementKind::Event,
                actual: other.kind(),
            }),
        }
    }

    /// Force a message's state. No propagation, no guard checks.
    pub fn change_message_state(
        &mut self,
        id: &ElementId,
        state: ElementState,
    ) -> Result<(), EngineError> {
        self.change_element_state(ElementKind::Message, id, state)
    }

    /// Force a gateway's state. No propagation, no guard checks.
    pub fn change_gateway_state(
        &mut self,
        id: &ElementId,
        state: ElementState,
    ) -> Result<(), EngineError> {
        self.change_element_state(ElementKind::Gateway, id, state)
    }

    /// Force an event's state. No propagation, no guard checks.
    pub fn change_event_state(
        &mut self,
        id: &ElementId,
        state: ElementState,
    ) -> Result<(), EngineError> {
        self.change_element_state(ElementKind::Event, id, state)
    }

    fn change_element_state(
        &mut self,
        kind: ElementKind,
        id: &ElementId,
        state: ElementState,
    ) -> Result<(), EngineError> {
        let mut store = ElementStore::new(&mut self.ledger);
        let mut element = store.read(kind, id)?;
        element.set_state(state);
        store.write(&element)?;
        let mut queued = Vec::new();
        queue_mutation(&element, &mut queued)?;
        for (name, bytes) in queued {
            self.events.emit(&name, &bytes);
        }
        tracing::debug!(element = %id, %state, "state override");
        Ok(())
    }

    /// Every stored message record, in key order.
    pub fn list_all_messages(&mut self) -> Result<Vec<Message>, EngineError> {
        let store = ElementStore::new(&mut self.ledger);
        let mut messages = Vec::new();
        for element in store.scan_all(ElementKind::Message)? {
            if let Element::Message(m) = element {
                messages.push(m);
            }
        }
        Ok(messages)
    }
}

// ─── Transition algorithm ────────────────────────────────────────────

fn advance_element<S: KeyValueLedger>(
    definition: &ProcessDefinition,
    store: &mut ElementStore<S>,
    caller: &PartyId,
    node: &Node,
    payload: &AdvancePayload,
    queued: &mut Vec<QueuedEvent>,
) -> Result<(), EngineError> {
    let mut element = store.read(node.kind.element_kind(), &node.id)?;

    if let NodeKind::Message { sender, .. } = &node.kind {
        if sender != caller {
            return Err(EngineError::Unauthorized {
                id: node.id.clone(),
                caller: caller.clone(),
            });
        }
    }
    let state = element.state();
    if state != ElementState::Enabled {
        return Err(EngineError::InvalidState {
            id: node.id.clone(),
            state,
        });
    }

    element.set_state(ElementState::Done);
    if let Some(message) = element.as_message_mut() {
        if let Some(correlation_id) = &payload.correlation_id {
            message.correlation_id = Some(correlation_id.clone());
        }
    }
    if let Some(flag) = node.sets_flag {
        if let Some(value) = payload.flag_value(flag) {
            let mut variables = store.variables()?;
            variables.set_flag(flag, value);
            store.write_variables(&variables)?;
        }
    }
    store.write(&element)?;
    queue_mutation(&element, queued)?;
    tracing::debug!(element = %node.id, "transition fired");

    let variables = store.variables()?;
    let exclusive = node.kind == NodeKind::ExclusiveGateway;
    for edge in &node.edges {
        if !edge.guard.evaluate(&variables)? {
            continue;
        }
        let target_node = definition
            .node(&edge.target)
            .ok_or_else(|| EngineError::UnknownElement {
                id: edge.target.clone(),
            })?;
        let mut target = store.read(target_node.kind.element_kind(), &edge.target)?;
        target.set_state(edge.target_state);
        store.write(&target)?;
        queue_mutation(&target, queued)?;

        if target_node.auto_advance && edge.target_state == ElementState::Enabled {
            advance_element(
                definition,
                store,
                caller,
                target_node,
                &AdvancePayload::default(),
                queued,
            )?;
        }
        if exclusive {
            break;
        }
    }
    Ok(())
}
