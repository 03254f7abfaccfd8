//! # Event Sinks
//!
//! Each committed mutation emits a named event record. Delivery and
//! subscription belong to the host platform; the engine fires and
//! forgets. The sink is handed the payload bytes already in canonical
//! form, so the same transition emits the same event on every executor.

use std::sync::Mutex;

/// Receives emitted event records.
pub trait EventSink {
    /// Emit an event. No acknowledgement is expected or awaited.
    fn emit(&self, name: &str, payload: &[u8]);
}

/// Logs events through `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, name: &str, payload: &[u8]) {
        let payload = String::from_utf8_lossy(payload);
        tracing::info!(event = name, %payload, "process event");
    }
}

/// Captures events in memory so tests can assert on emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(String, Vec<u8>)>>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of every emitted event, in emission order.
    pub fn names(&self) -> Vec<String> {
        self.events
            .lock()
            .expect("event sink lock poisoned")
            .iter()
            .map(|(n, _)| n.clone())
            .collect()
    }

    /// All emitted events with payloads.
    pub fn recorded(&self) -> Vec<(String, Vec<u8>)> {
        self.events
            .lock()
            .expect("event sink lock poisoned")
            .clone()
    }

    /// Number of emitted events.
    pub fn len(&self) -> usize {
        self.events.lock().expect("event sink lock poisoned").len()
    }

    /// Whether nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, name: &str, payload: &[u8]) {
        self.events
            .lock()
            .expect("event sink lock poisoned")
            .push((name.to_string(), payload.to_vec()));
    }
}

impl<S: EventSink + ?Sized> EventSink for &S {
    fn emit(&self, name: &str, payload: &[u8]) {
        (**self).emit(name, payload);
    }
}
