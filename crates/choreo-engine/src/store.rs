//! Typed element persistence over any key-value substrate.

use choreo_core::{CanonicalBytes, ElementId};
use choreo_ledger::KeyValueLedger;
use choreo_state::{Element, ElementKind, ProcessSentinel, ProcessVariables};

use crate::error::EngineError;

/// Reserved key holding the process variables record.
pub const VARIABLES_KEY: &str = "$variables";

/// Reserved key holding the initialization sentinel.
pub const SENTINEL_KEY: &str = "$process";

/// Prefix marking keys that are not element records.
const RESERVED_PREFIX: char = '$';

/// Typed reads and writes of element records, variables, and the
/// sentinel over any [`KeyValueLedger`] — a bare substrate or a staged
/// batch alike.
///
/// Every write goes through [`CanonicalBytes`], so a record's stored
/// form is identical across executors.
#[derive(Debug)]
pub struct ElementStore<S: KeyValueLedger> {
    ledger: S,
}

impl<S: KeyValueLedger> ElementStore<S> {
    /// Wrap a substrate.
    pub fn new(ledger: S) -> Self {
        Self { ledger }
    }

    /// Unwrap the substrate, e.g. to commit a staged batch.
    pub fn into_inner(self) -> S {
        self.ledger
    }

    /// Store a new element record, refusing to overwrite.
    pub fn create(&mut self, element: &Element) -> Result<(), EngineError> {
        let id = element.id();
        if self.ledger.get(id.as_str())?.is_some() {
            return Err(EngineError::AlreadyExists { id: id.clone() });
        }
        self.write(element)
    }

    /// Read an element record, requiring it to be of `kind`.
    pub fn read(&self, kind: ElementKind, id: &ElementId) -> Result<Element, EngineError> {
        let raw = self
            .ledger
            .get(id.as_str())?
            .ok_or_else(|| EngineError::NotFound { id: id.clone() })?;
        let element: Element =
            serde_json::from_slice(&raw).map_err(|e| EngineError::decode(id, e))?;
        if element.kind() != kind {
            return Err(EngineError::WrongKind {
                id: id.clone(),
                expected: kind,
                actual: element.kind(),
            });
        }
        Ok(element)
    }

    /// Overwrite an element record with its canonical encoding.
    pub fn write(&mut self, element: &Element) -> Result<(), EngineError> {
        let bytes = CanonicalBytes::new(element)?;
        self.ledger
            .put(element.id().as_str(), bytes.as_bytes().to_vec())?;
        Ok(())
    }

    /// All element records of `kind`, in key order. Reserved keys are
    /// skipped.
    pub fn scan_all(&self, kind: ElementKind) -> Result<Vec<Element>, EngineError> {
        let mut out = Vec::new();
        for (key, raw) in self.ledger.range_scan("", "")? {
            if key.starts_with(RESERVED_PREFIX) {
                continue;
            }
            let id = ElementId::new(&key);
            let element: Element =
                serde_json::from_slice(&raw).map_err(|e| EngineError::decode(&id, e))?;
            if element.kind() == kind {
                out.push(element);
            }
        }
        Ok(out)
    }

    /// The persisted process variables; fresh defaults if none were
    /// written yet.
    pub fn variables(&self) -> Result<ProcessVariables, EngineError> {
        match self.ledger.get(VARIABLES_KEY)? {
            None => Ok(ProcessVariables::new()),
            Some(raw) => serde_json::from_slice(&raw)
                .map_err(|e| EngineError::decode(&ElementId::new(VARIABLES_KEY), e)),
        }
    }

    /// Persist the process variables.
    pub fn write_variables(&mut self, variables: &ProcessVariables) -> Result<(), EngineError> {
        let bytes = CanonicalBytes::new(variables)?;
        self.ledger
            .put(VARIABLES_KEY, bytes.as_bytes().to_vec())?;
        Ok(())
    }

    /// The persisted initialization sentinel; unset defaults if none was
    /// written yet.
    pub fn sentinel(&self) -> Result<ProcessSentinel, EngineError> {
        match self.ledger.get(SENTINEL_KEY)? {
            None => Ok(ProcessSentinel::default()),
            Some(raw) => serde_json::from_slice(&raw)
                .map_err(|e| EngineError::decode(&ElementId::new(SENTINEL_KEY), e)),
        }
    }

    /// Persist the initialization sentinel.
    pub fn write_sentinel(&mut self, sentinel: &ProcessSentinel) -> Result<(), EngineError> {
        let bytes = CanonicalBytes::new(sentinel)?;
        self.ledger.put(SENTINEL_KEY, bytes.as_bytes().to_vec())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use choreo_core::PartyId;
    use choreo_ledger::MemoryLedger;
    use choreo_state::{ActionEvent, ElementState, Flag, Gateway, Message};

    fn store() -> ElementStore<MemoryLedger> {
        ElementStore::new(MemoryLedger::new())
    }

    fn sample_message() -> Element {
        Message::new(
            ElementId::new("Message_045i10y"),
            PartyId::new("Participant_1080bkg"),
            PartyId::new("Participant_0sktaei"),
            ElementState::Enabled,
        )
        .into()
    }

    #[test]
    fn test_create_then_read() {
        let mut store = store();
        store.create(&sample_message()).unwrap();
        let read = store
            .read(ElementKind::Message, &ElementId::new("Message_045i10y"))
            .unwrap();
        assert_eq!(read, sample_message());
    }

    #[test]
    fn test_create_refuses_overwrite() {
        let mut store = store();
        store.create(&sample_message()).unwrap();
        assert!(matches!(
            store.create(&sample_message()),
            Err(EngineError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn test_read_absent_is_not_found() {
        let store = store();
        assert!(matches!(
            store.read(ElementKind::Message, &ElementId::new("Message_045i10y")),
            Err(EngineError::NotFound { .. })
        ));
    }

    #[test]
    fn test_read_wrong_kind() {
        let mut store = store();
        store.create(&sample_message()).unwrap();
        let err = store
            .read(ElementKind::Gateway, &ElementId::new("Message_045i10y"))
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::WrongKind {
                expected: ElementKind::Gateway,
                actual: ElementKind::Message,
                ..
            }
        ));
    }

    #[test]
    fn test_write_overwrites() {
        let mut store = store();
        store.create(&sample_message()).unwrap();
        let mut updated = sample_message();
        updated.set_state(ElementState::Done);
        store.write(&updated).unwrap();
        let read = store
            .read(ElementKind::Message, &ElementId::new("Message_045i10y"))
            .unwrap();
        assert_eq!(read.state(), ElementState::Done);
    }

    #[test]
    fn test_stored_bytes_are_canonical() {
        let mut store = store();
        store.create(&sample_message()).unwrap();
        let raw = store
            .into_inner()
            .get("Message_045i10y")
            .unwrap()
            .unwrap();
        let expected = CanonicalBytes::new(&sample_message()).unwrap();
        assert_eq!(raw, expected.as_bytes());
    }

    #[test]
    fn test_scan_filters_by_kind_and_skips_reserved_keys() {
        let mut store = store();
        store.create(&sample_message()).unwrap();
        store
            .create(&Gateway::new(ElementId::new("ExclusiveGateway_0hs3ztq"), ElementState::Disabled).into())
            .unwrap();
        store
            .create(&ActionEvent::new(ElementId::new("StartEvent_1jtgn3j"), ElementState::Enabled).into())
            .unwrap();
        store.write_variables(&ProcessVariables::new()).unwrap();
        store.write_sentinel(&ProcessSentinel::initialized()).unwrap();

        let messages = store.scan_all(ElementKind::Message).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id().as_str(), "Message_045i10y");

        let gateways = store.scan_all(ElementKind::Gateway).unwrap();
        assert_eq!(gateways.len(), 1);
    }

    #[test]
    fn test_variables_default_until_written() {
        let mut store = store();
        assert_eq!(store.variables().unwrap(), ProcessVariables::new());
        let mut vars = ProcessVariables::new();
        vars.set_flag(Flag::Confirm, true);
        store.write_variables(&vars).unwrap();
        assert_eq!(store.variables().unwrap(), vars);
    }

    #[test]
    fn test_sentinel_default_until_written() {
        let mut store = store();
        assert!(!store.sentinel().unwrap().initialized);
        store.write_sentinel(&ProcessSentinel::initialized()).unwrap();
        assert!(store.sentinel().unwrap().initialized);
    }
}
