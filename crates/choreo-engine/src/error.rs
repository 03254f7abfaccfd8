//! Engine error taxonomy.

use thiserror::Error;

use choreo_core::{CanonicalizationError, ElementId, PartyId};
use choreo_ledger::LedgerError;
use choreo_state::{ElementKind, ElementState, VariableError};

/// Everything an engine command can fail with.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No record exists under the element's key. Also the answer to any
    /// transition attempted before the process was initialized.
    #[error("element {id} not found")]
    NotFound {
        /// The missing element.
        id: ElementId,
    },

    /// A record already exists under the element's key.
    #[error("element {id} already exists")]
    AlreadyExists {
        /// The occupied element id.
        id: ElementId,
    },

    /// The process instance was already seeded.
    #[error("process already initialized")]
    AlreadyInitialized,

    /// The caller is not the declared sender of the message.
    #[error("caller {caller} is not the sender of {id}")]
    Unauthorized {
        /// The message being fired.
        id: ElementId,
        /// The resolved caller.
        caller: PartyId,
    },

    /// The element is not in the state the transition requires.
    #[error("element {id} is {state}, expected ENABLED")]
    InvalidState {
        /// The element being fired.
        id: ElementId,
        /// The state it was found in.
        state: ElementState,
    },

    /// A gateway guard read a flag no transition has written.
    #[error(transparent)]
    UndefinedFlag(#[from] VariableError),

    /// The ledger substrate failed.
    #[error("ledger failure: {0}")]
    Storage(#[from] LedgerError),

    /// A record failed to encode or decode.
    #[error("serialization failure: {detail}")]
    Serialization {
        /// What went wrong.
        detail: String,
    },

    /// The stored record is a different element kind than asked for.
    #[error("element {id} is a {actual}, expected a {expected}")]
    WrongKind {
        /// The element read.
        id: ElementId,
        /// The kind the caller asked for.
        expected: ElementKind,
        /// The kind actually stored.
        actual: ElementKind,
    },

    /// The element id appears nowhere in the process definition.
    #[error("element {id} is not part of the process definition")]
    UnknownElement {
        /// The unrecognized id.
        id: ElementId,
    },
}

impl From<CanonicalizationError> for EngineError {
    fn from(e: CanonicalizationError) -> Self {
        Self::Serialization {
            detail: e.to_string(),
        }
    }
}

impl EngineError {
    /// Wrap a record decode failure.
    pub(crate) fn decode(id: &ElementId, e: serde_json::Error) -> Self {
        Self::Serialization {
            detail: format!("record under {id} failed to decode: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_element() {
        let err = EngineError::NotFound {
            id: ElementId::new("Message_045i10y"),
        };
        assert_eq!(err.to_string(), "element Message_045i10y not found");

        let err = EngineError::InvalidState {
            id: ElementId::new("Message_045i10y"),
            state: ElementState::Done,
        };
        assert_eq!(
            err.to_string(),
            "element Message_045i10y is DONE, expected ENABLED"
        );
    }

    #[test]
    fn test_undefined_flag_passes_through() {
        let err: EngineError = VariableError::Undefined {
            flag: choreo_state::Flag::Confirm,
        }
        .into();
        assert_eq!(err.to_string(), "process variable confirm has not been set");
    }
}
