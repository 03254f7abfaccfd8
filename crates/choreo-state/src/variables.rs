//! Process-scoped variables and the initialization sentinel.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named boolean process flag.
///
/// Flags are written by message transitions and read by exclusive
/// gateways when picking an outgoing edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    /// Whether the hotel confirmed room availability.
    Confirm,
    /// Whether the client's payment carried a cancellation request.
    Cancel,
}

impl Flag {
    /// The flag's canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Confirm => "confirm",
            Self::Cancel => "cancel",
        }
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Raised when a guard reads a flag no transition has written yet.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VariableError {
    /// The flag has no recorded value.
    #[error("process variable {flag} has not been set")]
    Undefined {
        /// The flag the guard asked for.
        flag: Flag,
    },
}

/// The cross-transaction memory of the running process instance.
///
/// Persisted as its own ledger record so every executor evaluates
/// gateway guards against the same values, not against whatever a
/// single node happened to cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessVariables {
    /// Value of [`Flag::Confirm`], once written.
    pub confirm: Option<bool>,
    /// Value of [`Flag::Cancel`], once written.
    pub cancel: Option<bool>,
}

impl ProcessVariables {
    /// Fresh variables with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a flag value. Later writes overwrite earlier ones; the
    /// retry loop re-writes `confirm` on every availability answer.
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        match flag {
            Flag::Confirm => self.confirm = Some(value),
            Flag::Cancel => self.cancel = Some(value),
        }
    }

    /// Read a flag value, failing if it was never written.
    pub fn get_flag(&self, flag: Flag) -> Result<bool, VariableError> {
        let value = match flag {
            Flag::Confirm => self.confirm,
            Flag::Cancel => self.cancel,
        };
        value.ok_or(VariableError::Undefined { flag })
    }
}

/// One-shot marker proving the instance has been seeded.
///
/// Stored under a reserved key so a second `initialize` can be refused
/// instead of silently resetting a live process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSentinel {
    /// Set to true by the first successful initialization.
    pub initialized: bool,
}

impl ProcessSentinel {
    /// The sentinel as written by a successful initialization.
    pub fn initialized() -> Self {
        Self { initialized: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_flag_is_an_error() {
        let vars = ProcessVariables::new();
        assert_eq!(
            vars.get_flag(Flag::Confirm),
            Err(VariableError::Undefined {
                flag: Flag::Confirm
            })
        );
    }

    #[test]
    fn test_set_then_get() {
        let mut vars = ProcessVariables::new();
        vars.set_flag(Flag::Confirm, false);
        vars.set_flag(Flag::Cancel, true);
        assert_eq!(vars.get_flag(Flag::Confirm), Ok(false));
        assert_eq!(vars.get_flag(Flag::Cancel), Ok(true));
    }

    #[test]
    fn test_rewrite_overwrites() {
        let mut vars = ProcessVariables::new();
        vars.set_flag(Flag::Confirm, false);
        vars.set_flag(Flag::Confirm, true);
        assert_eq!(vars.get_flag(Flag::Confirm), Ok(true));
    }

    #[test]
    fn test_error_message_names_the_flag() {
        let err = VariableError::Undefined { flag: Flag::Cancel };
        assert_eq!(err.to_string(), "process variable cancel has not been set");
    }

    #[test]
    fn test_variables_roundtrip() {
        let mut vars = ProcessVariables::new();
        vars.set_flag(Flag::Cancel, false);
        let json = serde_json::to_string(&vars).unwrap();
        let parsed: ProcessVariables = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vars);
    }

    #[test]
    fn test_sentinel_constructor() {
        assert!(ProcessSentinel::initialized().initialized);
        assert!(!ProcessSentinel::default().initialized);
    }
}
