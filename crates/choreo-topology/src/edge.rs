//! Guarded edges between process elements.

use serde::{Deserialize, Serialize};

use choreo_core::ElementId;
use choreo_state::{ElementState, Flag, ProcessVariables, VariableError};

/// Condition deciding whether an edge applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VariableGuard {
    /// Applies unconditionally.
    Always,
    /// Applies when the named flag holds the expected value. Evaluating
    /// against an unset flag is an error, not a false.
    FlagEquals {
        /// The process flag to read.
        flag: Flag,
        /// The value the flag must hold.
        expected: bool,
    },
}

impl VariableGuard {
    /// Shorthand for a `FlagEquals` guard.
    pub fn flag_equals(flag: Flag, expected: bool) -> Self {
        Self::FlagEquals { flag, expected }
    }

    /// Evaluate the guard against the current process variables.
    pub fn evaluate(&self, variables: &ProcessVariables) -> Result<bool, VariableError> {
        match self {
            Self::Always => Ok(true),
            Self::FlagEquals { flag, expected } => {
                Ok(variables.get_flag(*flag)? == *expected)
            }
        }
    }

    /// Whether this guard reads a process flag.
    pub fn is_conditional(&self) -> bool {
        matches!(self, Self::FlagEquals { .. })
    }
}

/// One outgoing edge of a node.
///
/// When the edge applies, the target element is put into `target_state`.
/// That is almost always `Enabled`; the payment/cancel race resolves by
/// one edge forcing the losing message to `Disabled`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// The element this edge feeds.
    pub target: ElementId,
    /// The state the target takes when the edge applies.
    pub target_state: ElementState,
    /// Condition for the edge to apply.
    pub guard: VariableGuard,
}

impl Edge {
    /// An unconditional edge enabling its target.
    pub fn enables(target: impl Into<ElementId>) -> Self {
        Self {
            target: target.into(),
            target_state: ElementState::Enabled,
            guard: VariableGuard::Always,
        }
    }

    /// An unconditional edge disabling its target.
    pub fn disables(target: impl Into<ElementId>) -> Self {
        Self {
            target: target.into(),
            target_state: ElementState::Disabled,
            guard: VariableGuard::Always,
        }
    }

    /// An edge enabling its target only when the flag matches.
    pub fn enables_when(target: impl Into<ElementId>, flag: Flag, expected: bool) -> Self {
        Self {
            target: target.into(),
            target_state: ElementState::Enabled,
            guard: VariableGuard::flag_equals(flag, expected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_always_guard_holds_without_variables() {
        let vars = ProcessVariables::new();
        assert_eq!(VariableGuard::Always.evaluate(&vars), Ok(true));
    }

    #[test]
    fn test_flag_guard_matches_value() {
        let mut vars = ProcessVariables::new();
        vars.set_flag(Flag::Confirm, true);
        let guard = VariableGuard::flag_equals(Flag::Confirm, true);
        assert_eq!(guard.evaluate(&vars), Ok(true));
        let guard = VariableGuard::flag_equals(Flag::Confirm, false);
        assert_eq!(guard.evaluate(&vars), Ok(false));
    }

    #[test]
    fn test_flag_guard_on_unset_flag_is_an_error() {
        let vars = ProcessVariables::new();
        let guard = VariableGuard::flag_equals(Flag::Cancel, true);
        assert_eq!(
            guard.evaluate(&vars),
            Err(VariableError::Undefined { flag: Flag::Cancel })
        );
    }

    #[test]
    fn test_edge_constructors() {
        let e = Edge::enables("Message_045i10y");
        assert_eq!(e.target_state, ElementState::Enabled);
        assert_eq!(e.guard, VariableGuard::Always);

        let d = Edge::disables("Message_1xm9dxy");
        assert_eq!(d.target_state, ElementState::Disabled);

        let c = Edge::enables_when("Message_1em0ee4", Flag::Confirm, true);
        assert!(c.guard.is_conditional());
    }

    #[test]
    fn test_guard_serde_tagging() {
        let json = serde_json::to_value(VariableGuard::flag_equals(Flag::Cancel, false)).unwrap();
        assert_eq!(json["type"], "flag_equals");
        assert_eq!(json["flag"], "cancel");
        assert_eq!(json["expected"], false);

        let always: VariableGuard = serde_json::from_value(
            serde_json::json!({ "type": "always" }),
        )
        .unwrap();
        assert_eq!(always, VariableGuard::Always);
    }
}
