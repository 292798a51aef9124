//! Errors reported by the state machine engine and its extensions.

use super::state::{StateId, Trigger};
use super::transition::Transition;
use thiserror::Error;

/// Errors that can occur when configuring or driving a state machine.
///
/// Every variant except [`NoValidTransition`](Self::NoValidTransition)
/// signals a programming or configuration defect. `NoValidTransition` is the
/// routine outcome of a trigger the current state does not react to; hosts
/// commonly ignore it (see [`is_soft`](Self::is_soft)).
#[derive(Debug, Error)]
pub enum StateMachineError<S: StateId, T: Trigger> {
    #[error("State id {0:?} is already registered")]
    DuplicateStateId(S),

    #[error("State id {0:?} is not registered")]
    UnknownStateId(S),

    #[error("State {state:?} is still referenced by {transitions} transition(s). Remove them before removing the state")]
    StateHasTransitions { state: S, transitions: usize },

    #[error("State {0:?} is the active state and cannot be removed")]
    StateIsActive(S),

    #[error("Transition {0:?} is not registered")]
    UnknownTransition(Transition<S, T>),

    #[error("Behaviour handle is empty")]
    NullBehaviour,

    #[error("State {0:?} is not a behavioural state")]
    NotBehavioural(S),

    #[error("No active state to resolve trigger {0:?} from. Call set_initial_state first")]
    NoActiveState(T),

    #[error("No valid transition from {from:?} on trigger {trigger:?}")]
    NoValidTransition { from: S, trigger: T },

    #[error("Multiple valid transitions from {from:?} on trigger {trigger:?} (candidates: {candidates:?}). Check the guard conditions of these transitions")]
    AmbiguousTransition {
        from: S,
        trigger: T,
        candidates: Vec<S>,
    },
}

impl<S: StateId, T: Trigger> StateMachineError<S, T> {
    /// Whether this is the expected, ignorable outcome of an unmatched trigger.
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::NoValidTransition { .. })
    }
}

/// Result type used throughout the engine.
pub type MachineResult<R, S, T> = Result<R, StateMachineError<S, T>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_no_valid_transition_is_soft() {
        let soft: StateMachineError<&str, &str> = StateMachineError::NoValidTransition {
            from: "idle",
            trigger: "jump",
        };
        assert!(soft.is_soft());

        let hard: StateMachineError<&str, &str> = StateMachineError::AmbiguousTransition {
            from: "idle",
            trigger: "jump",
            candidates: vec!["air", "ledge"],
        };
        assert!(!hard.is_soft());
        assert!(!StateMachineError::<&str, &str>::NullBehaviour.is_soft());
    }

    #[test]
    fn ambiguity_message_lists_candidates() {
        let err: StateMachineError<&str, &str> = StateMachineError::AmbiguousTransition {
            from: "idle",
            trigger: "jump",
            candidates: vec!["air", "ledge"],
        };
        let message = err.to_string();
        assert!(message.contains("\"idle\""));
        assert!(message.contains("\"jump\""));
        assert!(message.contains("[\"air\", \"ledge\"]"));
    }

    #[test]
    fn state_has_transitions_reports_count() {
        let err: StateMachineError<u32, u32> = StateMachineError::StateHasTransitions {
            state: 4,
            transitions: 2,
        };
        assert_eq!(
            err.to_string(),
            "State 4 is still referenced by 2 transition(s). Remove them before removing the state"
        );
    }
}
