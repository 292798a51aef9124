//! Errors reported when building a state machine.

use crate::core::{StateId, StateMachineError, Trigger};
use crate::machine::ConfigurationIssue;
use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Error)]
pub enum BuildError<S: StateId, T: Trigger> {
    /// A registration step was rejected by the engine.
    #[error(transparent)]
    Registration(#[from] StateMachineError<S, T>),

    /// The finished machine failed its configuration audit.
    #[error("Configuration audit found {} issue(s)", .0.len())]
    Audit(Vec<ConfigurationIssue<S, T>>),
}
