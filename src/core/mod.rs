//! Core state machine types.
//!
//! This module contains the building blocks the engine is made of:
//! - The `State` lifecycle trait and the `StateId`/`Trigger` identifier bounds
//! - `Transition` triples and the `Guard` predicates attached to them
//! - Bounded history of fired transitions
//! - The error taxonomy shared by the engine and its extensions

mod error;
mod guard;
mod history;
mod state;
mod transition;

pub use error::{MachineResult, StateMachineError};
pub use guard::{Guard, GuardId};
pub use history::{TransitionHistory, TransitionRecord};
pub use state::{State, StateId, Trigger};
pub(crate) use state::{as_any, as_any_mut};
pub use transition::Transition;
