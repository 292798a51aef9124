//! Ready-made state implementations.
//!
//! - [`EmptyState`]: no behaviour at all
//! - [`DelegateState`]: closures as hooks
//! - [`TimerState`]: fires a callback after a delay
//! - [`CompositeState`]: fans hooks out to inner states
//! - [`BehaviouralState`]: fans hooks out to attached behaviours
//!
//! The free functions mirror the types' constructors for terse setup code.

mod behavioural;
mod composite;
mod delegate;
mod timer;

pub use behavioural::{
    is_behaviour, same_behaviour, shared, Behaviour, BehaviouralState, SharedBehaviour,
};
pub use composite::CompositeState;
pub use delegate::DelegateState;
pub use timer::TimerState;

use crate::core::State;
use std::time::Duration;

/// A state with no-op hooks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmptyState;

impl State for EmptyState {}

pub fn empty() -> EmptyState {
    EmptyState
}

/// A state running the three closures as its hooks.
pub fn with_events<E, U, X>(on_enter: E, on_update: U, on_exit: X) -> DelegateState
where
    E: FnMut() + 'static,
    U: FnMut() + 'static,
    X: FnMut() + 'static,
{
    DelegateState::new()
        .on_enter(on_enter)
        .on_update(on_update)
        .on_exit(on_exit)
}

pub fn timer<F: FnMut() + 'static>(duration: Duration, on_elapsed: F) -> TimerState {
    TimerState::new(duration, on_elapsed)
}

pub fn composite(inner: Vec<Box<dyn State>>) -> CompositeState {
    CompositeState::new(inner)
}

pub fn with_behaviours<I>(behaviours: I) -> BehaviouralState
where
    I: IntoIterator<Item = SharedBehaviour>,
{
    BehaviouralState::with_behaviours(behaviours)
}
