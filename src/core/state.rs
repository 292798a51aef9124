//! The lifecycle capability implemented by every registered state.
//!
//! States are registered under a host-supplied identifier and driven by the
//! engine: `enter` when a transition lands on them, `update` once per host
//! tick while active, `exit` when a transition leaves them.

use std::any::Any;
use std::fmt::Debug;
use std::hash::Hash;

/// Identifier under which a state is registered.
///
/// Any cloneable, hashable, debuggable value qualifies: enums, integers,
/// strings. The identifier, not the state object, is the registry key.
pub trait StateId: Clone + Eq + Hash + Debug + 'static {}

impl<T> StateId for T where T: Clone + Eq + Hash + Debug + 'static {}

/// Identifier of an external stimulus that may fire a transition.
pub trait Trigger: Clone + Eq + Hash + Debug + 'static {}

impl<T> Trigger for T where T: Clone + Eq + Hash + Debug + 'static {}

/// Lifecycle hooks of a state.
///
/// Every hook defaults to a no-op so a state only implements what it needs.
/// Hooks cannot fail from the engine's point of view: a panic inside a hook
/// unwinds through the engine call that invoked it.
///
/// The `Any` supertrait lets the registry hand back concrete state types
/// (see [`StateMachine::state_as`](crate::StateMachine::state_as)).
///
/// # Example
///
/// ```rust
/// use statecraft::State;
///
/// struct Patrol {
///     waypoint: usize,
/// }
///
/// impl State for Patrol {
///     fn enter(&mut self) {
///         self.waypoint = 0;
///     }
///
///     fn update(&mut self) {
///         self.waypoint = (self.waypoint + 1) % 4;
///     }
/// }
/// ```
pub trait State: Any {
    /// Called once when a transition makes this state active.
    fn enter(&mut self) {}

    /// Called once per engine `update()` while this state is active.
    fn update(&mut self) {}

    /// Called once when a transition leaves this state.
    fn exit(&mut self) {}
}

/// Borrow a type-erased state as `Any` for downcasting.
pub(crate) fn as_any(state: &dyn State) -> &dyn Any {
    state
}

/// Mutable counterpart of [`as_any`].
pub(crate) fn as_any_mut(state: &mut dyn State) -> &mut dyn Any {
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        entered: usize,
        updated: usize,
        exited: usize,
    }

    impl State for Counter {
        fn enter(&mut self) {
            self.entered += 1;
        }

        fn update(&mut self) {
            self.updated += 1;
        }

        fn exit(&mut self) {
            self.exited += 1;
        }
    }

    struct Silent;

    impl State for Silent {}

    #[test]
    fn hooks_run_through_trait_object() {
        let mut state: Box<dyn State> = Box::new(Counter::default());
        state.enter();
        state.update();
        state.update();
        state.exit();

        let counter = as_any(state.as_ref())
            .downcast_ref::<Counter>()
            .expect("counter");
        assert_eq!(counter.entered, 1);
        assert_eq!(counter.updated, 2);
        assert_eq!(counter.exited, 1);
    }

    #[test]
    fn default_hooks_are_noops() {
        let mut state: Box<dyn State> = Box::new(Silent);
        state.enter();
        state.update();
        state.exit();
        assert!(as_any(state.as_ref()).is::<Silent>());
    }

    #[test]
    fn downcast_mut_reaches_concrete_state() {
        let mut state: Box<dyn State> = Box::new(Counter::default());
        if let Some(counter) = as_any_mut(state.as_mut()).downcast_mut::<Counter>() {
            counter.updated = 7;
        }
        let counter = as_any(state.as_ref()).downcast_ref::<Counter>().unwrap();
        assert_eq!(counter.updated, 7);
        assert!(as_any(state.as_ref()).downcast_ref::<Silent>().is_none());
    }
}
