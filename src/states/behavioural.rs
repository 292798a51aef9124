//! States composed of independently attached behaviours.
//!
//! A behavioural state has no logic of its own: each lifecycle hook is
//! forwarded to every attached behaviour in attachment order. Behaviours are
//! shared handles so the host can keep a reference to the instance it
//! attached, and identity (not value) decides whether a behaviour is
//! attached.

use crate::core::State;
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

/// A lifecycle participant attached to a behavioural state.
///
/// Every hook defaults to a no-op.
pub trait Behaviour: Any {
    fn on_enter(&mut self) {}

    fn on_exit(&mut self) {}

    fn on_update(&mut self) {}
}

/// Shared handle to an attached behaviour.
///
/// Two handles refer to the same behaviour when they point at the same
/// allocation (see [`same_behaviour`]).
pub type SharedBehaviour = Rc<RefCell<dyn Behaviour>>;

/// Wrap a behaviour in a shared handle.
pub fn shared<B: Behaviour>(behaviour: B) -> SharedBehaviour {
    Rc::new(RefCell::new(behaviour))
}

/// Identity comparison of behaviour handles.
pub fn same_behaviour(a: &SharedBehaviour, b: &SharedBehaviour) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// Whether the behaviour behind `handle` is a `B`.
pub fn is_behaviour<B: Behaviour>(handle: &SharedBehaviour) -> bool {
    let behaviour = handle.borrow();
    let any: &dyn Any = &*behaviour;
    any.is::<B>()
}

/// A state whose hooks fan out to its behaviours.
///
/// # Example
///
/// ```rust
/// use statecraft::{shared, Behaviour, BehaviouralState, State};
///
/// #[derive(Default)]
/// struct Footsteps {
///     steps: u32,
/// }
///
/// impl Behaviour for Footsteps {
///     fn on_update(&mut self) {
///         self.steps += 1;
///     }
/// }
///
/// let footsteps = std::rc::Rc::new(std::cell::RefCell::new(Footsteps::default()));
/// let mut walking = BehaviouralState::new();
/// walking.attach(footsteps.clone());
/// walking.attach(shared(Footsteps::default()));
///
/// walking.enter();
/// walking.update();
/// assert_eq!(footsteps.borrow().steps, 1);
/// assert_eq!(walking.len(), 2);
/// ```
#[derive(Default)]
pub struct BehaviouralState {
    behaviours: Vec<SharedBehaviour>,
}

impl BehaviouralState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from `behaviours`; repeated handles are attached once.
    pub fn with_behaviours<I>(behaviours: I) -> Self
    where
        I: IntoIterator<Item = SharedBehaviour>,
    {
        let mut state = Self::new();
        for behaviour in behaviours {
            state.attach(behaviour);
        }
        state
    }

    /// Attach a behaviour. Returns `false` if this exact handle is already attached.
    pub fn attach(&mut self, behaviour: SharedBehaviour) -> bool {
        if self.contains(&behaviour) {
            return false;
        }
        self.behaviours.push(behaviour);
        true
    }

    /// Detach a behaviour. Returns whether it was attached.
    pub fn detach(&mut self, behaviour: &SharedBehaviour) -> bool {
        match self
            .behaviours
            .iter()
            .position(|b| same_behaviour(b, behaviour))
        {
            Some(index) => {
                self.behaviours.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, behaviour: &SharedBehaviour) -> bool {
        self.behaviours.iter().any(|b| same_behaviour(b, behaviour))
    }

    pub fn len(&self) -> usize {
        self.behaviours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviours.is_empty()
    }

    /// Attached behaviours in attachment order.
    pub fn behaviours(&self) -> &[SharedBehaviour] {
        &self.behaviours
    }
}

impl State for BehaviouralState {
    fn enter(&mut self) {
        for behaviour in &self.behaviours {
            behaviour.borrow_mut().on_enter();
        }
    }

    fn update(&mut self) {
        for behaviour in &self.behaviours {
            behaviour.borrow_mut().on_update();
        }
    }

    fn exit(&mut self) {
        for behaviour in &self.behaviours {
            behaviour.borrow_mut().on_exit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Tagged {
        tag: &'static str,
        log: Log,
    }

    impl Behaviour for Tagged {
        fn on_enter(&mut self) {
            self.log.borrow_mut().push(format!("{}.enter", self.tag));
        }

        fn on_exit(&mut self) {
            self.log.borrow_mut().push(format!("{}.exit", self.tag));
        }

        fn on_update(&mut self) {
            self.log.borrow_mut().push(format!("{}.update", self.tag));
        }
    }

    struct Inert;

    impl Behaviour for Inert {}

    fn tagged(tag: &'static str, log: &Log) -> SharedBehaviour {
        shared(Tagged {
            tag,
            log: Rc::clone(log),
        })
    }

    #[test]
    fn hooks_fan_out_in_attachment_order() {
        let log: Log = Rc::default();
        let mut state = BehaviouralState::with_behaviours([tagged("a", &log), tagged("b", &log)]);

        state.enter();
        state.update();
        state.exit();

        assert_eq!(
            *log.borrow(),
            vec!["a.enter", "b.enter", "a.update", "b.update", "a.exit", "b.exit"]
        );
    }

    #[test]
    fn attaching_same_handle_twice_is_idempotent() {
        let behaviour = shared(Inert);
        let mut state = BehaviouralState::new();

        assert!(state.attach(Rc::clone(&behaviour)));
        assert!(!state.attach(Rc::clone(&behaviour)));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn equal_values_are_distinct_behaviours() {
        let mut state = BehaviouralState::new();
        state.attach(shared(Inert));
        state.attach(shared(Inert));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn detach_removes_only_that_instance() {
        let first = shared(Inert);
        let second = shared(Inert);
        let mut state = BehaviouralState::with_behaviours([Rc::clone(&first), Rc::clone(&second)]);

        assert!(state.detach(&first));
        assert!(!state.detach(&first));
        assert!(!state.contains(&first));
        assert!(state.contains(&second));
    }

    #[test]
    fn typed_handle_coerces_and_keeps_identity() {
        let concrete = Rc::new(RefCell::new(Inert));
        let handle: SharedBehaviour = concrete.clone();
        let again: SharedBehaviour = concrete;

        assert!(same_behaviour(&handle, &again));
        assert!(is_behaviour::<Inert>(&handle));
        assert!(!is_behaviour::<Tagged>(&handle));
    }
}
