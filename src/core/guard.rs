//! Guard predicates for controlling transition eligibility.
//!
//! Guards are attached to a registered transition and evaluated every time
//! that transition is a candidate for a trigger. A transition without guards
//! is always eligible; with several guards it is eligible only when all of
//! them pass.

use super::transition::Transition;

/// Handle identifying a guard attached to a transition.
///
/// Issued by [`StateMachine::add_guard`](crate::StateMachine::add_guard) and
/// used to remove that exact guard later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GuardId(pub(crate) u64);

/// Predicate that decides whether a candidate transition may fire.
///
/// Predicates should be side-effect free: the engine may evaluate them for
/// candidates that end up not firing (for example when a trigger turns out
/// to be ambiguous). Host context is captured by the closure.
///
/// # Example
///
/// ```rust
/// use statecraft::{Guard, Transition};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let has_key = Rc::new(Cell::new(false));
/// let flag = Rc::clone(&has_key);
/// let guard = Guard::new(move |_t: &Transition<&str, &str>| flag.get());
///
/// let unlock = Transition::new("locked", "use_key", "closed");
/// assert!(!guard.check(&unlock));
/// has_key.set(true);
/// assert!(guard.check(&unlock));
/// ```
pub struct Guard<S, T> {
    predicate: Box<dyn Fn(&Transition<S, T>) -> bool>,
}

impl<S, T> Guard<S, T> {
    /// Create a guard from a predicate over the candidate transition.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Transition<S, T>) -> bool + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the guard against a candidate transition.
    pub fn check(&self, transition: &Transition<S, T>) -> bool {
        (self.predicate)(transition)
    }
}

impl<S, T> std::fmt::Debug for Guard<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
