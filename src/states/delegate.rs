//! State whose hooks are closures.

use crate::core::State;

type Hook = Box<dyn FnMut()>;

/// A state built from optional enter/update/exit closures.
///
/// Missing hooks are no-ops.
///
/// # Example
///
/// ```rust
/// use statecraft::{DelegateState, State};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let ticks = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&ticks);
/// let mut state = DelegateState::new().on_update(move || counter.set(counter.get() + 1));
///
/// state.enter();
/// state.update();
/// state.update();
/// assert_eq!(ticks.get(), 2);
/// ```
#[derive(Default)]
pub struct DelegateState {
    on_enter: Option<Hook>,
    on_update: Option<Hook>,
    on_exit: Option<Hook>,
}

impl DelegateState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_enter<F: FnMut() + 'static>(mut self, hook: F) -> Self {
        self.on_enter = Some(Box::new(hook));
        self
    }

    pub fn on_update<F: FnMut() + 'static>(mut self, hook: F) -> Self {
        self.on_update = Some(Box::new(hook));
        self
    }

    pub fn on_exit<F: FnMut() + 'static>(mut self, hook: F) -> Self {
        self.on_exit = Some(Box::new(hook));
        self
    }
}

impl State for DelegateState {
    fn enter(&mut self) {
        if let Some(hook) = self.on_enter.as_mut() {
            hook();
        }
    }

    fn update(&mut self) {
        if let Some(hook) = self.on_update.as_mut() {
            hook();
        }
    }

    fn exit(&mut self) {
        if let Some(hook) = self.on_exit.as_mut() {
            hook();
        }
    }
}
