//! State fanning its hooks out to inner states.

use crate::core::{as_any, State};

/// Runs each hook on every inner state, in order.
///
/// A panicking inner hook stops the fan-out; later inner states do not run.
#[derive(Default)]
pub struct CompositeState {
    inner: Vec<Box<dyn State>>,
}

impl CompositeState {
    pub fn new(inner: Vec<Box<dyn State>>) -> Self {
        Self { inner }
    }

    pub fn push<X: State>(&mut self, state: X) {
        self.inner.push(Box::new(state));
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub(crate) fn inner(&self) -> &[Box<dyn State>] {
        &self.inner
    }

    /// The inner state at `index` as its concrete type.
    pub fn inner_as<X: State>(&self, index: usize) -> Option<&X> {
        let state = self.inner.get(index)?;
        as_any(state.as_ref()).downcast_ref::<X>()
    }
}

impl State for CompositeState {
    fn enter(&mut self) {
        for state in &mut self.inner {
            state.enter();
        }
    }

    fn update(&mut self) {
        for state in &mut self.inner {
            state.update();
        }
    }

    fn exit(&mut self) {
        for state in &mut self.inner {
            state.exit();
        }
    }
}
