//! Behaviour composition on top of the engine.
//!
//! Behaviours live inside [`BehaviouralState`]s registered in the machine.
//! The operations below address them through the state id, and the global
//! queries walk every behavioural state in registration order, including
//! those nested inside a [`CompositeState`]. Removing a behavioural state
//! drops its behaviours with it.

use crate::core::{
    as_any, as_any_mut, MachineResult, State, StateId, StateMachineError, Trigger,
};
use crate::machine::StateMachine;
use crate::states::{is_behaviour, Behaviour, BehaviouralState, CompositeState, SharedBehaviour};
use std::ops::ControlFlow;
use tracing::debug;

impl<S: StateId, T: Trigger> StateMachine<S, T> {
    /// Register a behavioural state made of `behaviours`.
    pub fn add_with_behaviours<I>(&mut self, id: S, behaviours: I) -> MachineResult<(), S, T>
    where
        I: IntoIterator<Item = SharedBehaviour>,
    {
        self.add_state(id, BehaviouralState::with_behaviours(behaviours))
    }

    /// Attach a behaviour to the behavioural state `id`.
    ///
    /// Fails with `NullBehaviour` on an empty handle. Attaching a handle that
    /// is already attached to this state is a no-op returning `Ok(false)`.
    pub fn attach_behaviour(
        &mut self,
        id: &S,
        behaviour: impl Into<Option<SharedBehaviour>>,
    ) -> MachineResult<bool, S, T> {
        let behaviour = behaviour.into().ok_or(StateMachineError::NullBehaviour)?;
        let attached = self.behavioural_mut(id)?.attach(behaviour);
        if attached {
            debug!(state = ?id, "behaviour attached");
        }
        Ok(attached)
    }

    /// Attach several behaviours.
    ///
    /// Every handle is checked first: one empty handle fails the whole call
    /// before anything is attached. Returns how many were newly attached.
    pub fn attach_behaviours<I>(&mut self, id: &S, behaviours: I) -> MachineResult<usize, S, T>
    where
        I: IntoIterator,
        I::Item: Into<Option<SharedBehaviour>>,
    {
        let behaviours: Vec<SharedBehaviour> = behaviours
            .into_iter()
            .map(Into::into)
            .collect::<Option<_>>()
            .ok_or(StateMachineError::NullBehaviour)?;
        let state = self.behavioural_mut(id)?;
        let mut attached = 0;
        for behaviour in behaviours {
            if state.attach(behaviour) {
                attached += 1;
            }
        }
        debug!(state = ?id, attached, "behaviours attached");
        Ok(attached)
    }

    /// Detach a behaviour from the behavioural state `id`.
    ///
    /// Fails with `NullBehaviour` on an empty handle. Detaching a behaviour
    /// that is not attached returns `Ok(false)`.
    pub fn detach_behaviour(
        &mut self,
        id: &S,
        behaviour: impl Into<Option<SharedBehaviour>>,
    ) -> MachineResult<bool, S, T> {
        let behaviour = behaviour.into().ok_or(StateMachineError::NullBehaviour)?;
        let detached = self.behavioural_mut(id)?.detach(&behaviour);
        if detached {
            debug!(state = ?id, "behaviour detached");
        }
        Ok(detached)
    }

    /// Whether `behaviour` is attached to any state.
    pub fn contains_behaviour(&self, behaviour: &SharedBehaviour) -> bool {
        self.behavioural_states().any(|(_, s)| s.contains(behaviour))
    }

    /// Whether `behaviour` is attached to the state `id`.
    pub fn contains_behaviour_on(&self, id: &S, behaviour: &SharedBehaviour) -> bool {
        self.behavioural(id)
            .is_ok_and(|state| state.contains(behaviour))
    }

    /// Number of behaviours attached across all states.
    pub fn behaviour_count(&self) -> usize {
        self.behavioural_states().map(|(_, s)| s.len()).sum()
    }

    /// Number of behaviours attached to `id`; zero for unknown or
    /// non-behavioural states.
    pub fn behaviour_count_of(&self, id: &S) -> usize {
        self.behavioural(id).map_or(0, BehaviouralState::len)
    }

    /// Visit every attached behaviour, state by state, until `visit` breaks.
    pub fn for_each_behaviour<F>(&self, mut visit: F)
    where
        F: FnMut(&SharedBehaviour) -> ControlFlow<()>,
    {
        for (_, state) in self.behavioural_states() {
            for behaviour in state.behaviours() {
                if visit(behaviour).is_break() {
                    return;
                }
            }
        }
    }

    /// Visit the behaviours of `id` until `visit` breaks.
    pub fn for_each_behaviour_on<F>(&self, id: &S, mut visit: F) -> MachineResult<(), S, T>
    where
        F: FnMut(&SharedBehaviour) -> ControlFlow<()>,
    {
        for behaviour in self.behavioural(id)?.behaviours() {
            if visit(behaviour).is_break() {
                break;
            }
        }
        Ok(())
    }

    /// Every attached behaviour of type `B`.
    pub fn behaviours_of_type<B: Behaviour>(&self) -> Vec<SharedBehaviour> {
        self.behavioural_states()
            .flat_map(|(_, s)| s.behaviours())
            .filter(|b| is_behaviour::<B>(b))
            .cloned()
            .collect()
    }

    /// First attached behaviour of type `B`.
    pub fn first_behaviour_of_type<B: Behaviour>(&self) -> Option<SharedBehaviour> {
        self.behavioural_states()
            .flat_map(|(_, s)| s.behaviours())
            .find(|b| is_behaviour::<B>(b))
            .cloned()
    }

    /// Behaviours of type `B` attached to `id`.
    pub fn behaviours_of_type_on<B: Behaviour>(
        &self,
        id: &S,
    ) -> MachineResult<Vec<SharedBehaviour>, S, T> {
        Ok(self
            .behavioural(id)?
            .behaviours()
            .iter()
            .filter(|b| is_behaviour::<B>(b))
            .cloned()
            .collect())
    }

    fn behavioural(&self, id: &S) -> MachineResult<&BehaviouralState, S, T> {
        let slot = self
            .states
            .get(id)
            .ok_or_else(|| StateMachineError::UnknownStateId(id.clone()))?;
        as_any(slot.state.as_ref())
            .downcast_ref::<BehaviouralState>()
            .ok_or_else(|| StateMachineError::NotBehavioural(id.clone()))
    }

    fn behavioural_mut(&mut self, id: &S) -> MachineResult<&mut BehaviouralState, S, T> {
        let slot = self
            .states
            .get_mut(id)
            .ok_or_else(|| StateMachineError::UnknownStateId(id.clone()))?;
        as_any_mut(slot.state.as_mut())
            .downcast_mut::<BehaviouralState>()
            .ok_or_else(|| StateMachineError::NotBehavioural(id.clone()))
    }

    fn behavioural_states(&self) -> impl Iterator<Item = (&S, &BehaviouralState)> {
        self.order.iter().flat_map(|id| {
            let mut found = Vec::new();
            if let Some(slot) = self.states.get(id) {
                collect_behavioural(slot.state.as_ref(), &mut found);
            }
            found.into_iter().map(move |state| (id, state))
        })
    }
}

/// Behavioural states reachable from `state`, descending into composites.
fn collect_behavioural<'a>(state: &'a dyn State, found: &mut Vec<&'a BehaviouralState>) {
    let any = as_any(state);
    if let Some(behavioural) = any.downcast_ref::<BehaviouralState>() {
        found.push(behavioural);
    } else if let Some(composite) = any.downcast_ref::<CompositeState>() {
        for inner in composite.inner() {
            collect_behavioural(inner.as_ref(), found);
        }
    }
}
