//! Convenience registration, bulk configuration and graph queries.
//!
//! Everything here is expressed through the engine's public surface: these
//! helpers never bypass the checks performed by `add_state`/`add_transition`.

use crate::core::{as_any, MachineResult, State, StateId, StateMachineError, Transition, Trigger};
use crate::machine::StateMachine;
use crate::states::{CompositeState, DelegateState, EmptyState, TimerState};
use std::collections::HashSet;
use std::ops::ControlFlow;
use std::time::Duration;

impl<S: StateId, T: Trigger> StateMachine<S, T> {
    // ---- leaf state registration --------------------------------------

    pub fn add_empty(&mut self, id: S) -> MachineResult<(), S, T> {
        self.add_state(id, EmptyState)
    }

    /// Register a state running the given closures as its hooks.
    pub fn add_with_events<E, U, X>(
        &mut self,
        id: S,
        on_enter: E,
        on_update: U,
        on_exit: X,
    ) -> MachineResult<(), S, T>
    where
        E: FnMut() + 'static,
        U: FnMut() + 'static,
        X: FnMut() + 'static,
    {
        let state = DelegateState::new()
            .on_enter(on_enter)
            .on_update(on_update)
            .on_exit(on_exit);
        self.add_state(id, state)
    }

    pub fn add_with_enter_event<F>(&mut self, id: S, on_enter: F) -> MachineResult<(), S, T>
    where
        F: FnMut() + 'static,
    {
        self.add_state(id, DelegateState::new().on_enter(on_enter))
    }

    pub fn add_with_update_event<F>(&mut self, id: S, on_update: F) -> MachineResult<(), S, T>
    where
        F: FnMut() + 'static,
    {
        self.add_state(id, DelegateState::new().on_update(on_update))
    }

    pub fn add_with_exit_event<F>(&mut self, id: S, on_exit: F) -> MachineResult<(), S, T>
    where
        F: FnMut() + 'static,
    {
        self.add_state(id, DelegateState::new().on_exit(on_exit))
    }

    /// Register a state that calls `on_elapsed` from `update` once `duration`
    /// has passed since it was entered.
    pub fn add_timer_state<F>(
        &mut self,
        id: S,
        duration: Duration,
        on_elapsed: F,
    ) -> MachineResult<(), S, T>
    where
        F: FnMut() + 'static,
    {
        self.add_state(id, TimerState::new(duration, on_elapsed))
    }

    /// Register a state fanning its hooks out to `inner`, in order.
    pub fn add_composite(&mut self, id: S, inner: Vec<Box<dyn State>>) -> MachineResult<(), S, T> {
        self.add_state(id, CompositeState::new(inner))
    }

    /// Register several states at once.
    ///
    /// Either every state is registered or none is: a duplicate id, whether
    /// already registered or repeated within `states`, fails before anything
    /// is added.
    pub fn add_states<I>(&mut self, states: I) -> MachineResult<(), S, T>
    where
        I: IntoIterator<Item = (S, Box<dyn State>)>,
    {
        let states: Vec<(S, Box<dyn State>)> = states.into_iter().collect();
        let mut seen = HashSet::with_capacity(states.len());
        for (id, _) in &states {
            if self.contains_state(id) || !seen.insert(id) {
                return Err(StateMachineError::DuplicateStateId(id.clone()));
            }
        }
        for (id, state) in states {
            self.add_boxed_state(id, state)?;
        }
        Ok(())
    }

    pub fn add_empty_states<I>(&mut self, ids: I) -> MachineResult<(), S, T>
    where
        I: IntoIterator<Item = S>,
    {
        self.add_states(
            ids.into_iter()
                .map(|id| (id, Box::new(EmptyState) as Box<dyn State>)),
        )
    }

    // ---- state queries ------------------------------------------------

    pub fn contains_all<'a, I>(&self, ids: I) -> bool
    where
        I: IntoIterator<Item = &'a S>,
    {
        ids.into_iter().all(|id| self.contains_state(id))
    }

    /// The state under `id` as its concrete type, if it is an `X`.
    pub fn state_as<X: State>(&self, id: &S) -> Option<&X> {
        let slot = self.states.get(id)?;
        as_any(slot.state.as_ref()).downcast_ref::<X>()
    }

    pub fn state_as_mut<X: State>(&mut self, id: &S) -> Option<&mut X> {
        let slot = self.states.get_mut(id)?;
        crate::core::as_any_mut(slot.state.as_mut()).downcast_mut::<X>()
    }

    /// First registered state (in insertion order) of type `X`.
    pub fn first_state_of_type<X: State>(&self) -> Option<&X> {
        self.order.iter().find_map(|id| self.state_as::<X>(id))
    }

    /// Every registered state of type `X`, in insertion order.
    pub fn states_of_type<X: State>(&self) -> Vec<&X> {
        self.order
            .iter()
            .filter_map(|id| self.state_as::<X>(id))
            .collect()
    }

    /// Ids of every registered state of type `X`, in insertion order.
    pub fn state_ids_of_type<X: State>(&self) -> Vec<&S> {
        self.order
            .iter()
            .filter(|id| self.state_as::<X>(id).is_some())
            .collect()
    }

    /// Whether this exact state object is registered, compared by address.
    ///
    /// Zero-sized states such as [`EmptyState`] share one address and have
    /// no identity; they are never reported as registered.
    pub fn contains_state_ref(&self, state: &dyn State) -> bool {
        if std::mem::size_of_val(state) == 0 {
            return false;
        }
        self.states
            .values()
            .any(|slot| std::ptr::addr_eq(slot.state.as_ref(), state))
    }

    /// Visit state ids in insertion order until `visit` breaks.
    pub fn for_each_state<F>(&self, mut visit: F)
    where
        F: FnMut(&S) -> ControlFlow<()>,
    {
        for id in &self.order {
            if visit(id).is_break() {
                return;
            }
        }
    }

    // ---- transition queries -------------------------------------------

    pub fn transitions_with_trigger(&self, trigger: &T) -> Vec<&Transition<S, T>> {
        self.transitions()
            .iter()
            .filter(|t| t.trigger == *trigger)
            .collect()
    }

    pub fn transitions_from(&self, from: &S) -> Vec<&Transition<S, T>> {
        self.transitions()
            .iter()
            .filter(|t| t.from == *from)
            .collect()
    }

    pub fn transitions_to(&self, to: &S) -> Vec<&Transition<S, T>> {
        self.transitions().iter().filter(|t| t.to == *to).collect()
    }

    /// Transitions starting or ending at `id`.
    pub fn transitions_related_to(&self, id: &S) -> Vec<&Transition<S, T>> {
        self.transitions()
            .iter()
            .filter(|t| t.involves(id))
            .collect()
    }

    pub fn contains_transition_with_trigger(&self, trigger: &T) -> bool {
        self.transitions().iter().any(|t| t.trigger == *trigger)
    }

    pub fn contains_transition_from(&self, from: &S) -> bool {
        self.transitions().iter().any(|t| t.from == *from)
    }

    pub fn contains_transition_to(&self, to: &S) -> bool {
        self.transitions().iter().any(|t| t.to == *to)
    }

    pub fn contains_transition_related_to(&self, id: &S) -> bool {
        self.transitions().iter().any(|t| t.involves(id))
    }

    /// Visit transitions in insertion order until `visit` breaks.
    pub fn for_each_transition<F>(&self, mut visit: F)
    where
        F: FnMut(&Transition<S, T>) -> ControlFlow<()>,
    {
        for transition in self.transitions() {
            if visit(transition).is_break() {
                return;
            }
        }
    }

    // ---- bulk transition edits ----------------------------------------

    /// Remove every transition and every guard.
    pub fn remove_all_transitions(&mut self) {
        let transitions: Vec<Transition<S, T>> = self.transitions().to_vec();
        for transition in &transitions {
            // Every entry was just listed, so removal cannot miss.
            let _ = self.remove_transition(transition);
        }
        self.clear_guards();
    }

    /// Remove every transition starting or ending at `id`.
    ///
    /// Returns the number of transitions removed.
    pub fn remove_all_transitions_related_to(&mut self, id: &S) -> usize {
        let related: Vec<Transition<S, T>> = self
            .transitions_related_to(id)
            .into_iter()
            .cloned()
            .collect();
        related
            .iter()
            .filter(|t| self.remove_transition(t).is_ok())
            .count()
    }

    /// Add `(s, trigger, to)` for every registered state `s`, `to` included.
    pub fn from_any(&mut self, trigger: T, to: S) -> MachineResult<(), S, T> {
        self.from_each(trigger, to, true)
    }

    /// Add `(s, trigger, to)` for every registered state `s` other than `to`.
    pub fn from_any_except_target(&mut self, trigger: T, to: S) -> MachineResult<(), S, T> {
        self.from_each(trigger, to, false)
    }

    fn from_each(&mut self, trigger: T, to: S, include_target: bool) -> MachineResult<(), S, T> {
        if !self.contains_state(&to) {
            return Err(StateMachineError::UnknownStateId(to));
        }
        let sources: Vec<S> = self
            .state_ids()
            .iter()
            .filter(|id| include_target || **id != to)
            .cloned()
            .collect();
        for from in sources {
            self.add_transition(Transition::new(from, trigger.clone(), to.clone()))?;
        }
        Ok(())
    }
}

impl<S: StateId> StateMachine<S, S> {
    /// Use state ids as triggers: from every state, the trigger `x` leads
    /// to state `x`, self-loops included.
    pub fn configure_with_states_as_triggers(&mut self) -> MachineResult<(), S, S> {
        self.states_as_triggers(true)
    }

    /// Like [`configure_with_states_as_triggers`](Self::configure_with_states_as_triggers)
    /// without the self-loops.
    pub fn configure_with_states_as_triggers_with_no_reentrant(
        &mut self,
    ) -> MachineResult<(), S, S> {
        self.states_as_triggers(false)
    }

    fn states_as_triggers(&mut self, reentrant: bool) -> MachineResult<(), S, S> {
        let ids: Vec<S> = self.state_ids().to_vec();
        for from in &ids {
            for to in &ids {
                if reentrant || from != to {
                    self.add_transition(Transition::new(from.clone(), to.clone(), to.clone()))?;
                }
            }
        }
        Ok(())
    }
}
