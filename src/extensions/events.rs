//! Event-driven triggering on top of the engine.
//!
//! [`EventDispatcherStateMachine`] owns a [`StateMachine`] and keeps handler
//! lists per state id. [`dispatch`](EventDispatcherStateMachine::dispatch)
//! routes an event to the handlers of the active state. Handlers receive the
//! machine mutably, so a handler may call `trigger` and later handlers in
//! the same pass see the new active state.

use crate::core::{MachineResult, State, StateId, StateMachineError, Trigger};
use crate::machine::StateMachine;
use std::collections::HashMap;
use std::fmt;
use std::ops::{Deref, DerefMut};
use tracing::{debug, trace};

/// Receives events dispatched while its state is active.
///
/// Returning `true` consumes the event and stops the dispatch pass.
pub trait EventHandler<S: StateId, T: Trigger, E> {
    fn handle(&mut self, event: &E, machine: &mut StateMachine<S, T>) -> bool;
}

impl<S, T, E, F> EventHandler<S, T, E> for F
where
    S: StateId,
    T: Trigger,
    F: FnMut(&E, &mut StateMachine<S, T>) -> bool,
{
    fn handle(&mut self, event: &E, machine: &mut StateMachine<S, T>) -> bool {
        self(event, machine)
    }
}

/// Identifies a subscribed handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

struct HandlerEntry<S: StateId, T: Trigger, E> {
    id: HandlerId,
    handler: Box<dyn EventHandler<S, T, E>>,
}

/// Handlers of one state, tagged with the registration they were attached to.
struct HandlerList<S: StateId, T: Trigger, E> {
    registration: u64,
    entries: Vec<HandlerEntry<S, T, E>>,
}

/// A state machine that also routes events to per-state handlers.
///
/// Dereferences to the wrapped [`StateMachine`] for everything but state
/// removal, which also drops the state's handlers.
///
/// # Example
///
/// ```rust
/// use statecraft::{EmptyState, EventDispatcherStateMachine, Transition};
///
/// let mut fsm: EventDispatcherStateMachine<&str, &str, char> =
///     EventDispatcherStateMachine::new();
/// fsm.add_state("closed", EmptyState).unwrap();
/// fsm.add_state("open", EmptyState).unwrap();
/// fsm.add_transition(Transition::new("closed", "open", "open")).unwrap();
/// fsm.set_initial_state("closed").unwrap();
///
/// fsm.subscribe_handler(&"closed", |key, machine| {
///     *key == 'o' && machine.trigger("open").is_ok()
/// })
/// .unwrap();
///
/// assert!(!fsm.dispatch(&'x'));
/// assert!(fsm.dispatch(&'o'));
/// assert!(fsm.is_in_state(&"open"));
/// ```
pub struct EventDispatcherStateMachine<S: StateId, T: Trigger, E: 'static> {
    machine: StateMachine<S, T>,
    handlers: HashMap<S, HandlerList<S, T, E>>,
    next_handler: u64,
}

impl<S: StateId, T: Trigger, E: 'static> EventDispatcherStateMachine<S, T, E> {
    pub fn new() -> Self {
        Self::from(StateMachine::new())
    }

    pub fn machine(&self) -> &StateMachine<S, T> {
        &self.machine
    }

    /// Unwrap the engine, dropping every handler.
    pub fn into_inner(self) -> StateMachine<S, T> {
        self.machine
    }

    /// Remove a state together with its handlers.
    ///
    /// Fails exactly when [`StateMachine::remove_state`] does; handlers are
    /// kept in that case.
    pub fn remove_state(&mut self, id: &S) -> MachineResult<Box<dyn State>, S, T> {
        let state = self.machine.remove_state(id)?;
        if let Some(list) = self.handlers.remove(id) {
            debug!(state = ?id, handlers = list.entries.len(), "handlers dropped with state");
        }
        Ok(state)
    }

    /// Attach a closure handler to `id`.
    pub fn subscribe_handler<F>(&mut self, id: &S, handler: F) -> MachineResult<HandlerId, S, T>
    where
        F: FnMut(&E, &mut StateMachine<S, T>) -> bool + 'static,
    {
        self.subscribe_boxed_handler(id, Box::new(handler))
    }

    /// Attach any [`EventHandler`] to `id`. Handlers run in attachment order.
    pub fn subscribe_boxed_handler(
        &mut self,
        id: &S,
        handler: Box<dyn EventHandler<S, T, E>>,
    ) -> MachineResult<HandlerId, S, T> {
        let handler_id = HandlerId(self.next_handler);
        self.list_mut(id)?.entries.push(HandlerEntry {
            id: handler_id,
            handler,
        });
        self.next_handler += 1;
        debug!(state = ?id, handler = handler_id.0, "handler subscribed");
        Ok(handler_id)
    }

    /// Attach several handlers to `id`, returning their ids in order.
    pub fn subscribe_handlers<I>(
        &mut self,
        id: &S,
        handlers: I,
    ) -> MachineResult<Vec<HandlerId>, S, T>
    where
        I: IntoIterator<Item = Box<dyn EventHandler<S, T, E>>>,
    {
        if !self.machine.contains_state(id) {
            return Err(StateMachineError::UnknownStateId(id.clone()));
        }
        handlers
            .into_iter()
            .map(|handler| self.subscribe_boxed_handler(id, handler))
            .collect()
    }

    /// Detach a handler. Returns `Ok(false)` if it was not attached to `id`.
    pub fn unsubscribe_handler(&mut self, id: &S, handler: HandlerId) -> MachineResult<bool, S, T> {
        let list = self.list_mut(id)?;
        let before = list.entries.len();
        list.entries.retain(|entry| entry.id != handler);
        let removed = list.entries.len() != before;
        if removed {
            debug!(state = ?id, handler = handler.0, "handler unsubscribed");
        }
        Ok(removed)
    }

    pub fn has_handler(&self, id: &S, handler: HandlerId) -> bool {
        self.live_list(id)
            .is_some_and(|list| list.entries.iter().any(|entry| entry.id == handler))
    }

    pub fn handler_count_of(&self, id: &S) -> usize {
        self.live_list(id).map_or(0, |list| list.entries.len())
    }

    /// Deliver `event` to the active state's handlers until one consumes it.
    ///
    /// The handler list is the one of the state active when the call began.
    /// Returns whether a handler consumed the event; `false` without an
    /// active state.
    pub fn dispatch(&mut self, event: &E) -> bool {
        let Some(active) = self.machine.active_state().cloned() else {
            trace!("dispatch without active state");
            return false;
        };
        let registration = self.machine.registration_of(&active);
        let Some(list) = self.handlers.get_mut(&active) else {
            trace!(state = ?active, "no handlers for active state");
            return false;
        };
        if Some(list.registration) != registration {
            self.handlers.remove(&active);
            return false;
        }

        for entry in &mut list.entries {
            if entry.handler.handle(event, &mut self.machine) {
                trace!(state = ?active, handler = entry.id.0, "event consumed");
                return true;
            }
        }
        false
    }

    /// The handler list of `id`, created fresh when the state was registered
    /// again since the list was made. Sweeps every stale list first.
    fn list_mut(&mut self, id: &S) -> MachineResult<&mut HandlerList<S, T, E>, S, T> {
        let registration = self
            .machine
            .registration_of(id)
            .ok_or_else(|| StateMachineError::UnknownStateId(id.clone()))?;
        self.prune_stale();
        Ok(self
            .handlers
            .entry(id.clone())
            .or_insert_with(|| HandlerList {
                registration,
                entries: Vec::new(),
            }))
    }

    /// Drop the lists of states removed or registered again through the
    /// wrapped machine directly.
    fn prune_stale(&mut self) {
        let machine = &self.machine;
        self.handlers.retain(|id, list| {
            let live = machine.registration_of(id) == Some(list.registration);
            if !live {
                trace!(state = ?id, handlers = list.entries.len(), "stale handlers pruned");
            }
            live
        });
    }

    fn live_list(&self, id: &S) -> Option<&HandlerList<S, T, E>> {
        let registration = self.machine.registration_of(id)?;
        self.handlers
            .get(id)
            .filter(|list| list.registration == registration)
    }
}

impl<S: StateId, T: Trigger, E: 'static> From<StateMachine<S, T>>
    for EventDispatcherStateMachine<S, T, E>
{
    fn from(machine: StateMachine<S, T>) -> Self {
        Self {
            machine,
            handlers: HashMap::new(),
            next_handler: 0,
        }
    }
}

impl<S: StateId, T: Trigger, E: 'static> Default for EventDispatcherStateMachine<S, T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StateId, T: Trigger, E: 'static> Deref for EventDispatcherStateMachine<S, T, E> {
    type Target = StateMachine<S, T>;

    fn deref(&self) -> &Self::Target {
        &self.machine
    }
}

impl<S: StateId, T: Trigger, E: 'static> DerefMut for EventDispatcherStateMachine<S, T, E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.machine
    }
}

impl<S: StateId, T: Trigger, E: 'static> fmt::Debug for EventDispatcherStateMachine<S, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers: HashMap<&S, usize> = self
            .handlers
            .iter()
            .map(|(id, list)| (id, list.entries.len()))
            .collect();
        f.debug_struct("EventDispatcherStateMachine")
            .field("machine", &self.machine)
            .field("handlers", &handlers)
            .finish()
    }
}
