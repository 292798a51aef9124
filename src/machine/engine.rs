//! The state registry, transition graph and trigger resolution.

use crate::core::{
    Guard, GuardId, MachineResult, State, StateId, StateMachineError, Transition,
    TransitionHistory, TransitionRecord, Trigger,
};
use crate::machine::config::MachineConfig;
use chrono::Utc;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace, warn};

/// A registered state together with the registration it belongs to.
///
/// `registration` is unique for every `add_state` call, so extensions can
/// tell a re-registered id apart from the state they attached to.
pub(crate) struct StateSlot {
    pub(crate) state: Box<dyn State>,
    pub(crate) registration: u64,
}

/// Flat finite state machine over host-supplied state ids and triggers.
///
/// The machine owns every registered state object, the set of transitions
/// between them and the guards attached to those transitions. At most one
/// state is active at a time.
///
/// # Example
///
/// ```rust
/// use statecraft::{EmptyState, StateMachine, Transition};
///
/// let mut fsm: StateMachine<&str, &str> = StateMachine::new();
/// fsm.add_state("idle", EmptyState).unwrap();
/// fsm.add_state("walking", EmptyState).unwrap();
/// fsm.add_transition(Transition::new("idle", "move", "walking")).unwrap();
/// fsm.set_initial_state("idle").unwrap();
///
/// fsm.trigger("move").unwrap();
/// assert!(fsm.is_in_state(&"walking"));
///
/// // Unmatched triggers are a soft failure.
/// let err = fsm.trigger("move").unwrap_err();
/// assert!(err.is_soft());
/// ```
pub struct StateMachine<S: StateId, T: Trigger> {
    pub(crate) states: HashMap<S, StateSlot>,
    pub(crate) order: Vec<S>,
    transitions: Vec<Transition<S, T>>,
    guards: HashMap<Transition<S, T>, Vec<(GuardId, Guard<S, T>)>>,
    initial: Option<S>,
    active: Option<S>,
    history: TransitionHistory<S, T>,
    next_registration: u64,
    next_guard: u64,
}

impl<S: StateId, T: Trigger> StateMachine<S, T> {
    /// Create an empty machine with default options.
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    /// Create an empty machine with the given options.
    pub fn with_config(config: MachineConfig) -> Self {
        Self {
            states: HashMap::new(),
            order: Vec::new(),
            transitions: Vec::new(),
            guards: HashMap::new(),
            initial: None,
            active: None,
            history: TransitionHistory::new(config.history_limit),
            next_registration: 0,
            next_guard: 0,
        }
    }

    // ---- states -------------------------------------------------------

    /// Register `state` under `id`. No lifecycle hook runs.
    ///
    /// Fails with `DuplicateStateId` if `id` is taken, leaving the existing
    /// state in place.
    pub fn add_state<X: State>(&mut self, id: S, state: X) -> MachineResult<(), S, T> {
        self.add_boxed_state(id, Box::new(state))
    }

    /// Register an already boxed state under `id`.
    pub fn add_boxed_state(&mut self, id: S, state: Box<dyn State>) -> MachineResult<(), S, T> {
        if self.states.contains_key(&id) {
            return Err(StateMachineError::DuplicateStateId(id));
        }
        let registration = self.next_registration;
        self.next_registration += 1;
        debug!(state = ?id, "state added");
        self.order.push(id.clone());
        self.states.insert(
            id,
            StateSlot {
                state,
                registration,
            },
        );
        Ok(())
    }

    /// Remove the state registered under `id` and hand it back.
    ///
    /// Transitions are never removed implicitly: while any transition starts
    /// or ends at `id` this fails with `StateHasTransitions`. The active state
    /// cannot be removed either.
    pub fn remove_state(&mut self, id: &S) -> MachineResult<Box<dyn State>, S, T> {
        if !self.states.contains_key(id) {
            return Err(StateMachineError::UnknownStateId(id.clone()));
        }
        let referencing = self.transitions.iter().filter(|t| t.involves(id)).count();
        if referencing > 0 {
            return Err(StateMachineError::StateHasTransitions {
                state: id.clone(),
                transitions: referencing,
            });
        }
        if self.active.as_ref() == Some(id) {
            return Err(StateMachineError::StateIsActive(id.clone()));
        }

        let slot = self
            .states
            .remove(id)
            .ok_or_else(|| StateMachineError::UnknownStateId(id.clone()))?;
        self.order.retain(|s| s != id);
        if self.initial.as_ref() == Some(id) {
            self.initial = None;
        }
        debug!(state = ?id, "state removed");
        Ok(slot.state)
    }

    /// Whether a state is registered under `id`.
    pub fn contains_state(&self, id: &S) -> bool {
        self.states.contains_key(id)
    }

    /// Number of registered states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Registered state ids in insertion order.
    pub fn state_ids(&self) -> &[S] {
        &self.order
    }

    /// The state object registered under `id`.
    pub fn get_state(&self, id: &S) -> MachineResult<&dyn State, S, T> {
        self.states
            .get(id)
            .map(|slot| slot.state.as_ref())
            .ok_or_else(|| StateMachineError::UnknownStateId(id.clone()))
    }

    /// Mutable access to the state object registered under `id`.
    pub fn get_state_mut(&mut self, id: &S) -> MachineResult<&mut dyn State, S, T> {
        match self.states.get_mut(id) {
            Some(slot) => Ok(slot.state.as_mut()),
            None => Err(StateMachineError::UnknownStateId(id.clone())),
        }
    }

    pub(crate) fn registration_of(&self, id: &S) -> Option<u64> {
        self.states.get(id).map(|slot| slot.registration)
    }

    /// Make `id` the active state without running its `enter` hook.
    ///
    /// The initial state is considered already entered when the host starts
    /// driving the machine.
    pub fn set_initial_state(&mut self, id: S) -> MachineResult<(), S, T> {
        if !self.states.contains_key(&id) {
            return Err(StateMachineError::UnknownStateId(id));
        }
        debug!(state = ?id, "initial state set");
        self.initial = Some(id.clone());
        self.active = Some(id);
        Ok(())
    }

    /// The state last passed to [`set_initial_state`](Self::set_initial_state).
    pub fn initial_state(&self) -> Option<&S> {
        self.initial.as_ref()
    }

    /// The current state, if an initial state was set.
    pub fn active_state(&self) -> Option<&S> {
        self.active.as_ref()
    }

    /// Whether `id` is the active state.
    pub fn is_in_state(&self, id: &S) -> bool {
        self.active.as_ref() == Some(id)
    }

    // ---- transitions --------------------------------------------------

    /// Register a transition.
    ///
    /// Both endpoints must be registered. Adding a transition that is already
    /// present changes nothing and returns `Ok(false)`. Several transitions
    /// may leave the same state on the same trigger; ambiguity is only
    /// reported when such a trigger fires.
    pub fn add_transition(
        &mut self,
        transition: impl Into<Transition<S, T>>,
    ) -> MachineResult<bool, S, T> {
        let transition = transition.into();
        for endpoint in [&transition.from, &transition.to] {
            if !self.states.contains_key(endpoint) {
                return Err(StateMachineError::UnknownStateId(endpoint.clone()));
            }
        }
        if self.transitions.contains(&transition) {
            return Ok(false);
        }
        debug!(
            from = ?transition.from,
            trigger = ?transition.trigger,
            to = ?transition.to,
            "transition added"
        );
        self.transitions.push(transition);
        Ok(true)
    }

    /// Remove a transition together with its guards.
    pub fn remove_transition(&mut self, transition: &Transition<S, T>) -> MachineResult<(), S, T> {
        let index = self
            .transitions
            .iter()
            .position(|t| t == transition)
            .ok_or_else(|| StateMachineError::UnknownTransition(transition.clone()))?;
        let removed = self.transitions.remove(index);
        self.guards.remove(&removed);
        debug!(
            from = ?removed.from,
            trigger = ?removed.trigger,
            to = ?removed.to,
            "transition removed"
        );
        Ok(())
    }

    /// Whether an equal transition is registered.
    pub fn contains_transition(&self, transition: &Transition<S, T>) -> bool {
        self.transitions.contains(transition)
    }

    /// Number of registered transitions.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Registered transitions in insertion order.
    pub fn transitions(&self) -> &[Transition<S, T>] {
        &self.transitions
    }

    // ---- guards -------------------------------------------------------

    /// Attach a guard to a registered transition.
    ///
    /// A transition is eligible only when every one of its guards passes.
    pub fn add_guard<F>(
        &mut self,
        transition: &Transition<S, T>,
        predicate: F,
    ) -> MachineResult<GuardId, S, T>
    where
        F: Fn(&Transition<S, T>) -> bool + 'static,
    {
        if !self.transitions.contains(transition) {
            return Err(StateMachineError::UnknownTransition(transition.clone()));
        }
        let id = GuardId(self.next_guard);
        self.next_guard += 1;
        self.guards
            .entry(transition.clone())
            .or_default()
            .push((id, Guard::new(predicate)));
        Ok(id)
    }

    /// Detach a guard. Returns whether it was attached to `transition`.
    pub fn remove_guard(&mut self, transition: &Transition<S, T>, guard: GuardId) -> bool {
        let Some(guards) = self.guards.get_mut(transition) else {
            return false;
        };
        let before = guards.len();
        guards.retain(|(id, _)| *id != guard);
        let removed = guards.len() != before;
        if guards.is_empty() {
            self.guards.remove(transition);
        }
        removed
    }

    pub fn guard_count(&self, transition: &Transition<S, T>) -> usize {
        self.guards.get(transition).map_or(0, Vec::len)
    }

    pub(crate) fn clear_guards(&mut self) {
        self.guards.clear();
    }

    fn passes_guards(&self, transition: &Transition<S, T>) -> bool {
        self.guards
            .get(transition)
            .is_none_or(|guards| guards.iter().all(|(_, g)| g.check(transition)))
    }

    // ---- driving ------------------------------------------------------

    /// Fire `trigger` from the active state.
    ///
    /// Every transition leaving the active state on `trigger` is collected
    /// and filtered through its guards before anything changes. With exactly
    /// one eligible candidate the active state runs `exit`, the candidate's
    /// target becomes active and runs `enter`; self-loops run both hooks too.
    /// Returns the transition that fired.
    ///
    /// Fails with `NoValidTransition` when nothing is eligible and with
    /// `AmbiguousTransition` when more than one candidate is. In both cases
    /// no hook has run and the active state is unchanged.
    pub fn trigger(&mut self, trigger: T) -> MachineResult<Transition<S, T>, S, T> {
        let Some(from) = self.active.clone() else {
            return Err(StateMachineError::NoActiveState(trigger));
        };
        let selected = self.resolve(from, trigger)?;
        self.fire(selected)
    }

    fn resolve(&self, from: S, trigger: T) -> MachineResult<Transition<S, T>, S, T> {
        let candidates: Vec<&Transition<S, T>> = self
            .transitions
            .iter()
            .filter(|t| t.leaves(&from, &trigger))
            .collect();
        if candidates.is_empty() {
            trace!(state = ?from, trigger = ?trigger, "no transition for trigger");
            return Err(StateMachineError::NoValidTransition { from, trigger });
        }

        let eligible: Vec<&Transition<S, T>> = candidates
            .into_iter()
            .filter(|t| self.passes_guards(t))
            .collect();

        match eligible.as_slice() {
            [] => {
                trace!(state = ?from, trigger = ?trigger, "guards rejected every candidate");
                Err(StateMachineError::NoValidTransition { from, trigger })
            }
            [selected] => Ok((*selected).clone()),
            many => {
                let candidates: Vec<S> = many.iter().map(|t| t.to.clone()).collect();
                warn!(
                    state = ?from,
                    trigger = ?trigger,
                    candidates = ?candidates,
                    "ambiguous trigger"
                );
                Err(StateMachineError::AmbiguousTransition {
                    from,
                    trigger,
                    candidates,
                })
            }
        }
    }

    fn fire(&mut self, transition: Transition<S, T>) -> MachineResult<Transition<S, T>, S, T> {
        self.get_state_mut(&transition.from)?.exit();
        self.active = Some(transition.to.clone());
        self.get_state_mut(&transition.to)?.enter();

        debug!(
            from = ?transition.from,
            trigger = ?transition.trigger,
            to = ?transition.to,
            "transition fired"
        );
        self.history.record(TransitionRecord {
            from: transition.from.clone(),
            trigger: transition.trigger.clone(),
            to: transition.to.clone(),
            timestamp: Utc::now(),
        });
        Ok(transition)
    }

    /// Run the active state's `update` hook once. No-op without an active state.
    pub fn update(&mut self) {
        let Some(active) = &self.active else {
            trace!("update without active state");
            return;
        };
        if let Some(slot) = self.states.get_mut(active) {
            slot.state.update();
        }
    }

    /// Transitions fired so far, bounded by the configured history limit.
    pub fn history(&self) -> &TransitionHistory<S, T> {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl<S: StateId, T: Trigger> Default for StateMachine<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StateId, T: Trigger> fmt::Debug for StateMachine<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("states", &self.order)
            .field("transitions", &self.transitions)
            .field("initial", &self.initial)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::EmptyState;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Mode {
        Idle,
        Walk,
        Run,
        Jump,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Input {
        Move,
        Sprint,
        Stop,
        Hop,
    }

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recording {
        name: &'static str,
        log: Log,
    }

    impl State for Recording {
        fn enter(&mut self) {
            self.log.borrow_mut().push(format!("enter {}", self.name));
        }

        fn update(&mut self) {
            self.log.borrow_mut().push(format!("update {}", self.name));
        }

        fn exit(&mut self) {
            self.log.borrow_mut().push(format!("exit {}", self.name));
        }
    }

    fn recording_machine() -> (StateMachine<Mode, Input>, Log) {
        let log: Log = Rc::default();
        let mut fsm = StateMachine::new();
        for (mode, name) in [
            (Mode::Idle, "idle"),
            (Mode::Walk, "walk"),
            (Mode::Run, "run"),
            (Mode::Jump, "jump"),
        ] {
            fsm.add_state(
                mode,
                Recording {
                    name,
                    log: Rc::clone(&log),
                },
            )
            .unwrap();
        }
        (fsm, log)
    }

    #[test]
    fn add_state_registers_without_hooks() {
        let (fsm, log) = recording_machine();

        assert_eq!(fsm.state_count(), 4);
        assert!(fsm.contains_state(&Mode::Walk));
        assert_eq!(
            fsm.state_ids(),
            &[Mode::Idle, Mode::Walk, Mode::Run, Mode::Jump]
        );
        assert!(log.borrow().is_empty());
        assert!(fsm.active_state().is_none());
    }

    #[test]
    fn duplicate_state_id_keeps_original() {
        let (mut fsm, _log) = recording_machine();

        let err = fsm.add_state(Mode::Idle, EmptyState).unwrap_err();

        assert!(matches!(err, StateMachineError::DuplicateStateId(Mode::Idle)));
        assert_eq!(fsm.state_count(), 4);
        assert!(fsm.state_as::<Recording>(&Mode::Idle).is_some());
    }

    #[test]
    fn get_state_of_unknown_id_fails() {
        let fsm: StateMachine<Mode, Input> = StateMachine::new();
        assert!(matches!(
            fsm.get_state(&Mode::Run),
            Err(StateMachineError::UnknownStateId(Mode::Run))
        ));
    }

    #[test]
    fn remove_state_rejects_live_transitions() {
        let (mut fsm, _log) = recording_machine();
        let walk = Transition::new(Mode::Idle, Input::Move, Mode::Walk);
        fsm.add_transition(walk.clone()).unwrap();

        let err = fsm.remove_state(&Mode::Walk).err().unwrap();
        assert!(matches!(
            err,
            StateMachineError::StateHasTransitions {
                state: Mode::Walk,
                transitions: 1
            }
        ));
        assert!(fsm.contains_state(&Mode::Walk));

        fsm.remove_transition(&walk).unwrap();
        fsm.remove_state(&Mode::Walk).unwrap();
        assert!(!fsm.contains_state(&Mode::Walk));
        assert_eq!(fsm.state_ids(), &[Mode::Idle, Mode::Run, Mode::Jump]);
    }

    #[test]
    fn remove_state_rejects_unknown_and_active() {
        let (mut fsm, _log) = recording_machine();
        fsm.remove_state(&Mode::Jump).unwrap();

        assert!(matches!(
            fsm.remove_state(&Mode::Jump),
            Err(StateMachineError::UnknownStateId(Mode::Jump))
        ));

        fsm.set_initial_state(Mode::Idle).unwrap();
        assert!(matches!(
            fsm.remove_state(&Mode::Idle),
            Err(StateMachineError::StateIsActive(Mode::Idle))
        ));
    }

    #[test]
    fn set_initial_state_does_not_enter() {
        let (mut fsm, log) = recording_machine();

        fsm.set_initial_state(Mode::Idle).unwrap();
        assert!(fsm.is_in_state(&Mode::Idle));
        assert_eq!(fsm.initial_state(), Some(&Mode::Idle));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn set_initial_state_requires_registration() {
        let mut fsm: StateMachine<Mode, Input> = StateMachine::new();
        assert!(matches!(
            fsm.set_initial_state(Mode::Idle),
            Err(StateMachineError::UnknownStateId(Mode::Idle))
        ));
    }

    #[test]
    fn add_transition_requires_both_endpoints() {
        let mut fsm: StateMachine<Mode, Input> = StateMachine::new();
        fsm.add_state(Mode::Idle, EmptyState).unwrap();

        let err = fsm
            .add_transition((Mode::Idle, Input::Move, Mode::Walk))
            .unwrap_err();
        assert!(matches!(err, StateMachineError::UnknownStateId(Mode::Walk)));

        let err = fsm
            .add_transition((Mode::Run, Input::Stop, Mode::Idle))
            .unwrap_err();
        assert!(matches!(err, StateMachineError::UnknownStateId(Mode::Run)));
        assert_eq!(fsm.transition_count(), 0);
    }

    #[test]
    fn duplicate_transition_is_idempotent() {
        let (mut fsm, _log) = recording_machine();
        let t = Transition::new(Mode::Idle, Input::Move, Mode::Walk);

        assert!(fsm.add_transition(t.clone()).unwrap());
        assert!(!fsm.add_transition(t.clone()).unwrap());
        assert_eq!(fsm.transition_count(), 1);
        assert!(fsm.contains_transition(&t));
    }

    #[test]
    fn remove_unknown_transition_fails() {
        let (mut fsm, _log) = recording_machine();
        let t = Transition::new(Mode::Idle, Input::Move, Mode::Walk);

        assert!(matches!(
            fsm.remove_transition(&t),
            Err(StateMachineError::UnknownTransition(_))
        ));
    }

    #[test]
    fn trigger_runs_exit_then_enter() {
        let (mut fsm, log) = recording_machine();
        fsm.add_transition((Mode::Idle, Input::Move, Mode::Walk))
            .unwrap();
        fsm.set_initial_state(Mode::Idle).unwrap();

        let fired = fsm.trigger(Input::Move).unwrap();

        assert_eq!(fired, Transition::new(Mode::Idle, Input::Move, Mode::Walk));
        assert!(fsm.is_in_state(&Mode::Walk));
        assert_eq!(*log.borrow(), vec!["exit idle", "enter walk"]);
    }

    #[test]
    fn reentrant_transition_still_exits_and_enters() {
        let (mut fsm, log) = recording_machine();
        fsm.add_transition((Mode::Run, Input::Sprint, Mode::Run))
            .unwrap();
        fsm.set_initial_state(Mode::Run).unwrap();

        fsm.trigger(Input::Sprint).unwrap();

        assert!(fsm.is_in_state(&Mode::Run));
        assert_eq!(*log.borrow(), vec!["exit run", "enter run"]);
    }

    #[test]
    fn unmatched_trigger_is_soft_and_changes_nothing() {
        let (mut fsm, log) = recording_machine();
        fsm.add_transition((Mode::Walk, Input::Stop, Mode::Idle))
            .unwrap();
        fsm.set_initial_state(Mode::Idle).unwrap();

        let err = fsm.trigger(Input::Stop).unwrap_err();

        assert!(err.is_soft());
        assert!(matches!(
            err,
            StateMachineError::NoValidTransition {
                from: Mode::Idle,
                trigger: Input::Stop
            }
        ));
        assert!(fsm.is_in_state(&Mode::Idle));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn ambiguous_trigger_reports_all_candidates() {
        let (mut fsm, log) = recording_machine();
        fsm.add_transition((Mode::Idle, Input::Move, Mode::Walk))
            .unwrap();
        fsm.add_transition((Mode::Idle, Input::Move, Mode::Run))
            .unwrap();
        fsm.set_initial_state(Mode::Idle).unwrap();

        let err = fsm.trigger(Input::Move).unwrap_err();

        match err {
            StateMachineError::AmbiguousTransition {
                from,
                trigger,
                candidates,
            } => {
                assert_eq!(from, Mode::Idle);
                assert_eq!(trigger, Input::Move);
                assert_eq!(candidates, vec![Mode::Walk, Mode::Run]);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
        assert!(fsm.is_in_state(&Mode::Idle));
        assert!(log.borrow().is_empty());
        assert!(fsm.history().is_empty());
    }

    #[test]
    fn guards_disambiguate_candidates() {
        let (mut fsm, log) = recording_machine();
        let walk = Transition::new(Mode::Idle, Input::Move, Mode::Walk);
        let run = Transition::new(Mode::Idle, Input::Move, Mode::Run);
        fsm.add_transition(walk.clone()).unwrap();
        fsm.add_transition(run.clone()).unwrap();

        let tired = Rc::new(RefCell::new(true));
        let is_tired = Rc::clone(&tired);
        fsm.add_guard(&walk, move |_| *is_tired.borrow()).unwrap();
        let is_rested = Rc::clone(&tired);
        fsm.add_guard(&run, move |_| !*is_rested.borrow()).unwrap();
        fsm.set_initial_state(Mode::Idle).unwrap();

        fsm.trigger(Input::Move).unwrap();
        assert!(fsm.is_in_state(&Mode::Walk));
        assert_eq!(*log.borrow(), vec!["exit idle", "enter walk"]);
    }

    #[test]
    fn all_guards_must_pass() {
        let (mut fsm, _log) = recording_machine();
        let hop = Transition::new(Mode::Idle, Input::Hop, Mode::Jump);
        fsm.add_transition(hop.clone()).unwrap();
        fsm.add_guard(&hop, |_| true).unwrap();
        let blocker = fsm.add_guard(&hop, |_| false).unwrap();
        fsm.set_initial_state(Mode::Idle).unwrap();

        assert!(fsm.trigger(Input::Hop).unwrap_err().is_soft());
        assert_eq!(fsm.guard_count(&hop), 2);

        assert!(fsm.remove_guard(&hop, blocker));
        assert!(!fsm.remove_guard(&hop, blocker));
        fsm.trigger(Input::Hop).unwrap();
        assert!(fsm.is_in_state(&Mode::Jump));
    }

    #[test]
    fn guard_on_unknown_transition_fails() {
        let (mut fsm, _log) = recording_machine();
        let t = Transition::new(Mode::Idle, Input::Hop, Mode::Jump);
        assert!(matches!(
            fsm.add_guard(&t, |_| true),
            Err(StateMachineError::UnknownTransition(_))
        ));
    }

    #[test]
    fn removing_transition_drops_guards() {
        let (mut fsm, _log) = recording_machine();
        let t = Transition::new(Mode::Idle, Input::Hop, Mode::Jump);
        fsm.add_transition(t.clone()).unwrap();
        fsm.add_guard(&t, |_| false).unwrap();

        fsm.remove_transition(&t).unwrap();
        fsm.add_transition(t.clone()).unwrap();

        assert_eq!(fsm.guard_count(&t), 0);
    }

    #[test]
    fn trigger_without_active_state_fails() {
        let (mut fsm, _log) = recording_machine();
        assert!(matches!(
            fsm.trigger(Input::Move),
            Err(StateMachineError::NoActiveState(Input::Move))
        ));
    }

    #[test]
    fn update_drives_only_active_state() {
        let (mut fsm, log) = recording_machine();
        fsm.update();
        assert!(log.borrow().is_empty());

        fsm.set_initial_state(Mode::Run).unwrap();
        fsm.update();
        fsm.update();
        assert_eq!(*log.borrow(), vec!["update run", "update run"]);
    }

    #[test]
    fn history_records_fired_transitions() {
        let (mut fsm, _log) = recording_machine();
        fsm.add_transition((Mode::Idle, Input::Move, Mode::Walk))
            .unwrap();
        fsm.add_transition((Mode::Walk, Input::Sprint, Mode::Run))
            .unwrap();
        fsm.set_initial_state(Mode::Idle).unwrap();

        fsm.trigger(Input::Move).unwrap();
        let _ = fsm.trigger(Input::Hop);
        fsm.trigger(Input::Sprint).unwrap();

        assert_eq!(
            fsm.history().path(),
            vec![&Mode::Idle, &Mode::Walk, &Mode::Run]
        );
        fsm.clear_history();
        assert!(fsm.history().is_empty());
    }

    #[test]
    fn history_limit_comes_from_config() {
        let mut fsm: StateMachine<Mode, Input> =
            StateMachine::with_config(MachineConfig::default().history_limit(Some(1)));
        fsm.add_state(Mode::Idle, EmptyState).unwrap();
        fsm.add_transition((Mode::Idle, Input::Hop, Mode::Idle))
            .unwrap();
        fsm.set_initial_state(Mode::Idle).unwrap();

        fsm.trigger(Input::Hop).unwrap();
        fsm.trigger(Input::Hop).unwrap();

        assert_eq!(fsm.history().len(), 1);
    }

    #[test]
    fn re_registration_gets_new_registration() {
        let mut fsm: StateMachine<Mode, Input> = StateMachine::new();
        fsm.add_state(Mode::Idle, EmptyState).unwrap();
        let first = fsm.registration_of(&Mode::Idle);
        fsm.remove_state(&Mode::Idle).unwrap();
        fsm.add_state(Mode::Idle, EmptyState).unwrap();

        assert_ne!(first, fsm.registration_of(&Mode::Idle));
    }
}
