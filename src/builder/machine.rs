//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::{MachineResult, State, StateId, Transition, Trigger};
use crate::machine::{MachineConfig, StateMachine};
use crate::states::EmptyState;
use stillwater::validation::Validation;
use tracing::debug;

type Step<S, T> = Box<dyn FnOnce(&mut StateMachine<S, T>) -> MachineResult<(), S, T>>;

/// Builder for constructing state machines with a fluent API.
///
/// Registrations are recorded and replayed against a fresh machine in
/// [`build`](Self::build), in the order they were made. The initial state is
/// set after every registration regardless of when `initial` was called.
///
/// # Example
///
/// ```rust
/// use statecraft::{transitions, StateMachineBuilder};
///
/// let fsm = StateMachineBuilder::<&str, &str>::new()
///     .empty_state("red")
///     .empty_state("green")
///     .transitions(transitions![
///         "red" => "go" => "green",
///         "green" => "stop" => "red",
///     ])
///     .initial("red")
///     .build_checked()
///     .unwrap();
///
/// assert_eq!(fsm.transition_count(), 2);
/// ```
pub struct StateMachineBuilder<S: StateId, T: Trigger> {
    config: MachineConfig,
    steps: Vec<Step<S, T>>,
    initial: Option<S>,
}

impl<S: StateId, T: Trigger> StateMachineBuilder<S, T> {
    pub fn new() -> Self {
        Self {
            config: MachineConfig::default(),
            steps: Vec::new(),
            initial: None,
        }
    }

    /// Register a state.
    pub fn state<X: State>(self, id: S, state: X) -> Self {
        self.step(move |fsm| fsm.add_state(id, state))
    }

    /// Register a state with no-op hooks.
    pub fn empty_state(self, id: S) -> Self {
        self.state(id, EmptyState)
    }

    /// Register a transition.
    pub fn transition(self, from: S, trigger: T, to: S) -> Self {
        self.step(move |fsm| fsm.add_transition((from, trigger, to)).map(|_| ()))
    }

    /// Register every transition in `transitions`.
    pub fn transitions<I>(self, transitions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Transition<S, T>>,
    {
        let transitions: Vec<Transition<S, T>> =
            transitions.into_iter().map(Into::into).collect();
        self.step(move |fsm| {
            for transition in transitions {
                fsm.add_transition(transition)?;
            }
            Ok(())
        })
    }

    /// Register a transition that may only fire while `predicate` holds.
    pub fn guarded<F>(self, from: S, trigger: T, to: S, predicate: F) -> Self
    where
        F: Fn(&Transition<S, T>) -> bool + 'static,
    {
        self.step(move |fsm| {
            let transition = Transition::new(from, trigger, to);
            fsm.add_transition(transition.clone())?;
            fsm.add_guard(&transition, predicate).map(|_| ())
        })
    }

    /// Set the initial state (optional for `build`, required by `build_checked`).
    pub fn initial(mut self, id: S) -> Self {
        self.initial = Some(id);
        self
    }

    /// Bound the transition history. `None` keeps everything.
    pub fn history_limit(mut self, limit: Option<usize>) -> Self {
        self.config = self.config.history_limit(limit);
        self
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the state machine.
    /// Returns the first error a registration step reports.
    pub fn build(self) -> Result<StateMachine<S, T>, BuildError<S, T>> {
        let mut fsm = StateMachine::with_config(self.config);
        for step in self.steps {
            step(&mut fsm)?;
        }
        if let Some(initial) = self.initial {
            fsm.set_initial_state(initial)?;
        }
        debug!(
            states = fsm.state_count(),
            transitions = fsm.transition_count(),
            "state machine built"
        );
        Ok(fsm)
    }

    /// Build the state machine and audit its configuration.
    /// Returns every audit issue at once.
    pub fn build_checked(self) -> Result<StateMachine<S, T>, BuildError<S, T>> {
        let fsm = self.build()?;
        match fsm.audit() {
            Validation::Success(_) => Ok(fsm),
            Validation::Failure(issues) => Err(BuildError::Audit(issues.iter().cloned().collect())),
        }
    }

    fn step<F>(mut self, step: F) -> Self
    where
        F: FnOnce(&mut StateMachine<S, T>) -> MachineResult<(), S, T> + 'static,
    {
        self.steps.push(Box::new(step));
        self
    }
}

impl<S: StateId, T: Trigger> Default for StateMachineBuilder<S, T> {
    fn default() -> Self {
        Self::new()
    }
}
