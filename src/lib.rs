//! Statecraft: an embeddable finite state machine runtime
//!
//! A host registers state objects under ids of its choosing, connects them
//! with `(from, trigger, to)` transitions and then drives the machine by
//! calling `update` every tick and `trigger` whenever something happens.
//! Everything runs synchronously on the caller's thread.
//!
//! # Core Concepts
//!
//! - **State**: an object with `enter`, `update` and `exit` hooks
//! - **Transition**: a `(from, trigger, to)` edge between registered states
//! - **Guards**: predicates deciding whether a candidate transition may fire
//! - **Ambiguity**: a trigger matching more than one eligible transition is
//!   an error, and nothing fires
//! - **History**: a bounded log of fired transitions
//!
//! Two layers sit on top of the engine. Behaviour composition lets several
//! independent [`Behaviour`]s share one state's lifecycle, and
//! [`EventDispatcherStateMachine`] routes host events to per-state handlers
//! that may trigger transitions themselves.
//!
//! # Example
//!
//! ```rust
//! use statecraft::{states, StateMachine, Transition};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Player {
//!     Idle,
//!     Jumping,
//! }
//!
//! let jumps = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&jumps);
//!
//! let mut fsm: StateMachine<Player, &str> = StateMachine::new();
//! fsm.add_state(Player::Idle, states::empty()).unwrap();
//! fsm.add_with_enter_event(Player::Jumping, move || counter.set(counter.get() + 1))
//!     .unwrap();
//! fsm.add_transition(Transition::new(Player::Idle, "jump", Player::Jumping))
//!     .unwrap();
//! fsm.add_transition(Transition::new(Player::Jumping, "land", Player::Idle))
//!     .unwrap();
//! fsm.set_initial_state(Player::Idle).unwrap();
//!
//! fsm.trigger("jump").unwrap();
//! fsm.update();
//! fsm.trigger("land").unwrap();
//!
//! assert_eq!(jumps.get(), 1);
//! assert_eq!(fsm.history().path(), vec![&Player::Idle, &Player::Jumping, &Player::Idle]);
//! ```

pub mod builder;
pub mod core;
pub mod extensions;
pub mod machine;
pub mod states;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use core::{
    Guard, GuardId, MachineResult, State, StateId, StateMachineError, Transition,
    TransitionHistory, TransitionRecord, Trigger,
};
pub use extensions::{EventDispatcherStateMachine, EventHandler, HandlerId};
pub use machine::{ConfigurationIssue, MachineConfig, StateMachine, DEFAULT_HISTORY_LIMIT};
pub use states::{
    same_behaviour, shared, Behaviour, BehaviouralState, CompositeState, DelegateState,
    EmptyState, SharedBehaviour, TimerState,
};
