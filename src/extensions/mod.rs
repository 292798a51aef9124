//! Layers composed on top of the engine.
//!
//! Behaviour composition adds methods directly to [`StateMachine`](crate::StateMachine);
//! event dispatch wraps it in [`EventDispatcherStateMachine`].

mod behaviours;
mod events;

pub use events::{EventDispatcherStateMachine, EventHandler, HandlerId};
