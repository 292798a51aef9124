//! Builder API for ergonomic state machine construction.
//!
//! This module provides a fluent builder and a transition-table macro for
//! declaring a machine in one expression.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
