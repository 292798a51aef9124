//! The state machine engine.
//!
//! - `engine`: registry, transition graph, guards, trigger resolution
//! - `helpers`: leaf-state registration, bulk configuration, graph queries
//! - `audit`: whole-graph configuration checks
//! - `config`: engine options

mod audit;
mod config;
mod engine;
mod helpers;

pub use audit::ConfigurationIssue;
pub use config::{MachineConfig, DEFAULT_HISTORY_LIMIT};
pub use engine::StateMachine;
