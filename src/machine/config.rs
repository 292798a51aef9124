//! Engine options.

/// Default number of fired transitions kept in the history.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Options applied when a [`StateMachine`](crate::StateMachine) is created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MachineConfig {
    /// Maximum number of history records kept. `None` keeps everything,
    /// `Some(0)` disables history.
    pub history_limit: Option<usize>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
        }
    }
}

impl MachineConfig {
    pub fn history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit;
        self
    }
}
