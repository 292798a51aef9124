//! State that fires a callback once a duration has elapsed.

use crate::core::State;
use std::time::{Duration, Instant};

/// Calls `on_elapsed` from `update` once `duration` has passed since `enter`.
///
/// The callback fires at most once per entry; leaving and re-entering the
/// state restarts the countdown. Nothing fires before the first `enter`.
pub struct TimerState {
    duration: Duration,
    on_elapsed: Box<dyn FnMut()>,
    deadline: Option<Instant>,
    fired: bool,
}

impl TimerState {
    pub fn new<F: FnMut() + 'static>(duration: Duration, on_elapsed: F) -> Self {
        Self {
            duration,
            on_elapsed: Box::new(on_elapsed),
            deadline: None,
            fired: false,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether the countdown is running and has not fired yet.
    pub fn is_running(&self) -> bool {
        self.deadline.is_some() && !self.fired
    }

    /// Time left before the callback may fire, `None` when not running.
    pub fn remaining(&self) -> Option<Duration> {
        if self.fired {
            return None;
        }
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}

impl State for TimerState {
    fn enter(&mut self) {
        self.deadline = Some(Instant::now() + self.duration);
        self.fired = false;
    }

    fn update(&mut self) {
        if self.fired {
            return;
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.fired = true;
                (self.on_elapsed)();
            }
        }
    }

    fn exit(&mut self) {
        self.deadline = None;
    }
}
