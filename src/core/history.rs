//! Transition history tracking.
//!
//! The engine records every transition that actually fired, in order, with
//! a wall-clock timestamp. The history is bounded: once the configured limit
//! is reached the oldest record is dropped for each new one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single fired transition.
///
/// Records serialize with serde so a host can persist or ship its history.
///
/// # Example
///
/// ```rust
/// use statecraft::TransitionRecord;
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: "idle",
///     trigger: "start",
///     to: "running",
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.to, "running");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord<S, T> {
    /// The state that was exited
    pub from: S,
    /// The trigger that fired the transition
    pub trigger: T,
    /// The state that was entered
    pub to: S,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

/// Ordered, optionally bounded history of fired transitions.
///
/// # Example
///
/// ```rust
/// use statecraft::{TransitionHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let mut history = TransitionHistory::new(Some(2));
/// for (from, to) in [("a", "b"), ("b", "c"), ("c", "d")] {
///     history.record(TransitionRecord {
///         from,
///         trigger: (),
///         to,
///         timestamp: Utc::now(),
///     });
/// }
///
/// // Only the two most recent records survive.
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.path(), vec![&"b", &"c", &"d"]);
/// ```
#[derive(Clone, Debug)]
pub struct TransitionHistory<S, T> {
    records: VecDeque<TransitionRecord<S, T>>,
    limit: Option<usize>,
}

impl<S, T> Default for TransitionHistory<S, T> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<S, T> TransitionHistory<S, T> {
    /// Create an empty history keeping at most `limit` records.
    ///
    /// `None` keeps every record. `Some(0)` disables recording entirely.
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            records: VecDeque::new(),
            limit,
        }
    }

    /// Append a record, evicting the oldest one if the limit is reached.
    pub fn record(&mut self, record: TransitionRecord<S, T>) {
        match self.limit {
            Some(0) => return,
            Some(limit) => {
                while self.records.len() >= limit {
                    self.records.pop_front();
                }
            }
            None => {}
        }
        self.records.push_back(record);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the source of the oldest retained record followed by the
    /// target of every record, in order. Empty when nothing was recorded.
    pub fn path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(&first.from);
        }
        path.extend(self.records.iter().map(|r| &r.to));
        path
    }

    /// Time elapsed between the oldest and the newest retained record.
    ///
    /// Returns `None` if there are no records.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Iterate over retained records, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TransitionRecord<S, T>> {
        self.records.iter()
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&TransitionRecord<S, T>> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
