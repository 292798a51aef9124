//! Configuration audit using Validation.
//!
//! Ambiguity is normally only detected when a trigger fires. The audit looks
//! at the whole graph up front and reports every problem it can prove
//! statically, accumulating all of them instead of stopping at the first.

use crate::core::{StateId, Trigger};
use crate::machine::StateMachine;
use std::collections::HashMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A problem found by [`StateMachine::audit`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigurationIssue<S: StateId, T: Trigger> {
    #[error("No initial state set")]
    MissingInitialState,

    /// Two or more unguarded transitions leave `from` on `trigger`, so that
    /// trigger can never resolve from `from`.
    #[error("Trigger {trigger:?} is always ambiguous from {from:?} (targets: {targets:?})")]
    GuaranteedAmbiguity { from: S, trigger: T, targets: Vec<S> },
}

impl<S: StateId, T: Trigger> StateMachine<S, T> {
    /// Check the configuration, accumulating ALL issues.
    ///
    /// Returns `Validation::Success(())` when nothing is wrong.
    pub fn audit(&self) -> Validation<(), NonEmptyVec<ConfigurationIssue<S, T>>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigurationIssue<S, T>>>> = Vec::new();

        checks.push(if self.initial_state().is_some() {
            Validation::success(())
        } else {
            Validation::fail(ConfigurationIssue::MissingInitialState)
        });

        // Group unguarded transitions by (from, trigger), keeping first-seen order.
        let mut groups: HashMap<(&S, &T), Vec<S>> = HashMap::new();
        let mut keys: Vec<(&S, &T)> = Vec::new();
        for transition in self.transitions() {
            if self.guard_count(transition) > 0 {
                continue;
            }
            let key = (&transition.from, &transition.trigger);
            let targets = groups.entry(key).or_insert_with(|| {
                keys.push(key);
                Vec::new()
            });
            targets.push(transition.to.clone());
        }

        for key in keys {
            let Some(targets) = groups.remove(&key) else {
                continue;
            };
            checks.push(if targets.len() > 1 {
                Validation::fail(ConfigurationIssue::GuaranteedAmbiguity {
                    from: key.0.clone(),
                    trigger: key.1.clone(),
                    targets,
                })
            } else {
                Validation::success(())
            });
        }

        Validation::all_vec(checks).map(|_| ())
    }
}
