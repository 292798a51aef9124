//! The `(from, trigger, to)` triple that makes up the transition graph.

use serde::{Deserialize, Serialize};

/// An edge of the transition graph.
///
/// Transitions are plain values: two transitions are the same transition
/// when all three fields are equal. Several transitions may share the same
/// `(from, trigger)` pair; which one fires is decided at trigger time.
///
/// Transition tables can be loaded from any serde format.
///
/// # Example
///
/// ```rust
/// use statecraft::Transition;
///
/// let open = Transition::new("closed", "push", "open");
/// assert_eq!(open, Transition::new("closed", "push", "open"));
/// assert!(open.involves(&"open"));
/// assert!(!open.is_reentrant());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition<S, T> {
    /// Source state id.
    pub from: S,
    /// Trigger that fires the transition.
    pub trigger: T,
    /// Target state id.
    pub to: S,
}

impl<S: PartialEq, T: PartialEq> Transition<S, T> {
    pub fn new(from: S, trigger: T, to: S) -> Self {
        Self { from, trigger, to }
    }

    /// Whether the transition starts or ends at `state`.
    pub fn involves(&self, state: &S) -> bool {
        self.from == *state || self.to == *state
    }

    /// Whether the transition leaves `state` on `trigger`.
    pub fn leaves(&self, state: &S, trigger: &T) -> bool {
        self.from == *state && self.trigger == *trigger
    }

    /// Self-loop: source and target are the same state.
    pub fn is_reentrant(&self) -> bool {
        self.from == self.to
    }
}

impl<S, T> From<(S, T, S)> for Transition<S, T> {
    fn from((from, trigger, to): (S, T, S)) -> Self {
        Self { from, trigger, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    enum Door {
        Open,
        Closed,
        Locked,
    }

    #[test]
    fn equality_covers_all_three_fields() {
        let a = Transition::new(Door::Closed, 1, Door::Open);
        assert_eq!(a, Transition::new(Door::Closed, 1, Door::Open));
        assert_ne!(a, Transition::new(Door::Closed, 2, Door::Open));
        assert_ne!(a, Transition::new(Door::Locked, 1, Door::Open));
        assert_ne!(a, Transition::new(Door::Closed, 1, Door::Locked));
    }

    #[test]
    fn hashing_agrees_with_equality() {
        let mut set = HashSet::new();
        set.insert(Transition::new(Door::Closed, "push", Door::Open));
        set.insert(Transition::new(Door::Closed, "push", Door::Open));
        set.insert(Transition::new(Door::Open, "pull", Door::Closed));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn involves_checks_both_endpoints() {
        let t = Transition::new(Door::Closed, "lock", Door::Locked);
        assert!(t.involves(&Door::Closed));
        assert!(t.involves(&Door::Locked));
        assert!(!t.involves(&Door::Open));
    }

    #[test]
    fn leaves_matches_source_and_trigger() {
        let t = Transition::new(Door::Closed, "lock", Door::Locked);
        assert!(t.leaves(&Door::Closed, &"lock"));
        assert!(!t.leaves(&Door::Closed, &"push"));
        assert!(!t.leaves(&Door::Locked, &"lock"));
    }

    #[test]
    fn converts_from_tuple() {
        let t: Transition<Door, &str> = (Door::Open, "slam", Door::Open).into();
        assert!(t.is_reentrant());
    }

    #[test]
    fn transition_table_deserializes_from_json() {
        let json = r#"[
            {"from": "Closed", "trigger": "push", "to": "Open"},
            {"from": "Open", "trigger": "pull", "to": "Closed"}
        ]"#;
        let table: Vec<Transition<Door, String>> = serde_json::from_str(json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table[0],
            Transition::new(Door::Closed, "push".to_string(), Door::Open)
        );
    }
}
