//! Macros for ergonomic state machine construction.

/// Build a `Vec<Transition>` from `from => trigger => to` rows.
///
/// # Example
///
/// ```
/// use statecraft::{transitions, Transition};
///
/// let table = transitions![
///     "idle" => "start" => "running",
///     "running" => "stop" => "idle",
/// ];
///
/// assert_eq!(table[1], Transition::new("running", "stop", "idle"));
/// ```
#[macro_export]
macro_rules! transitions {
    ($($from:expr => $trigger:expr => $to:expr),* $(,)?) => {
        vec![$($crate::Transition::new($from, $trigger, $to)),*]
    };
}
