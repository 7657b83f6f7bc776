//! Entry and exit actions.
//!
//! An action is a synchronous capability that executes against a
//! [`StateContext`] and may fail. Nodes hold ordered lists of actions and run
//! them with [`ActionList::run`], which stops at the first failure and
//! reports the index it failed at.

mod error;

pub use error::ActionError;

use crate::core::{Event, State, StateContext};
use std::fmt;
use std::sync::Arc;

/// Capability executed when a node is entered or exited.
///
/// Any `Fn(&StateContext<S, E>) -> Result<(), ActionError>` closure is an
/// action.
///
/// # Example
///
/// ```rust
/// use stratum::action::{Action, ActionError};
/// use stratum::core::StateContext;
/// use stratum::{event_enum, state_enum};
///
/// state_enum! {
///     enum Door { Open, Closed }
/// }
///
/// event_enum! {
///     enum Knock { Once }
/// }
///
/// let action = |ctx: &StateContext<Door, Knock>| -> Result<(), ActionError> {
///     ctx.extended_state()
///         .set("opened", true)
///         .map_err(ActionError::from_source)?;
///     Ok(())
/// };
///
/// let ctx: StateContext<Door, Knock> = StateContext::new();
/// action.execute(&ctx).unwrap();
/// assert!(ctx.extended_state().contains("opened"));
/// ```
pub trait Action<S: State, E: Event>: Send + Sync {
    fn execute(&self, context: &StateContext<S, E>) -> Result<(), ActionError>;
}

impl<S, E, F> Action<S, E> for F
where
    S: State,
    E: Event,
    F: Fn(&StateContext<S, E>) -> Result<(), ActionError> + Send + Sync,
{
    fn execute(&self, context: &StateContext<S, E>) -> Result<(), ActionError> {
        self(context)
    }
}

/// Shared handle to an action.
pub type ActionRef<S, E> = Arc<dyn Action<S, E>>;

/// Failure of one action within an [`ActionList`] run.
#[derive(Debug)]
pub struct ActionFailure {
    /// Position of the failing action in the list.
    pub index: usize,
    pub error: ActionError,
}

/// Ordered sequence of actions.
pub struct ActionList<S: State, E: Event> {
    actions: Vec<ActionRef<S, E>>,
}

impl<S: State, E: Event> ActionList<S, E> {
    /// Empty list; running it always succeeds.
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Append an action to run after the existing ones.
    pub fn push(&mut self, action: ActionRef<S, E>) {
        self.actions.push(action);
    }

    /// Number of actions in the list.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the list holds no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Actions in execution order.
    pub fn as_slice(&self) -> &[ActionRef<S, E>] {
        &self.actions
    }

    /// Run every action in order with the same context.
    ///
    /// Stops at the first failing action; the actions after it are not
    /// invoked. An empty list succeeds without doing anything.
    pub fn run(&self, context: &StateContext<S, E>) -> Result<(), ActionFailure> {
        self.actions
            .iter()
            .enumerate()
            .try_for_each(|(index, action)| {
                tracing::trace!(index, "executing action");
                action
                    .execute(context)
                    .map_err(|error| ActionFailure { index, error })
            })
    }
}

impl<S: State, E: Event> Default for ActionList<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> Clone for ActionList<S, E> {
    fn clone(&self) -> Self {
        Self {
            actions: self.actions.iter().map(Arc::clone).collect(),
        }
    }
}

impl<S: State, E: Event> fmt::Debug for ActionList<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionList")
            .field("len", &self.actions.len())
            .finish()
    }
}

impl<S: State, E: Event> From<Vec<ActionRef<S, E>>> for ActionList<S, E> {
    fn from(actions: Vec<ActionRef<S, E>>) -> Self {
        Self { actions }
    }
}

impl<S: State, E: Event> FromIterator<ActionRef<S, E>> for ActionList<S, E> {
    fn from_iter<I: IntoIterator<Item = ActionRef<S, E>>>(iter: I) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Only,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            "Only"
        }
    }

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestEvent {
        Tick,
    }

    impl Event for TestEvent {
        fn name(&self) -> &str {
            "Tick"
        }
    }

    fn counting(counter: Arc<AtomicUsize>) -> ActionRef<TestState, TestEvent> {
        Arc::new(move |_: &StateContext<TestState, TestEvent>| -> Result<(), ActionError> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    fn failing(message: &'static str) -> ActionRef<TestState, TestEvent> {
        Arc::new(
            move |_: &StateContext<TestState, TestEvent>| -> Result<(), ActionError> {
                Err(ActionError::new(message))
            },
        )
    }

    #[test]
    fn empty_list_succeeds() {
        let list: ActionList<TestState, TestEvent> = ActionList::new();
        assert!(list.is_empty());
        assert!(list.run(&StateContext::new()).is_ok());
    }

    #[test]
    fn runs_every_action() {
        let counter = Arc::new(AtomicUsize::new(0));
        let list: ActionList<_, _> = vec![counting(counter.clone()), counting(counter.clone())]
            .into_iter()
            .collect();

        list.run(&StateContext::new()).unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn stops_at_first_failure() {
        let counter = Arc::new(AtomicUsize::new(0));
        let list = ActionList::from(vec![
            counting(counter.clone()),
            failing("boom"),
            counting(counter.clone()),
        ]);

        let failure = list.run(&StateContext::new()).unwrap_err();

        assert_eq!(failure.index, 1);
        assert_eq!(failure.error.to_string(), "boom");
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn running_twice_runs_actions_twice() {
        let counter = Arc::new(AtomicUsize::new(0));
        let list = ActionList::from(vec![counting(counter.clone())]);
        let ctx = StateContext::new();

        list.run(&ctx).unwrap();
        list.run(&ctx).unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn debug_shows_length() {
        let list = ActionList::from(vec![failing("x")]);
        assert_eq!(format!("{list:?}"), "ActionList { len: 1 }");
    }
}
