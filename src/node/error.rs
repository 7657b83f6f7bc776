//! Errors raised while entering or exiting a state node.

use crate::action::ActionError;
use crate::core::State;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which half of the activation protocol was running.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Phase {
    Entry,
    Exit,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry => f.write_str("entry"),
            Self::Exit => f.write_str("exit"),
        }
    }
}

/// Errors surfaced to the engine by `entry`, `exit` and the composite
/// activation helpers.
///
/// Never retried or swallowed by the node; the engine decides whether to
/// roll back or move to an error state.
#[derive(Debug, Error)]
pub enum StateError<S: State> {
    #[error("{phase} action #{index} of state '{}' failed", .state.name())]
    ActionExecution {
        /// Node whose action failed
        state: S,
        phase: Phase,
        /// Position of the failing action in the node's action list
        index: usize,
        #[source]
        source: ActionError,
    },
}

impl<S: State> StateError<S> {
    pub fn state(&self) -> &S {
        match self {
            Self::ActionExecution { state, .. } => state,
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            Self::ActionExecution { phase, .. } => *phase,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::ActionExecution { index, .. } => *index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Parked,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            "Parked"
        }
    }

    #[test]
    fn message_names_state_phase_and_index() {
        let err = StateError::ActionExecution {
            state: TestState::Parked,
            phase: Phase::Exit,
            index: 2,
            source: ActionError::new("brake stuck"),
        };

        assert_eq!(err.to_string(), "exit action #2 of state 'Parked' failed");
        assert_eq!(err.state(), &TestState::Parked);
        assert_eq!(err.phase(), Phase::Exit);
        assert_eq!(err.index(), 2);
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("brake stuck"));
    }

    #[test]
    fn phase_displays_lowercase() {
        assert_eq!(Phase::Entry.to_string(), "entry");
        assert_eq!(Phase::Exit.to_string(), "exit");
    }
}
