//! Core value types shared by state nodes and their collaborators.
//!
//! This module contains the leaf data of the state model:
//! - State and event labels via the `State` and `Event` traits
//! - Pseudostate roles
//! - The context passed through to entry/exit actions
//!
//! Nothing in this module performs side effects beyond the extended-state
//! variable map that actions are allowed to write.

mod context;
mod pseudo;
mod state;

pub use context::{ExtendedState, StateContext};
pub use pseudo::{PseudoState, PseudoStateKind};
pub use state::{Event, State};
