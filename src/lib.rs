//! Stratum: hierarchical state nodes for parallel state machines
//!
//! A state node is one named state of a hierarchical machine. It owns its
//! entry/exit actions, the events it defers, an optional pseudostate role and
//! its nested content: parallel regions or a delegated submachine. The
//! surrounding engine decides which transition fires and keeps the active
//! configuration; the node only guarantees ordered, fail-fast execution of
//! its own actions and a live view of the ids active beneath it.
//!
//! # Core Concepts
//!
//! - **Labels**: state ids and events via the `State` and `Event` traits
//! - **Actions**: synchronous, fallible callbacks run on entry and exit
//! - **Nodes**: `StateNode`, whose nested content is a sum type
//! - **Regions**: independently active sub-configurations of a composite
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashSet;
//! use stratum::builder::parallel;
//! use stratum::core::StateContext;
//! use stratum::node::StateNode;
//! use stratum::{event_enum, state_enum};
//!
//! state_enum! {
//!     enum Media { Player, Audio, Video }
//! }
//!
//! event_enum! {
//!     enum Control { Play }
//! }
//!
//! let player = parallel::<Media, Control>(
//!     Media::Player,
//!     [StateNode::simple(Media::Audio), StateNode::simple(Media::Video)],
//! )
//! .unwrap();
//!
//! assert_eq!(player.ids(), HashSet::from([Media::Player]));
//!
//! player.activate(&Control::Play, &StateContext::new()).unwrap();
//! assert_eq!(
//!     player.ids(),
//!     HashSet::from([Media::Player, Media::Audio, Media::Video])
//! );
//! ```

pub mod action;
pub mod builder;
pub mod core;
pub mod node;
pub mod region;

// Re-export commonly used types
pub use action::{Action, ActionError};
pub use builder::{BuildError, StateNodeBuilder};
pub use crate::core::{Event, PseudoState, PseudoStateKind, State, StateContext};
pub use node::{Content, Phase, StateError, StateNode};
pub use region::{NodeRegion, Region, Submachine};
