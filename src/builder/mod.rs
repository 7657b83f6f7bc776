//! Builder API for ergonomic state node construction.
//!
//! This module provides a fluent builder and label macros for assembling
//! state nodes with minimal boilerplate. The builder is where structural
//! invariants are checked; a built node never changes shape.

pub mod error;
pub mod macros;
pub mod node;

pub use error::{BuildError, NodeViolation};
pub use node::StateNodeBuilder;

use crate::core::{Event, State};
use crate::node::StateNode;
use crate::region::{NodeRegion, RegionRef};
use std::sync::Arc;

/// Wrap a node as the initial node of a new [`NodeRegion`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use stratum::builder::region_of;
/// use stratum::node::StateNode;
/// use stratum::{event_enum, state_enum};
///
/// state_enum! {
///     enum Fan { Spinning }
/// }
///
/// event_enum! {
///     enum Power { On }
/// }
///
/// let region = region_of::<Fan, Power>("fan", StateNode::simple(Fan::Spinning));
/// assert_eq!(region.id(), "fan");
/// ```
pub fn region_of<S, E>(id: impl Into<String>, initial: StateNode<S, E>) -> RegionRef<S, E>
where
    S: State,
    E: Event,
{
    Arc::new(NodeRegion::new(id, Arc::new(initial)))
}

/// Build an orthogonal composite: one region per initial node.
///
/// Regions are named after their initial node.
pub fn parallel<S, E>(
    id: S,
    initials: impl IntoIterator<Item = StateNode<S, E>>,
) -> Result<StateNode<S, E>, BuildError>
where
    S: State,
    E: Event,
{
    let regions: Vec<RegionRef<S, E>> = initials
        .into_iter()
        .map(|node| {
            let name = node.id().name().to_string();
            region_of(name, node)
        })
        .collect();

    StateNodeBuilder::new().id(id).regions(regions).build()
}
