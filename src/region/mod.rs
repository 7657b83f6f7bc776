//! Collaborators holding a node's nested behavior.
//!
//! A composite node owns regions; a submachine state owns a nested machine.
//! The node only needs two things from either: the ids currently active
//! inside, queried live, and a way for activation to enter and leave them.
//! [`NodeRegion`] is a minimal region that tracks one active node.

use crate::core::{Event, State, StateContext};
use crate::node::{StateError, StateNode};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// An independently active sub-configuration of a composite node.
pub trait Region<S: State, E: Event>: Send + Sync {
    /// Name of the region, unique within its owning node.
    fn id(&self) -> &str;

    /// Ids currently active inside the region; empty when inactive.
    fn active_ids(&self) -> HashSet<S>;

    fn enter(&self, event: &E, context: &StateContext<S, E>) -> Result<(), StateError<S>>;

    fn exit(&self, event: &E, context: &StateContext<S, E>) -> Result<(), StateError<S>>;
}

/// A nested machine that a submachine state delegates to.
pub trait Submachine<S: State, E: Event>: Send + Sync {
    /// Ids of the nested machine's current configuration.
    fn active_ids(&self) -> HashSet<S>;

    fn start(&self, event: &E, context: &StateContext<S, E>) -> Result<(), StateError<S>>;

    fn stop(&self, event: &E, context: &StateContext<S, E>) -> Result<(), StateError<S>>;
}

pub type RegionRef<S, E> = Arc<dyn Region<S, E>>;

pub type SubmachineRef<S, E> = Arc<dyn Submachine<S, E>>;

/// Region whose configuration is a single active node.
///
/// Entering activates the initial node (and, through it, any nested
/// regions); exiting deactivates whatever node is current. Which node
/// becomes current after a transition is up to the engine via
/// [`NodeRegion::replace`].
pub struct NodeRegion<S: State, E: Event> {
    id: String,
    initial: Arc<StateNode<S, E>>,
    current: RwLock<Option<Arc<StateNode<S, E>>>>,
}

impl<S: State, E: Event> NodeRegion<S, E> {
    /// Inactive region that enters `initial`.
    pub fn new(id: impl Into<String>, initial: Arc<StateNode<S, E>>) -> Self {
        Self {
            id: id.into(),
            initial,
            current: RwLock::new(None),
        }
    }

    /// Node activated when the region is entered.
    pub fn initial(&self) -> &Arc<StateNode<S, E>> {
        &self.initial
    }

    /// Currently active node, if the region is active.
    pub fn current(&self) -> Option<Arc<StateNode<S, E>>> {
        self.current.read().clone()
    }

    /// Whether a node is currently active.
    pub fn is_active(&self) -> bool {
        self.current.read().is_some()
    }

    /// Deactivate the current node (if any) and activate `next`.
    ///
    /// If the current node fails to exit it stays current. If `next` fails
    /// to activate, the previous node has already been exited and the region
    /// is left inactive; re-entering or recovering is up to the engine.
    pub fn replace(
        &self,
        next: Arc<StateNode<S, E>>,
        event: &E,
        context: &StateContext<S, E>,
    ) -> Result<(), StateError<S>> {
        self.exit(event, context)?;
        self.activate(next, event, context)
    }

    fn activate(
        &self,
        node: Arc<StateNode<S, E>>,
        event: &E,
        context: &StateContext<S, E>,
    ) -> Result<(), StateError<S>> {
        tracing::debug!(region = %self.id, state = node.id().name(), "entering region");
        node.activate(event, context)?;
        *self.current.write() = Some(node);
        Ok(())
    }
}

impl<S: State, E: Event> Region<S, E> for NodeRegion<S, E> {
    fn id(&self) -> &str {
        &self.id
    }

    fn active_ids(&self) -> HashSet<S> {
        self.current
            .read()
            .as_ref()
            .map(|node| node.ids())
            .unwrap_or_default()
    }

    fn enter(&self, event: &E, context: &StateContext<S, E>) -> Result<(), StateError<S>> {
        self.activate(Arc::clone(&self.initial), event, context)
    }

    fn exit(&self, event: &E, context: &StateContext<S, E>) -> Result<(), StateError<S>> {
        // The lock is released before running actions so they may query ids.
        let Some(node) = self.current() else {
            return Ok(());
        };
        tracing::debug!(region = %self.id, state = node.id().name(), "exiting region");
        node.deactivate(event, context)?;
        *self.current.write() = None;
        Ok(())
    }
}

impl<S: State, E: Event> fmt::Debug for NodeRegion<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRegion")
            .field("id", &self.id)
            .field("initial", self.initial.id())
            .field("current", &self.current().map(|node| node.id().clone()))
            .finish()
    }
}
