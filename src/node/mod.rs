//! State nodes.
//!
//! A [`StateNode`] is one named state of a hierarchical machine: its id, its
//! deferred events, its entry/exit actions, an optional pseudostate role and
//! its nested content. Nested content is a sum type, [`Content`], so a node
//! holds regions or a submachine but never both.
//!
//! The node keeps no "currently active" flag. Activity is tracked by the
//! engine, or read live from regions through [`StateNode::ids`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use stratum::action::ActionError;
//! use stratum::core::StateContext;
//! use stratum::node::StateNode;
//! use stratum::{event_enum, state_enum};
//!
//! state_enum! {
//!     enum Phase { S1 }
//! }
//!
//! event_enum! {
//!     enum Signal { Evt }
//! }
//!
//! let log = Arc::new(Mutex::new(Vec::new()));
//! let (enter_log, exit_log) = (log.clone(), log.clone());
//!
//! let node = StateNode::builder()
//!     .id(Phase::S1)
//!     .entry(move |_: &StateContext<Phase, Signal>| -> Result<(), ActionError> {
//!         enter_log.lock().unwrap().push("enter S1");
//!         Ok(())
//!     })
//!     .exit(move |_: &StateContext<Phase, Signal>| -> Result<(), ActionError> {
//!         exit_log.lock().unwrap().push("exit S1");
//!         Ok(())
//!     })
//!     .build()
//!     .unwrap();
//!
//! let ctx = StateContext::for_event(Signal::Evt);
//! node.entry(&Signal::Evt, &ctx).unwrap();
//! node.exit(&Signal::Evt, &ctx).unwrap();
//!
//! assert_eq!(*log.lock().unwrap(), vec!["enter S1", "exit S1"]);
//! ```

mod error;

pub use error::{Phase, StateError};

use crate::action::{ActionList, ActionRef};
use crate::builder::StateNodeBuilder;
use crate::core::{Event, PseudoState, PseudoStateKind, State, StateContext};
use crate::region::{RegionRef, SubmachineRef};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Nested content of a state node.
pub enum Content<S: State, E: Event> {
    /// No nested behavior.
    Leaf,
    /// One or more regions, entered after the node itself.
    Regions(Vec<RegionRef<S, E>>),
    /// Internal behavior delegated to a nested machine.
    Submachine(SubmachineRef<S, E>),
}

impl<S: State, E: Event> Content<S, E> {
    /// An empty region list carries no composite content.
    fn normalized(self) -> Self {
        match self {
            Self::Regions(regions) if regions.is_empty() => Self::Leaf,
            other => other,
        }
    }
}

impl<S: State, E: Event> Clone for Content<S, E> {
    fn clone(&self) -> Self {
        match self {
            Self::Leaf => Self::Leaf,
            Self::Regions(regions) => Self::Regions(regions.clone()),
            Self::Submachine(machine) => Self::Submachine(machine.clone()),
        }
    }
}

impl<S: State, E: Event> fmt::Debug for Content<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf => f.write_str("Leaf"),
            Self::Regions(regions) => f
                .debug_tuple("Regions")
                .field(&regions.iter().map(|r| r.id()).collect::<Vec<_>>())
                .finish(),
            Self::Submachine(_) => f.write_str("Submachine"),
        }
    }
}

/// A single state of the machine.
///
/// Constructed once with all fields fixed. Equality and hashing use the id
/// only.
pub struct StateNode<S: State, E: Event> {
    id: S,
    deferred: Vec<E>,
    entry_actions: ActionList<S, E>,
    exit_actions: ActionList<S, E>,
    pseudo_state: Option<PseudoState>,
    content: Content<S, E>,
}

impl<S: State, E: Event> StateNode<S, E> {
    /// Canonical constructor; every other way of building a node ends here.
    ///
    /// Duplicate deferred events are dropped, keeping first-insertion order.
    pub fn new(
        id: S,
        deferred: impl IntoIterator<Item = E>,
        entry_actions: ActionList<S, E>,
        exit_actions: ActionList<S, E>,
        pseudo_state: Option<PseudoState>,
        content: Content<S, E>,
    ) -> Self {
        let mut seen = HashSet::new();
        let unique: Vec<E> = deferred
            .into_iter()
            .filter(|event| seen.insert(event.clone()))
            .collect();

        let content = content.normalized();
        debug_assert!(!matches!(&content, Content::Regions(r) if r.is_empty()));

        Self {
            id,
            deferred: unique,
            entry_actions,
            exit_actions,
            pseudo_state,
            content,
        }
    }

    /// Fluent builder filling omitted fields with empty defaults.
    pub fn builder() -> StateNodeBuilder<S, E> {
        StateNodeBuilder::new()
    }

    /// Ordinary state with no actions, no deferred events and no content.
    pub fn simple(id: S) -> Self {
        Self::new(
            id,
            Vec::new(),
            ActionList::new(),
            ActionList::new(),
            None,
            Content::Leaf,
        )
    }

    /// Leaf node carrying a pseudostate role.
    pub fn pseudo(id: S, kind: PseudoStateKind) -> Self {
        Self::new(
            id,
            Vec::new(),
            ActionList::new(),
            ActionList::new(),
            Some(PseudoState::new(kind)),
            Content::Leaf,
        )
    }

    /// Run the entry actions in order.
    ///
    /// Stops at the first failing action and returns it wrapped with this
    /// node's id, [`Phase::Entry`] and the action's position. Calling `entry`
    /// twice runs the actions twice.
    pub fn entry(&self, event: &E, context: &StateContext<S, E>) -> Result<(), StateError<S>> {
        self.run_actions(Phase::Entry, &self.entry_actions, event, context)
    }

    /// Run the exit actions in order. Same failure rule as [`entry`](Self::entry).
    pub fn exit(&self, event: &E, context: &StateContext<S, E>) -> Result<(), StateError<S>> {
        self.run_actions(Phase::Exit, &self.exit_actions, event, context)
    }

    fn run_actions(
        &self,
        phase: Phase,
        actions: &ActionList<S, E>,
        event: &E,
        context: &StateContext<S, E>,
    ) -> Result<(), StateError<S>> {
        tracing::debug!(
            state = self.id.name(),
            event = event.name(),
            %phase,
            actions = actions.len(),
            "running state actions"
        );

        actions.run(context).map_err(|failure| {
            tracing::warn!(
                state = self.id.name(),
                %phase,
                index = failure.index,
                error = %failure.error,
                "state action failed"
            );
            StateError::ActionExecution {
                state: self.id.clone(),
                phase,
                index: failure.index,
                source: failure.error,
            }
        })
    }

    /// Enter this node and then its nested content.
    ///
    /// Entry is outside-in: the node's own entry actions complete before any
    /// region is entered (in declared order) or the submachine is started.
    pub fn activate(&self, event: &E, context: &StateContext<S, E>) -> Result<(), StateError<S>> {
        self.entry(event, context)?;
        match &self.content {
            Content::Leaf => Ok(()),
            Content::Regions(regions) => regions
                .iter()
                .try_for_each(|region| region.enter(event, context)),
            Content::Submachine(machine) => machine.start(event, context),
        }
    }

    /// Leave the nested content and then this node.
    ///
    /// Exit is inside-out: regions are exited (in declared order) or the
    /// submachine is stopped before the node's own exit actions run. If a
    /// region fails to exit, later regions and this node's exit actions are
    /// skipped and the node still reports the unexited ids.
    pub fn deactivate(
        &self,
        event: &E,
        context: &StateContext<S, E>,
    ) -> Result<(), StateError<S>> {
        match &self.content {
            Content::Leaf => {}
            Content::Regions(regions) => regions
                .iter()
                .try_for_each(|region| region.exit(event, context))?,
            Content::Submachine(machine) => machine.stop(event, context)?,
        }
        self.exit(event, context)
    }

    /// This node's id plus the ids currently active in its nested content.
    ///
    /// Regions and submachines are queried live on every call.
    pub fn ids(&self) -> HashSet<S> {
        let mut ids = HashSet::new();
        ids.insert(self.id.clone());
        match &self.content {
            Content::Leaf => {}
            Content::Regions(regions) => {
                for region in regions {
                    ids.extend(region.active_ids());
                }
            }
            Content::Submachine(machine) => ids.extend(machine.active_ids()),
        }
        ids
    }

    /// No pseudostate role and no nested content.
    pub fn is_simple(&self) -> bool {
        self.pseudo_state.is_none() && matches!(self.content, Content::Leaf)
    }

    /// Owns at least one region.
    pub fn is_composite(&self) -> bool {
        matches!(&self.content, Content::Regions(regions) if !regions.is_empty())
    }

    /// Owns more than one region.
    pub fn is_orthogonal(&self) -> bool {
        matches!(&self.content, Content::Regions(regions) if regions.len() > 1)
    }

    /// Delegates to a nested machine.
    pub fn is_submachine_state(&self) -> bool {
        matches!(self.content, Content::Submachine(_))
    }

    /// Carries a pseudostate role.
    pub fn is_pseudo_state(&self) -> bool {
        self.pseudo_state.is_some()
    }

    /// Whether `event` must be queued while this node is active.
    pub fn should_defer(&self, event: &E) -> bool {
        self.deferred.contains(event)
    }

    /// Unique identity of this node.
    pub fn id(&self) -> &S {
        &self.id
    }

    /// Deferred events in first-insertion order.
    pub fn deferred(&self) -> &[E] {
        &self.deferred
    }

    /// Entry actions in execution order.
    pub fn entry_actions(&self) -> &[ActionRef<S, E>] {
        self.entry_actions.as_slice()
    }

    /// Exit actions in execution order.
    pub fn exit_actions(&self) -> &[ActionRef<S, E>] {
        self.exit_actions.as_slice()
    }

    /// Pseudostate role, if any.
    pub fn pseudo_state(&self) -> Option<&PseudoState> {
        self.pseudo_state.as_ref()
    }

    /// Regions of a composite node; empty for every other shape.
    pub fn regions(&self) -> &[RegionRef<S, E>] {
        match &self.content {
            Content::Regions(regions) => regions,
            Content::Leaf | Content::Submachine(_) => &[],
        }
    }

    /// Nested machine of a submachine state.
    pub fn submachine(&self) -> Option<&SubmachineRef<S, E>> {
        match &self.content {
            Content::Submachine(machine) => Some(machine),
            Content::Leaf | Content::Regions(_) => None,
        }
    }

    /// Nested content of this node.
    pub fn content(&self) -> &Content<S, E> {
        &self.content
    }
}

impl<S: State, E: Event> PartialEq for StateNode<S, E> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<S: State, E: Event> Eq for StateNode<S, E> {}

impl<S: State, E: Event> Hash for StateNode<S, E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<S: State, E: Event> fmt::Debug for StateNode<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateNode")
            .field("id", &self.id)
            .field("deferred", &self.deferred)
            .field("entry_actions", &self.entry_actions)
            .field("exit_actions", &self.exit_actions)
            .field("pseudo_state", &self.pseudo_state)
            .field("content", &self.content)
            .finish()
    }
}

impl<S: State, E: Event> fmt::Display for StateNode<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id.name())?;
        if let Some(pseudo) = &self.pseudo_state {
            write!(f, " <{}>", pseudo.kind())?;
        }
        match &self.content {
            Content::Leaf => Ok(()),
            Content::Regions(regions) => {
                let names: Vec<&str> = regions.iter().map(|r| r.id()).collect();
                write!(f, " [regions: {}]", names.join(", "))
            }
            Content::Submachine(_) => f.write_str(" [submachine]"),
        }
    }
}
