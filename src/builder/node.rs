//! Builder for constructing state nodes.

use crate::action::{Action, ActionList, ActionRef};
use crate::builder::error::{BuildError, NodeViolation};
use crate::core::{Event, PseudoState, PseudoStateKind, State};
use crate::node::{Content, StateNode};
use crate::region::{Region, RegionRef, Submachine, SubmachineRef};
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for state nodes with a fluent API.
///
/// Every field except the id defaults to empty/absent.
pub struct StateNodeBuilder<S: State, E: Event> {
    id: Option<S>,
    deferred: Vec<E>,
    entry_actions: ActionList<S, E>,
    exit_actions: ActionList<S, E>,
    pseudo_state: Option<PseudoState>,
    regions: Vec<RegionRef<S, E>>,
    submachine: Option<SubmachineRef<S, E>>,
}

impl<S: State, E: Event> StateNodeBuilder<S, E> {
    /// Empty builder; only the id is required before `build`.
    pub fn new() -> Self {
        Self {
            id: None,
            deferred: Vec::new(),
            entry_actions: ActionList::new(),
            exit_actions: ActionList::new(),
            pseudo_state: None,
            regions: Vec::new(),
            submachine: None,
        }
    }

    /// Set the state id (required).
    pub fn id(mut self, id: S) -> Self {
        self.id = Some(id);
        self
    }

    /// Defer a single event while the node is active.
    pub fn defer(mut self, event: E) -> Self {
        self.deferred.push(event);
        self
    }

    /// Defer several events at once.
    pub fn deferred(mut self, events: impl IntoIterator<Item = E>) -> Self {
        self.deferred.extend(events);
        self
    }

    /// Append an entry action.
    pub fn entry<A>(mut self, action: A) -> Self
    where
        A: Action<S, E> + 'static,
    {
        self.entry_actions.push(Arc::new(action));
        self
    }

    /// Append an already shared entry action.
    pub fn entry_ref(mut self, action: ActionRef<S, E>) -> Self {
        self.entry_actions.push(action);
        self
    }

    /// Append an exit action.
    pub fn exit<A>(mut self, action: A) -> Self
    where
        A: Action<S, E> + 'static,
    {
        self.exit_actions.push(Arc::new(action));
        self
    }

    /// Append an already shared exit action.
    pub fn exit_ref(mut self, action: ActionRef<S, E>) -> Self {
        self.exit_actions.push(action);
        self
    }

    /// Tag the node with a pseudostate role.
    pub fn pseudo_state(mut self, kind: PseudoStateKind) -> Self {
        self.pseudo_state = Some(PseudoState::new(kind));
        self
    }

    /// Add a region, making the node composite.
    pub fn region<R>(mut self, region: R) -> Self
    where
        R: Region<S, E> + 'static,
    {
        self.regions.push(Arc::new(region));
        self
    }

    /// Add several regions in declared order.
    pub fn regions(mut self, regions: impl IntoIterator<Item = RegionRef<S, E>>) -> Self {
        self.regions.extend(regions);
        self
    }

    /// Delegate the node's internal behavior to a nested machine.
    pub fn submachine<M>(mut self, machine: M) -> Self
    where
        M: Submachine<S, E> + 'static,
    {
        self.submachine = Some(Arc::new(machine));
        self
    }

    /// Delegate to an already shared nested machine.
    pub fn submachine_ref(mut self, machine: SubmachineRef<S, E>) -> Self {
        self.submachine = Some(machine);
        self
    }

    /// Check every structural rule, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<NodeViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<NodeViolation>>> = Vec::new();

        let id_check = if self.id.is_some() {
            Validation::success(())
        } else {
            Validation::fail(NodeViolation::MissingId)
        };
        checks.push(id_check);

        let content_check = if !self.regions.is_empty() && self.submachine.is_some() {
            Validation::fail(NodeViolation::ConflictingContent {
                regions: self.regions.len(),
            })
        } else {
            Validation::success(())
        };
        checks.push(content_check);

        Validation::all_vec(checks).map(|_| ())
    }

    /// Build the node.
    /// Returns every violated invariant at once if validation fails.
    pub fn build(self) -> Result<StateNode<S, E>, BuildError> {
        if let Validation::Failure(violations) = self.validate() {
            return Err(BuildError::InvariantViolation(
                violations.iter().cloned().collect(),
            ));
        }

        let id = self
            .id
            .ok_or_else(|| BuildError::InvariantViolation(vec![NodeViolation::MissingId]))?;

        let content = match self.submachine {
            Some(machine) => Content::Submachine(machine),
            None => Content::Regions(self.regions),
        };

        Ok(StateNode::new(
            id,
            self.deferred,
            self.entry_actions,
            self.exit_actions,
            self.pseudo_state,
            content,
        ))
    }
}

impl<S: State, E: Event> Default for StateNodeBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
