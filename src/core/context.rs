//! Context handed to entry and exit actions.

use crate::core::state::{Event, State};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Extended-state variables shared between actions.
///
/// Cloning an `ExtendedState` shares the underlying map.
#[derive(Clone, Debug, Default)]
pub struct ExtendedState {
    variables: Arc<RwLock<HashMap<String, Value>>>,
}

impl ExtendedState {
    /// Empty variable map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a variable, returning the previous value if any.
    pub fn set<T: Serialize>(
        &self,
        key: impl Into<String>,
        value: T,
    ) -> Result<Option<Value>, serde_json::Error> {
        let value = serde_json::to_value(value)?;
        Ok(self.variables.write().insert(key.into(), value))
    }

    /// Read a variable and decode it into `T`.
    ///
    /// Returns `Ok(None)` when the variable is not set.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, serde_json::Error> {
        self.variables
            .read()
            .get(key)
            .map(|value| serde_json::from_value(value.clone()))
            .transpose()
    }

    /// Whether a variable is set.
    pub fn contains(&self, key: &str) -> bool {
        self.variables.read().contains_key(key)
    }

    /// Remove a variable, returning its raw value.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.variables.write().remove(key)
    }

    /// Number of variables set.
    pub fn len(&self) -> usize {
        self.variables.read().len()
    }

    /// Whether no variable is set.
    pub fn is_empty(&self) -> bool {
        self.variables.read().is_empty()
    }
}

/// Opaque bag of event and extended-state data passed through to actions.
///
/// The node never inspects or modifies the context; it only forwards the
/// same reference to every action in a list.
#[derive(Clone, Debug)]
pub struct StateContext<S: State, E: Event> {
    event: Option<E>,
    source: Option<S>,
    target: Option<S>,
    extended: ExtendedState,
    created_at: DateTime<Utc>,
}

impl<S: State, E: Event> StateContext<S, E> {
    /// Context with no event or endpoints and a fresh extended state.
    pub fn new() -> Self {
        Self {
            event: None,
            source: None,
            target: None,
            extended: ExtendedState::new(),
            created_at: Utc::now(),
        }
    }

    /// Context for a transition triggered by `event`.
    pub fn for_event(event: E) -> Self {
        Self::new().with_event(event)
    }

    /// Attach the triggering event.
    pub fn with_event(mut self, event: E) -> Self {
        self.event = Some(event);
        self
    }

    /// Attach the transition's source state.
    pub fn with_source(mut self, source: S) -> Self {
        self.source = Some(source);
        self
    }

    /// Attach the transition's target state.
    pub fn with_target(mut self, target: S) -> Self {
        self.target = Some(target);
        self
    }

    /// Share an existing extended state with this context.
    pub fn with_extended_state(mut self, extended: ExtendedState) -> Self {
        self.extended = extended;
        self
    }

    /// Triggering event, if any.
    pub fn event(&self) -> Option<&E> {
        self.event.as_ref()
    }

    /// Source state of the transition, if any.
    pub fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    /// Target state of the transition, if any.
    pub fn target(&self) -> Option<&S> {
        self.target.as_ref()
    }

    /// Shared extended-state variables.
    pub fn extended_state(&self) -> &ExtendedState {
        &self.extended
    }

    /// When the context was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time elapsed since the context was created.
    pub fn elapsed(&self) -> Duration {
        Utc::now()
            .signed_duration_since(self.created_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

impl<S: State, E: Event> Default for StateContext<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
