//! Label traits for state ids and events.
//!
//! A state node is identified by a state label and reacts to event labels.
//! Both are plain values: the traits below only pin down what the node
//! needs from them (comparison, hashing, naming for diagnostics).

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state labels.
///
/// A label uniquely identifies a node within its containing region or
/// machine. Uniqueness is the engine's responsibility; the node only relies
/// on `Eq + Hash` so that sets of ids can be assembled.
///
/// # Required Traits
///
/// - `Clone`: ids are copied into id sets and error values
/// - `Eq` + `Hash`: ids are collected into `HashSet`s
/// - `Debug`: ids are debuggable for diagnostics
/// - `Serialize` + `Deserialize`: ids are serializable for persistence layers
///
/// # Example
///
/// ```rust
/// use stratum::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Light {
///     Off,
///     On,
/// }
///
/// impl State for Light {
///     fn name(&self) -> &str {
///         match self {
///             Self::Off => "Off",
///             Self::On => "On",
///         }
///     }
/// }
///
/// assert_eq!(Light::On.name(), "On");
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

/// Trait for event labels.
///
/// Events appear in a node's deferred set and are handed to `entry`/`exit`
/// as the triggering event.
pub trait Event:
    Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Get the event's name for display/logging.
    fn name(&self) -> &str;
}
