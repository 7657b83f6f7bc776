//! Pseudostate roles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The non-ordinary role a node can play in the machine.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PseudoStateKind {
    /// Default entry point of a region.
    Initial,
    /// Terminates the enclosing region.
    End,
    /// Dynamic conditional branch.
    Choice,
    /// Static conditional branch.
    Junction,
    /// Splits an incoming transition into concurrent regions.
    Fork,
    /// Merges transitions coming out of concurrent regions.
    Join,
    /// Remembers the last active direct substate.
    HistoryShallow,
    /// Remembers the last active nested configuration.
    HistoryDeep,
}

impl PseudoStateKind {
    /// Whether the kind records a previous configuration.
    pub fn is_history(&self) -> bool {
        matches!(self, Self::HistoryShallow | Self::HistoryDeep)
    }
}

impl fmt::Display for PseudoStateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Initial => "initial",
            Self::End => "end",
            Self::Choice => "choice",
            Self::Junction => "junction",
            Self::Fork => "fork",
            Self::Join => "join",
            Self::HistoryShallow => "history_shallow",
            Self::HistoryDeep => "history_deep",
        };
        f.write_str(name)
    }
}

/// Tags a state node with a pseudostate role.
///
/// Carries identity only; routing through the pseudostate is a
/// transition-layer concern.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct PseudoState {
    kind: PseudoStateKind,
}

impl PseudoState {
    /// Pseudostate playing the given role.
    pub fn new(kind: PseudoStateKind) -> Self {
        Self { kind }
    }

    /// Role of this pseudostate.
    pub fn kind(&self) -> PseudoStateKind {
        self.kind
    }
}

impl From<PseudoStateKind> for PseudoState {
    fn from(kind: PseudoStateKind) -> Self {
        Self::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_kinds_are_identified() {
        assert!(PseudoStateKind::HistoryShallow.is_history());
        assert!(PseudoStateKind::HistoryDeep.is_history());
        assert!(!PseudoStateKind::Initial.is_history());
        assert!(!PseudoStateKind::Fork.is_history());
    }

    #[test]
    fn kind_serializes_as_snake_case() {
        let json = serde_json::to_string(&PseudoStateKind::HistoryDeep).unwrap();
        assert_eq!(json, "\"history_deep\"");

        let kind: PseudoStateKind = serde_json::from_str("\"junction\"").unwrap();
        assert_eq!(kind, PseudoStateKind::Junction);
    }

    #[test]
    fn display_matches_serialized_name() {
        assert_eq!(PseudoStateKind::HistoryShallow.to_string(), "history_shallow");
        assert_eq!(PseudoStateKind::End.to_string(), "end");
    }

    #[test]
    fn pseudo_state_wraps_kind() {
        let pseudo = PseudoState::from(PseudoStateKind::Choice);
        assert_eq!(pseudo.kind(), PseudoStateKind::Choice);
        assert_eq!(pseudo, PseudoState::new(PseudoStateKind::Choice));
    }
}
