//! Build errors for state node construction.

use thiserror::Error;

/// A single structural problem found while validating a node builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeViolation {
    #[error("State id not specified. Call .id(state) before .build()")]
    MissingId,

    #[error("State has {regions} region(s) and a submachine. Use one or the other")]
    ConflictingContent { regions: usize },
}

/// Errors that can occur when building state nodes.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid state node: {}", describe(.0))]
    InvariantViolation(Vec<NodeViolation>),
}

impl BuildError {
    pub fn violations(&self) -> &[NodeViolation] {
        match self {
            Self::InvariantViolation(violations) => violations,
        }
    }
}

fn describe(violations: &[NodeViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_lists_every_violation() {
        let err = BuildError::InvariantViolation(vec![
            NodeViolation::MissingId,
            NodeViolation::ConflictingContent { regions: 2 },
        ]);

        assert_eq!(
            err.to_string(),
            "Invalid state node: State id not specified. Call .id(state) before .build(); \
             State has 2 region(s) and a submachine. Use one or the other"
        );
        assert_eq!(err.violations().len(), 2);
    }
}
