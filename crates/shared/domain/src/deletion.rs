//! Outcome of propagating a profile deletion to the identity store.

use std::fmt;

/// What the propagator observed for one deletion event.
///
/// Nothing consumes this beyond logs and tests: the event dispatcher treats
/// every reaction as complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    /// The account existed and was removed
    Deleted,
    /// The account was already gone
    AlreadyAbsent,
    /// The identity store reported some other failure
    Failed(String),
}

impl DeletionOutcome {
    /// Both `Deleted` and `AlreadyAbsent` leave the store in the desired state.
    pub fn is_converged(&self) -> bool {
        !matches!(self, DeletionOutcome::Failed(_))
    }
}

impl fmt::Display for DeletionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeletionOutcome::Deleted => f.write_str("deleted"),
            DeletionOutcome::AlreadyAbsent => f.write_str("already absent"),
            DeletionOutcome::Failed(msg) => write!(f, "failed: {}", msg),
        }
    }
}
