//! SessionPhase - lifecycle of a practice session.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle phase of a practice session.
///
/// `Idle -> Active -> Ended -> Idle`. Starting again from `Ended` opens a new
/// session generation; resetting is accepted from any phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    #[default]
    Idle,
    Active,
    Ended,
}

impl SessionPhase {
    /// Returns true if a new scenario may be started from this phase.
    pub fn can_start(&self) -> bool {
        self.can_transition_to(&SessionPhase::Active)
    }

    /// Returns true once a scenario has been started and not yet reset.
    pub fn has_scenario(&self) -> bool {
        !matches!(self, SessionPhase::Idle)
    }
}

impl StateMachine for SessionPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionPhase::*;
        matches!(
            (self, target),
            (Idle, Active) | (Active, Ended) | (Active, Idle) | (Ended, Idle) | (Ended, Active)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionPhase::*;
        match self {
            Idle => vec![Active],
            Active => vec![Ended, Idle],
            Ended => vec![Idle, Active],
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Active => "active",
            SessionPhase::Ended => "ended",
        };
        write!(f, "{}", s)
    }
}
