//! Action Types
//!
//! The binary choice every agent holds for a round.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single move in the Prisoner's Dilemma.
///
/// Numerically encoded as `Cooperate = 1`, `Defect = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    #[default]
    Cooperate,
    Defect,
}

impl Action {
    /// Both actions, cooperation first.
    pub const BOTH: [Action; 2] = [Action::Cooperate, Action::Defect];

    /// Numeric encoding (1 for cooperate, 0 for defect)
    pub fn as_u8(self) -> u8 {
        match self {
            Action::Cooperate => 1,
            Action::Defect => 0,
        }
    }

    /// Decode the numeric encoding. Any value other than 0 or 1 is rejected.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Action::Cooperate),
            0 => Some(Action::Defect),
            _ => None,
        }
    }

    /// The opposite action (lose-shift)
    pub fn flip(self) -> Self {
        match self {
            Action::Cooperate => Action::Defect,
            Action::Defect => Action::Cooperate,
        }
    }

    pub fn is_cooperate(self) -> bool {
        self == Action::Cooperate
    }

    pub fn is_defect(self) -> bool {
        self == Action::Defect
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Cooperate => write!(f, "C"),
            Action::Defect => write!(f, "D"),
        }
    }
}
