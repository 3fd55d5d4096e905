//! Payoff Matrix
//!
//! The game being played: a total function from an ordered pair of actions
//! to `(payoff_self, payoff_other)`.

use dilemma_events::Action;
use serde::{Deserialize, Serialize};

/// Payoffs for the four action combinations, keyed by (self, other).
///
/// `cd` is the outcome when self cooperates and the other defects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoffMatrix {
    pub cc: (f64, f64),
    pub cd: (f64, f64),
    pub dc: (f64, f64),
    pub dd: (f64, f64),
}

impl PayoffMatrix {
    /// Canonical values used by the sandbox
    pub const CANONICAL: PayoffMatrix = PayoffMatrix {
        cc: (3.0, 3.0),
        cd: (0.0, 2.0),
        dc: (2.0, 0.0),
        dd: (0.0, 0.0),
    };

    pub fn outcome(&self, own: Action, other: Action) -> (f64, f64) {
        match (own, other) {
            (Action::Cooperate, Action::Cooperate) => self.cc,
            (Action::Cooperate, Action::Defect) => self.cd,
            (Action::Defect, Action::Cooperate) => self.dc,
            (Action::Defect, Action::Defect) => self.dd,
        }
    }

    /// Payoff credited to the agent playing `own` against `other`
    pub fn self_payoff(&self, own: Action, other: Action) -> f64 {
        self.outcome(own, other).0
    }
}

impl Default for PayoffMatrix {
    fn default() -> Self {
        Self::CANONICAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_values() {
        let m = PayoffMatrix::default();
        assert_eq!(m.outcome(Action::Cooperate, Action::Cooperate), (3.0, 3.0));
        assert_eq!(m.outcome(Action::Cooperate, Action::Defect), (0.0, 2.0));
        assert_eq!(m.outcome(Action::Defect, Action::Cooperate), (2.0, 0.0));
        assert_eq!(m.outcome(Action::Defect, Action::Defect), (0.0, 0.0));
    }

    #[test]
    fn test_symmetry() {
        let m = PayoffMatrix::default();
        for a in Action::BOTH {
            for b in Action::BOTH {
                assert_eq!(m.self_payoff(a, b), m.outcome(b, a).1);
                assert_eq!(m.self_payoff(b, a), m.outcome(a, b).1);
            }
        }
    }

    #[test]
    fn test_mutual_cooperation_beats_mutual_defection() {
        let m = PayoffMatrix::default();
        let (a, b) = m.outcome(Action::Cooperate, Action::Cooperate);
        let (c, d) = m.outcome(Action::Defect, Action::Defect);
        assert!(a + b > c + d);
    }
}
