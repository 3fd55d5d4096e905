//! Strategy Summary Types
//!
//! Aggregate payoff statistics for all agents sharing a strategy.

use serde::{Deserialize, Serialize};

/// Payoff aggregate for one strategy group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySummary {
    pub strategy: String,
    pub total_nodes: usize,
    pub total_payoff: f64,
    pub average_payoff: f64,
    pub min_payoff: f64,
    pub max_payoff: f64,
}

impl StrategySummary {
    /// Start a group from its first member's payoff
    pub fn new(strategy: impl Into<String>, payoff: f64) -> Self {
        Self {
            strategy: strategy.into(),
            total_nodes: 1,
            total_payoff: payoff,
            average_payoff: payoff,
            min_payoff: payoff,
            max_payoff: payoff,
        }
    }

    /// Fold another member's payoff into the group
    pub fn record(&mut self, payoff: f64) {
        self.total_nodes += 1;
        self.total_payoff += payoff;
        self.min_payoff = self.min_payoff.min(payoff);
        self.max_payoff = self.max_payoff.max(payoff);
        self.average_payoff = self.total_payoff / self.total_nodes as f64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record() {
        let mut summary = StrategySummary::new("Grim-Trigger", 4.0);
        summary.record(2.0);
        summary.record(9.0);

        assert_eq!(summary.total_nodes, 3);
        assert_eq!(summary.total_payoff, 15.0);
        assert_eq!(summary.average_payoff, 5.0);
        assert_eq!(summary.min_payoff, 2.0);
        assert_eq!(summary.max_payoff, 9.0);
    }
}
