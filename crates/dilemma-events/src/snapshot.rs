//! Snapshot Types
//!
//! Serialization structs for the per-node state of a simulation at a point
//! in time, used for analysis, visualization, and debugging.

use serde::{Deserialize, Serialize};

use crate::Action;

/// State of a single agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub node: usize,
    pub strategy: String,
    pub action: Action,
    pub payoff: f64,
    pub prev_payoff: f64,
    #[serde(default)]
    pub triggered: bool,
    /// Number of neighbors in the network
    #[serde(default)]
    pub degree: usize,
    /// Neighbors this agent has observed at least once
    #[serde(default)]
    pub remembered: usize,
}

impl NodeSnapshot {
    pub fn new(node: usize, strategy: impl Into<String>, action: Action) -> Self {
        Self {
            node,
            strategy: strategy.into(),
            action,
            payoff: 0.0,
            prev_payoff: 0.0,
            triggered: false,
            degree: 0,
            remembered: 0,
        }
    }
}

/// Every agent after a given number of completed rounds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    /// Completed rounds at the time of capture
    pub round: u64,
    pub nodes: Vec<NodeSnapshot>,
}

impl RoundSnapshot {
    pub fn new(round: u64) -> Self {
        Self {
            round,
            nodes: Vec::new(),
        }
    }

    /// Fraction of agents currently cooperating (0.0 for an empty network)
    pub fn cooperation_rate(&self) -> f64 {
        if self.nodes.is_empty() {
            return 0.0;
        }
        let cooperators = self.nodes.iter().filter(|n| n.action.is_cooperate()).count();
        cooperators as f64 / self.nodes.len() as f64
    }

    pub fn find_node(&self, node: usize) -> Option<&NodeSnapshot> {
        self.nodes.iter().find(|n| n.node == node)
    }

    /// Snapshots of every agent playing the given strategy
    pub fn by_strategy<'a>(&'a self, strategy: &'a str) -> impl Iterator<Item = &'a NodeSnapshot> + 'a {
        self.nodes.iter().filter(move |n| n.strategy == strategy)
    }
}
