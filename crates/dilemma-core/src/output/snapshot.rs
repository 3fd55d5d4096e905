//! Snapshot Output
//!
//! Captures every agent into the shared serializable snapshot types.

use dilemma_events::{NodeSnapshot, RoundSnapshot};

use crate::components::agent::AgentStore;
use crate::components::network::SocialGraph;

/// Snapshot of every node the graph enumerates, after `round` completed rounds
pub fn capture_snapshot<G: SocialGraph + ?Sized>(graph: &G, agents: &AgentStore, round: u64) -> RoundSnapshot {
    let mut snapshot = RoundSnapshot::new(round);
    for node in graph.nodes() {
        let Some(state) = agents.get(node) else {
            continue;
        };
        let neighbors = graph.neighbors(node);
        snapshot.nodes.push(NodeSnapshot {
            node: node.index(),
            strategy: state.strategy.tag().to_string(),
            action: state.current_action,
            payoff: state.payoff,
            prev_payoff: state.prev_payoff,
            triggered: state.triggered,
            degree: neighbors.len(),
            remembered: neighbors.iter().filter(|&&n| state.has_observed(n)).count(),
        });
    }
    snapshot
}
