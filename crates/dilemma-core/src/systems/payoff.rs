//! Payoff Pass
//!
//! First pass of a round: score every node against each neighbor using the
//! actions fixed at the end of the previous round.

use crate::components::agent::AgentStore;
use crate::components::network::{NodeId, SocialGraph};
use crate::components::payoff::PayoffMatrix;
use crate::error::SimError;

/// Each node with its neighbor list, captured once per round
pub type Adjacency = Vec<(NodeId, Vec<NodeId>)>;

/// Snapshot the graph for one round, rejecting any node the store does not know.
///
/// Runs before anything is written so a bad graph leaves state untouched.
pub fn collect_adjacency<G: SocialGraph + ?Sized>(
    graph: &G,
    agents: &AgentStore,
) -> Result<Adjacency, SimError> {
    let nodes = graph.nodes();
    let mut adjacency = Vec::with_capacity(nodes.len());

    for node in nodes {
        if !agents.contains(node) {
            return Err(SimError::UnknownNode(node));
        }
        let neighbors = graph.neighbors(node);
        if let Some(&missing) = neighbors.iter().find(|&&n| !agents.contains(n)) {
            return Err(SimError::UnknownNode(missing));
        }
        adjacency.push((node, neighbors));
    }

    Ok(adjacency)
}

/// Payoff totals for every node in adjacency order.
///
/// Only reads `current_action`, so the result does not depend on visitation order.
pub fn compute_payoffs(adjacency: &Adjacency, agents: &AgentStore, matrix: &PayoffMatrix) -> Vec<f64> {
    adjacency
        .iter()
        .map(|(node, neighbors)| {
            let own = agents[*node].current_action;
            neighbors
                .iter()
                .map(|&neighbor| matrix.self_payoff(own, agents[neighbor].current_action))
                .sum()
        })
        .collect()
}
