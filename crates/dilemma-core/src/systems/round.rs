//! Round Engine
//!
//! One discrete step: score payoffs from the actions fixed last round, then
//! evaluate every strategy against that same frozen state and commit all
//! staged changes at once. Nodes never observe a neighbor's new action
//! within the round that produced it.

use dilemma_events::Action;
use rand::Rng;
use serde::Serialize;

use crate::components::agent::AgentStore;
use crate::components::network::{NodeId, SocialGraph};
use crate::components::payoff::PayoffMatrix;
use crate::error::SimError;
use crate::systems::payoff::{collect_adjacency, compute_payoffs, Adjacency};
use crate::systems::strategy::DecisionContext;

/// What happened in one round, measured on the actions that were scored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundReport {
    /// 1-based index of the completed round
    pub round: u64,
    pub cooperators: usize,
    pub defectors: usize,
    pub total_payoff: f64,
    /// Grim triggers that latched this round
    pub newly_triggered: usize,
}

impl RoundReport {
    pub fn cooperation_rate(&self) -> f64 {
        let total = self.cooperators + self.defectors;
        if total == 0 {
            0.0
        } else {
            self.cooperators as f64 / total as f64
        }
    }
}

/// Changes for one node, held back until every node has been evaluated
#[derive(Debug, Clone, PartialEq)]
pub struct StagedUpdate {
    pub node: NodeId,
    pub next_action: Action,
    pub trigger: bool,
    pub prev_payoff: f64,
    /// Neighbor actions as they stood at the start of the round
    pub observed: Vec<(NodeId, Action)>,
}

/// Run the strategy pass without mutating anything.
///
/// Every decision reads start-of-round actions, memory, and `prev_payoff`.
pub fn evaluate_strategies<R: Rng + ?Sized>(
    adjacency: &Adjacency,
    agents: &AgentStore,
    rng: &mut R,
) -> Result<Vec<StagedUpdate>, SimError> {
    let mut staged = Vec::with_capacity(adjacency.len());

    for (node, neighbors) in adjacency {
        let ctx = DecisionContext::new(*node, neighbors, agents).ok_or(SimError::UnknownNode(*node))?;
        let decision = ctx.me.strategy.decide(&ctx, rng);

        let observed = neighbors
            .iter()
            .map(|&n| agents.get(n).map(|s| (n, s.current_action)).ok_or(SimError::UnknownNode(n)))
            .collect::<Result<Vec<_>, _>>()?;

        staged.push(StagedUpdate {
            node: *node,
            next_action: decision.action,
            trigger: decision.trigger,
            prev_payoff: ctx.me.payoff,
            observed,
        });
    }

    Ok(staged)
}

/// Apply staged updates to every node. Returns how many triggers latched.
pub fn commit_updates(agents: &mut AgentStore, staged: Vec<StagedUpdate>) -> usize {
    let mut newly_triggered = 0;

    for update in staged {
        let Some(state) = agents.get_mut(update.node) else {
            continue;
        };
        if update.trigger && !state.triggered {
            state.latch();
            newly_triggered += 1;
            tracing::trace!(node = %update.node, "grim trigger latched");
        }
        state.prev_payoff = update.prev_payoff;
        for (neighbor, action) in update.observed {
            state.observe(neighbor, action);
        }
        state.current_action = update.next_action;
    }

    newly_triggered
}

/// Advance the network by one round.
///
/// The graph is validated against the store before any write, so an error
/// leaves every agent exactly as it was.
pub fn advance_round<G, R>(
    round: u64,
    graph: &G,
    agents: &mut AgentStore,
    matrix: &PayoffMatrix,
    rng: &mut R,
) -> Result<RoundReport, SimError>
where
    G: SocialGraph + ?Sized,
    R: Rng + ?Sized,
{
    let adjacency = collect_adjacency(graph, agents)?;

    // Pass 1: payoffs from last round's actions
    let payoffs = compute_payoffs(&adjacency, agents, matrix);
    let mut cooperators = 0;
    let mut total_payoff = 0.0;
    for ((node, _), payoff) in adjacency.iter().zip(&payoffs) {
        if let Some(state) = agents.get_mut(*node) {
            state.payoff = *payoff;
            total_payoff += *payoff;
            if state.current_action.is_cooperate() {
                cooperators += 1;
            }
        }
    }

    // Pass 2: decide against frozen state, then commit everything together
    let staged = evaluate_strategies(&adjacency, agents, rng)?;
    let newly_triggered = commit_updates(agents, staged);

    let report = RoundReport {
        round,
        cooperators,
        defectors: adjacency.len() - cooperators,
        total_payoff,
        newly_triggered,
    };

    tracing::debug!(
        round,
        cooperators = report.cooperators,
        defectors = report.defectors,
        total_payoff = report.total_payoff,
        newly_triggered,
        "round complete"
    );

    Ok(report)
}
