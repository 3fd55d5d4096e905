//! Simulation
//!
//! Owns the network, the agent store, the payoff matrix, and the random
//! source for one run. A seed fully determines the run.

use dilemma_events::{RoundSnapshot, StrategySummary};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::components::agent::{AgentState, AgentStore};
use crate::components::network::{NodeId, SocialGraph};
use crate::components::payoff::PayoffMatrix;
use crate::error::SimError;
use crate::output::{capture_snapshot, summarize};
use crate::setup::agents::{initialize, StrategyDistribution};
use crate::systems::round::{advance_round, RoundReport};
use crate::SimRng;

/// How to seed a new simulation
#[derive(Debug, Clone)]
pub struct SimOptions {
    pub seed: u64,
    /// Draw starting actions at random instead of all cooperating
    pub random_start: bool,
    pub distribution: Option<StrategyDistribution>,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            random_start: true,
            distribution: None,
        }
    }
}

/// A single iterated Prisoner's Dilemma run over a fixed network
#[derive(Debug)]
pub struct Simulation<G> {
    graph: G,
    agents: AgentStore,
    matrix: PayoffMatrix,
    rng: SimRng,
    round: u64,
}

impl<G: SocialGraph> Simulation<G> {
    /// Initialize every node of `graph` from `options`
    pub fn new(graph: G, matrix: PayoffMatrix, options: &SimOptions) -> Result<Self, SimError> {
        let mut rng = SimRng::seeded(options.seed);
        let agents = initialize(&graph, options.distribution.as_ref(), options.random_start, &mut rng.0)?;
        Ok(Self {
            graph,
            agents,
            matrix,
            rng,
            round: 0,
        })
    }

    /// Start from prepared agent state; `agents[i]` belongs to `NodeId(i)`
    pub fn with_agents(graph: G, agents: AgentStore, matrix: PayoffMatrix, seed: u64) -> Result<Self, SimError> {
        if graph.node_count() != agents.len() {
            return Err(SimError::NodeCountMismatch {
                graph: graph.node_count(),
                agents: agents.len(),
            });
        }
        Ok(Self {
            graph,
            agents,
            matrix,
            rng: SimRng::seeded(seed),
            round: 0,
        })
    }

    /// Score one round and move every agent to its next action
    pub fn advance_round(&mut self) -> Result<RoundReport, SimError> {
        let report = advance_round(
            self.round + 1,
            &self.graph,
            &mut self.agents,
            &self.matrix,
            &mut self.rng.0,
        )?;
        self.round += 1;
        Ok(report)
    }

    /// Advance `rounds` times, stopping at the first error
    pub fn run(&mut self, rounds: u64) -> Result<Vec<RoundReport>, SimError> {
        let mut reports = Vec::new();
        for _ in 0..rounds {
            reports.push(self.advance_round()?);
        }
        if let Some(last) = reports.last() {
            tracing::info!(
                rounds = self.round,
                cooperation_rate = last.cooperation_rate(),
                total_payoff = last.total_payoff,
                "run complete"
            );
        }
        Ok(reports)
    }

    /// Completed rounds
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    pub fn agent(&self, node: NodeId) -> Option<&AgentState> {
        self.agents.get(node)
    }

    pub fn summarize(&self) -> Vec<StrategySummary> {
        summarize(&self.graph, &self.agents)
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        capture_snapshot(&self.graph, &self.agents, self.round)
    }
}

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::strategy::StrategyKind;
    use dilemma_events::Action;
    use petgraph::graph::UnGraph;

    #[test]
    fn test_round_counter() {
        let graph = UnGraph::<(), ()>::from_edges([(0u32, 1u32), (1, 2)]);
        let mut sim = Simulation::new(graph, PayoffMatrix::default(), &SimOptions::default()).unwrap();
        assert_eq!(sim.round(), 0);

        let reports = sim.run(3).unwrap();

        assert_eq!(sim.round(), 3);
        assert_eq!(reports.iter().map(|r| r.round).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(sim.snapshot().round, 3);
    }

    /// Points every node at a neighbor the store never saw
    struct Dangling;

    impl SocialGraph for Dangling {
        fn node_count(&self) -> usize {
            1
        }

        fn nodes(&self) -> Vec<NodeId> {
            vec![NodeId(0)]
        }

        fn neighbors(&self, _node: NodeId) -> Vec<NodeId> {
            vec![NodeId(7)]
        }
    }

    #[test]
    fn test_run_huge_round_count_starts_without_reserving() {
        let agents = AgentStore::from_states(vec![AgentState::new(StrategyKind::TitForTat, Action::Cooperate)]);
        let mut sim = Simulation::with_agents(Dangling, agents, PayoffMatrix::default(), 0).unwrap();

        let result = sim.run(u64::MAX);

        assert!(matches!(result, Err(SimError::UnknownNode(NodeId(7)))));
        assert_eq!(sim.round(), 0);
    }

    #[test]
    fn test_with_agents_checks_size() {
        let graph = UnGraph::<(), ()>::from_edges([(0u32, 1u32)]);
        let agents = AgentStore::from_states(vec![AgentState::new(StrategyKind::Pavlov, Action::Cooperate)]);

        let result = Simulation::with_agents(graph, agents, PayoffMatrix::default(), 0);
        assert!(matches!(result, Err(SimError::NodeCountMismatch { graph: 2, agents: 1 })));
    }

    #[test]
    fn test_distribution_applied() {
        let graph = UnGraph::<(), ()>::from_edges([(0u32, 1u32)]);
        let options = SimOptions {
            distribution: StrategyDistribution::from_tags([("Pavlov", 1.0)]).ok(),
            ..SimOptions::default()
        };
        let sim = Simulation::new(graph, PayoffMatrix::default(), &options).unwrap();
        assert!(sim.agents().iter().all(|(_, s)| s.strategy == StrategyKind::Pavlov));
    }
}
