//! Property tests for the round engine.

use dilemma_core::{Action, AgentState, AgentStore, NodeId, PayoffMatrix, SimError, Simulation, SocialGraph, StrategyKind};
use petgraph::graph::{NodeIndex, UnGraph};
use proptest::prelude::*;

/// Strategies that never draw from the random source
fn deterministic() -> Vec<StrategyKind> {
    StrategyKind::ALL.into_iter().filter(|k| !k.is_randomized()).collect()
}

/// Same network, nodes visited in reverse
struct Reversed<G>(G);

impl<G: SocialGraph> SocialGraph for Reversed<G> {
    fn node_count(&self) -> usize {
        self.0.node_count()
    }

    fn nodes(&self) -> Vec<NodeId> {
        let mut nodes = self.0.nodes();
        nodes.reverse();
        nodes
    }

    fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        self.0.neighbors(node)
    }
}

#[derive(Debug, Clone)]
struct Network {
    graph: UnGraph<(), ()>,
    states: Vec<AgentState>,
}

fn build(n: usize, edges: &[(usize, usize)], kinds: &[usize], cooperating: &[bool], pool: &[StrategyKind]) -> Network {
    let mut graph = UnGraph::<(), ()>::default();
    for _ in 0..n {
        graph.add_node(());
    }
    for &(a, b) in edges {
        if a != b {
            graph.update_edge(NodeIndex::new(a), NodeIndex::new(b), ());
        }
    }
    let states = kinds
        .iter()
        .zip(cooperating)
        .map(|(&k, &c)| {
            let action = if c { Action::Cooperate } else { Action::Defect };
            AgentState::new(pool[k % pool.len()], action)
        })
        .collect();
    Network { graph, states }
}

fn network(pool: Vec<StrategyKind>) -> impl Strategy<Value = Network> {
    (1usize..12)
        .prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec((0..n, 0..n), 0..30),
                prop::collection::vec(any::<usize>(), n),
                prop::collection::vec(any::<bool>(), n),
            )
        })
        .prop_map(move |(n, edges, kinds, cooperating)| build(n, &edges, &kinds, &cooperating, &pool))
}

proptest! {
    #[test]
    fn prop_order_independent(net in network(deterministic()), rounds in 1u64..8) {
        let store = AgentStore::from_states(net.states.clone());
        let mut forward = Simulation::with_agents(net.graph.clone(), store.clone(), PayoffMatrix::default(), 0).unwrap();
        let mut backward = Simulation::with_agents(Reversed(net.graph.clone()), store, PayoffMatrix::default(), 0).unwrap();

        for _ in 0..rounds {
            let a = forward.advance_round().unwrap();
            let b = backward.advance_round().unwrap();
            prop_assert_eq!(a, b);
        }
        prop_assert_eq!(forward.agents(), backward.agents());
    }

    #[test]
    fn prop_trigger_is_monotonic(net in network(StrategyKind::ALL.to_vec()), rounds in 1u64..12) {
        let mut sim = Simulation::with_agents(
            net.graph.clone(),
            AgentStore::from_states(net.states.clone()),
            PayoffMatrix::default(),
            7,
        ).unwrap();

        let mut latched = vec![false; net.states.len()];
        for _ in 0..rounds {
            sim.advance_round().unwrap();
            for (node, state) in sim.agents().iter() {
                if latched[node.index()] {
                    prop_assert!(state.triggered, "node {} lost its trigger", node);
                }
                latched[node.index()] = state.triggered;
            }
        }
    }

    #[test]
    fn prop_total_payoff_matches_edge_outcomes(net in network(StrategyKind::ALL.to_vec())) {
        let matrix = PayoffMatrix::default();
        let expected: f64 = net
            .graph
            .edge_indices()
            .filter_map(|e| net.graph.edge_endpoints(e))
            .map(|(u, v)| {
                let (a, b) = matrix.outcome(
                    net.states[u.index()].current_action,
                    net.states[v.index()].current_action,
                );
                a + b
            })
            .sum();

        let mut sim = Simulation::with_agents(
            net.graph.clone(),
            AgentStore::from_states(net.states.clone()),
            matrix,
            3,
        ).unwrap();
        let report = sim.advance_round().unwrap();

        prop_assert!((report.total_payoff - expected).abs() < 1e-9);
    }

    #[test]
    fn prop_actions_always_defined(net in network(StrategyKind::ALL.to_vec()), rounds in 1u64..6) {
        let n = net.states.len();
        let mut sim = Simulation::with_agents(
            net.graph,
            AgentStore::from_states(net.states),
            PayoffMatrix::default(),
            11,
        ).unwrap();
        let reports = sim.run(rounds).unwrap();
        for report in reports {
            prop_assert_eq!(report.cooperators + report.defectors, n);
        }
    }
}

#[test]
fn test_growing_graph_is_rejected() {
    let graph = UnGraph::<(), ()>::from_edges([(0u32, 1u32)]);
    let agents = AgentStore::from_states(vec![
        AgentState::new(StrategyKind::Pavlov, Action::Cooperate),
        AgentState::new(StrategyKind::Pavlov, Action::Cooperate),
    ]);
    let mut sim = Simulation::with_agents(Reversed(graph), agents, PayoffMatrix::default(), 0).unwrap();
    sim.advance_round().unwrap();

    struct Grown<'a>(&'a Reversed<UnGraph<(), ()>>);
    impl SocialGraph for Grown<'_> {
        fn node_count(&self) -> usize {
            3
        }
        fn nodes(&self) -> Vec<NodeId> {
            vec![NodeId(0), NodeId(1), NodeId(2)]
        }
        fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
            self.0.neighbors(node)
        }
    }

    let before = sim.agents().clone();
    let mut agents = before.clone();
    let mut rng = dilemma_core::SimRng::seeded(0);
    let err = dilemma_core::systems::advance_round(
        2,
        &Grown(sim.graph()),
        &mut agents,
        &PayoffMatrix::default(),
        &mut rng.0,
    )
    .unwrap_err();

    assert!(matches!(err, SimError::UnknownNode(NodeId(2))));
    assert_eq!(agents, before);
}
