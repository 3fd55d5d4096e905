//! Network Setup
//!
//! Small-world topology for the runner: a ring lattice where each node is
//! joined to its `k / 2` nearest neighbors on each side, with every lattice
//! edge rewired to a random endpoint with probability `p`.

use petgraph::graph::{NodeIndex, UnGraph};
use rand::Rng;

use crate::error::ConfigError;

/// Default network shape
pub const DEFAULT_NODES: usize = 20;
pub const DEFAULT_NEAREST_NEIGHBORS: usize = 4;
pub const DEFAULT_REWIRE_PROBABILITY: f64 = 0.3;

/// Watts–Strogatz small-world graph.
///
/// `k == nodes` produces a complete graph. An odd `k` behaves like `k - 1`.
pub fn watts_strogatz<R: Rng + ?Sized>(
    nodes: usize,
    k: usize,
    rewire_probability: f64,
    rng: &mut R,
) -> Result<UnGraph<(), ()>, ConfigError> {
    if k > nodes {
        return Err(ConfigError::InvalidTopology(format!(
            "k = {k} exceeds the number of nodes ({nodes})"
        )));
    }
    if !(0.0..=1.0).contains(&rewire_probability) {
        return Err(ConfigError::InvalidTopology(format!(
            "rewire probability must be within [0, 1], got {rewire_probability}"
        )));
    }

    let mut graph = UnGraph::with_capacity(nodes, nodes * k / 2);
    let indices: Vec<NodeIndex> = (0..nodes).map(|_| graph.add_node(())).collect();

    if k == nodes {
        for (i, &a) in indices.iter().enumerate() {
            for &b in &indices[i + 1..] {
                graph.add_edge(a, b, ());
            }
        }
        return Ok(graph);
    }

    let half = k / 2;
    for offset in 1..=half {
        for u in 0..nodes {
            graph.add_edge(indices[u], indices[(u + offset) % nodes], ());
        }
    }

    for offset in 1..=half {
        for u in 0..nodes {
            if !rng.gen_bool(rewire_probability) {
                continue;
            }
            // Already linked to everyone else
            if graph.neighbors(indices[u]).count() >= nodes - 1 {
                continue;
            }
            let mut w = rng.gen_range(0..nodes);
            while w == u || graph.find_edge(indices[u], indices[w]).is_some() {
                w = rng.gen_range(0..nodes);
            }
            let v = (u + offset) % nodes;
            if let Some(edge) = graph.find_edge(indices[u], indices[v]) {
                graph.remove_edge(edge);
                graph.add_edge(indices[u], indices[w], ());
            }
        }
    }

    tracing::debug!(
        nodes,
        edges = graph.edge_count(),
        k,
        rewire_probability,
        "generated small-world network"
    );

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_lattice_without_rewiring() {
        let mut rng = SmallRng::seed_from_u64(1);
        let graph = watts_strogatz(10, 4, 0.0, &mut rng).unwrap();

        assert_eq!(graph.node_count(), 10);
        assert_eq!(graph.edge_count(), 20);
        for idx in graph.node_indices() {
            assert_eq!(graph.neighbors(idx).count(), 4);
        }
        assert!(graph.find_edge(NodeIndex::new(0), NodeIndex::new(9)).is_some());
        assert!(graph.find_edge(NodeIndex::new(0), NodeIndex::new(8)).is_some());
        assert!(graph.find_edge(NodeIndex::new(0), NodeIndex::new(5)).is_none());
    }

    #[test]
    fn test_rewiring_preserves_edge_count() {
        let mut rng = SmallRng::seed_from_u64(7);
        let graph = watts_strogatz(50, 6, 0.5, &mut rng).unwrap();

        assert_eq!(graph.edge_count(), 150);
        for edge in graph.edge_indices() {
            let (a, b) = graph.edge_endpoints(edge).unwrap();
            assert_ne!(a, b, "rewiring must not create self loops");
        }
    }

    #[test]
    fn test_same_seed_same_graph() {
        let edges = |seed| {
            let mut rng = SmallRng::seed_from_u64(seed);
            let graph = watts_strogatz(30, 4, 0.3, &mut rng).unwrap();
            let mut pairs: Vec<(usize, usize)> = graph
                .edge_indices()
                .filter_map(|e| graph.edge_endpoints(e))
                .map(|(a, b)| (a.index().min(b.index()), a.index().max(b.index())))
                .collect();
            pairs.sort_unstable();
            pairs
        };
        assert_eq!(edges(11), edges(11));
    }

    #[test]
    fn test_complete_graph() {
        let mut rng = SmallRng::seed_from_u64(1);
        let graph = watts_strogatz(5, 5, 0.3, &mut rng).unwrap();
        assert_eq!(graph.edge_count(), 10);
    }

    #[test]
    fn test_invalid_parameters() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(matches!(
            watts_strogatz(4, 6, 0.1, &mut rng),
            Err(ConfigError::InvalidTopology(_))
        ));
        assert!(matches!(
            watts_strogatz(10, 4, 1.5, &mut rng),
            Err(ConfigError::InvalidTopology(_))
        ));
    }
}
