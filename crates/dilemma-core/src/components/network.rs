//! Network Components
//!
//! The graph-provider boundary. The engine only needs to enumerate nodes and
//! their neighbors; topology construction lives in `setup::network`.

use petgraph::graph::{Graph, IndexType, NodeIndex};
use petgraph::Undirected;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, dense identifier of an agent's node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only view of an undirected social network.
///
/// `nodes()` must return the same order for the duration of one round, and
/// node identifiers must be dense (`0..node_count()`).
pub trait SocialGraph {
    fn node_count(&self) -> usize;

    fn nodes(&self) -> Vec<NodeId>;

    /// Neighbors of `node` in a stable order. The first entry is the
    /// "designated" neighbor for mirroring strategies.
    fn neighbors(&self, node: NodeId) -> Vec<NodeId>;
}

impl<G: SocialGraph + ?Sized> SocialGraph for &G {
    fn node_count(&self) -> usize {
        (**self).node_count()
    }

    fn nodes(&self) -> Vec<NodeId> {
        (**self).nodes()
    }

    fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        (**self).neighbors(node)
    }
}

/// Petgraph undirected graphs. Neighbors are reported in ascending node
/// order with parallel edges collapsed and self loops ignored.
impl<N, E, Ix: IndexType> SocialGraph for Graph<N, E, Undirected, Ix> {
    fn node_count(&self) -> usize {
        Graph::node_count(self)
    }

    fn nodes(&self) -> Vec<NodeId> {
        self.node_indices().map(|idx| NodeId(idx.index())).collect()
    }

    fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        if node.index() >= Graph::node_count(self) {
            return Vec::new();
        }
        let mut neighbors: Vec<NodeId> = Graph::neighbors(self, NodeIndex::new(node.index()))
            .map(|idx| NodeId(idx.index()))
            .filter(|&other| other != node)
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }
}
