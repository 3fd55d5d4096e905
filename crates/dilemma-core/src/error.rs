//! Error types for configuration and round execution.

use crate::components::network::NodeId;

/// Problems detected before any round runs
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown strategy tag: {0}")]
    UnknownStrategy(String),

    #[error("strategy {strategy} is listed more than once in the distribution")]
    DuplicateStrategy { strategy: String },

    #[error("proportion for {strategy} must be within [0, 1], got {proportion}")]
    InvalidProportion { strategy: String, proportion: f64 },

    #[error("strategy proportions sum to {total}, which exceeds 1")]
    DistributionOverflow { total: f64 },

    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Fatal simulation errors. There is no partial recovery: a round either
/// commits completely or not at all.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("node {0} has no agent state; the graph changed after initialization")]
    UnknownNode(NodeId),

    #[error("graph has {graph} nodes but {agents} agent states were supplied")]
    NodeCountMismatch { graph: usize, agents: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
