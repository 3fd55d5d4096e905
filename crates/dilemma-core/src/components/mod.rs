//! Simulation Components
//!
//! Node identity, the graph-provider boundary, per-agent state, and the payoff matrix.

pub mod agent;
pub mod network;
pub mod payoff;

pub use agent::*;
pub use network::*;
pub use payoff::*;
