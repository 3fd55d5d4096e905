//! Simulation Setup
//!
//! Agent initialization from an optional strategy distribution, and the
//! small-world network generator used by the runner.

pub mod agents;
pub mod network;

pub use agents::*;
pub use network::*;
