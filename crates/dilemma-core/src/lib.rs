//! Core simulation logic: iterated Prisoner's Dilemma on a social network.
//!
//! Every node of an undirected graph is an agent with a fixed strategy. Each
//! round scores all pairwise games with neighbors, then moves every agent to
//! the action its strategy picks from the state frozen at the start of the
//! round.

use rand::rngs::SmallRng;

pub mod components;
pub mod config;
pub mod error;
pub mod output;
pub mod setup;
pub mod simulation;
pub mod systems;

pub use components::*;
pub use config::SimConfig;
pub use error::{ConfigError, SimError};
pub use setup::{initialize, plan_assignment, watts_strogatz, StrategyDistribution};
pub use simulation::{SimOptions, Simulation};
pub use systems::{Decision, DecisionContext, RoundReport, StrategyKind};

pub use dilemma_events::{Action, NodeSnapshot, RoundSnapshot, StrategySummary};

/// Seeded random number generator owned by a single simulation run
#[derive(Debug)]
pub struct SimRng(pub SmallRng);
