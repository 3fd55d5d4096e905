//! Simulation Systems
//!
//! The strategy registry and the two passes of a round: payoff scoring,
//! then staged strategy evaluation with a single commit.

pub mod strategy;
pub mod payoff;
pub mod round;

pub use strategy::{Decision, DecisionContext, StrategyKind};
pub use payoff::{collect_adjacency, compute_payoffs, Adjacency};
pub use round::{advance_round, evaluate_strategies, commit_updates, RoundReport, StagedUpdate};
