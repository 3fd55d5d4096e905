//! Shared data types for the network dilemma simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! Analysis and plotting callers depend on it to read simulation output
//! without pulling in the engine.

pub mod action;
pub mod snapshot;
pub mod summary;

pub use action::Action;

pub use snapshot::{NodeSnapshot, RoundSnapshot};

pub use summary::StrategySummary;
