//! Output Systems
//!
//! Read-only views of simulation state: per-strategy statistics and
//! serializable snapshots for analysis and plotting.

pub mod snapshot;
pub mod stats;

pub use snapshot::capture_snapshot;
pub use stats::{action_counts, format_summary_table, strategy_counts, summarize, ActionCounts};
