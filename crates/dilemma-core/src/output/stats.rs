//! Statistics Output
//!
//! Groups agents by strategy and aggregates their payoffs.

use dilemma_events::StrategySummary;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Write;

use crate::components::agent::AgentStore;
use crate::components::network::SocialGraph;
use crate::systems::strategy::StrategyKind;

/// Per-strategy payoff statistics from the most recent payoff pass.
///
/// Groups appear in descending order of average payoff; equal averages keep
/// the order in which their strategy was first encountered.
pub fn summarize<G: SocialGraph + ?Sized>(graph: &G, agents: &AgentStore) -> Vec<StrategySummary> {
    let mut groups: Vec<StrategySummary> = Vec::new();
    let mut positions: HashMap<StrategyKind, usize> = HashMap::new();

    for node in graph.nodes() {
        let Some(state) = agents.get(node) else {
            continue;
        };
        match positions.get(&state.strategy) {
            Some(&pos) => groups[pos].record(state.payoff),
            None => {
                positions.insert(state.strategy, groups.len());
                groups.push(StrategySummary::new(state.strategy.tag(), state.payoff));
            }
        }
    }

    // Stable sort keeps encounter order for ties
    groups.sort_by(|a, b| {
        b.average_payoff
            .partial_cmp(&a.average_payoff)
            .unwrap_or(Ordering::Equal)
    });
    groups
}

/// How many agents currently hold each action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActionCounts {
    pub cooperate: usize,
    pub defect: usize,
}

pub fn action_counts(agents: &AgentStore) -> ActionCounts {
    agents
        .iter()
        .fold(ActionCounts::default(), |mut counts, (_, state)| {
            if state.current_action.is_cooperate() {
                counts.cooperate += 1;
            } else {
                counts.defect += 1;
            }
            counts
        })
}

/// Population of every registered strategy, in registry order (zeros included)
pub fn strategy_counts(agents: &AgentStore) -> Vec<(StrategyKind, usize)> {
    StrategyKind::ALL
        .into_iter()
        .map(|kind| (kind, agents.iter().filter(|(_, s)| s.strategy == kind).count()))
        .collect()
}

/// Render summaries as a fixed-width text table
pub fn format_summary_table(summaries: &[StrategySummary]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<18}{:<12}{:<12}{:<12}{:<15}{:<10}",
        "Strategy", "Avg Payoff", "Min Payoff", "Max Payoff", "Total Payoff", "Node Count"
    );
    for entry in summaries {
        let _ = writeln!(
            out,
            "{:<18}{:<12.2}{:<12.2}{:<12.2}{:<15.2}{:<10}",
            entry.strategy,
            entry.average_payoff,
            entry.min_payoff,
            entry.max_payoff,
            entry.total_payoff,
            entry.total_nodes
        );
    }
    out
}
