//! Agent Initialization
//!
//! Assigns a strategy and starting action to every node exactly once.

use dilemma_events::Action;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::agent::{AgentState, AgentStore};
use crate::components::network::SocialGraph;
use crate::error::ConfigError;
use crate::systems::strategy::StrategyKind;

/// Slack allowed when checking that proportions sum to at most 1
const PROPORTION_TOLERANCE: f64 = 1e-9;

/// Target share of the population per strategy.
///
/// Proportions need not sum to 1; the shortfall is filled uniformly at random
/// from the full registry.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyDistribution {
    entries: Vec<(StrategyKind, f64)>,
}

impl StrategyDistribution {
    pub fn new(entries: impl IntoIterator<Item = (StrategyKind, f64)>) -> Result<Self, ConfigError> {
        let mut validated: Vec<(StrategyKind, f64)> = Vec::new();
        for (kind, proportion) in entries {
            if !(0.0..=1.0).contains(&proportion) {
                return Err(ConfigError::InvalidProportion {
                    strategy: kind.tag().to_string(),
                    proportion,
                });
            }
            if validated.iter().any(|(k, _)| *k == kind) {
                return Err(ConfigError::DuplicateStrategy {
                    strategy: kind.tag().to_string(),
                });
            }
            validated.push((kind, proportion));
        }

        let distribution = Self { entries: validated };
        let total = distribution.total();
        if total > 1.0 + PROPORTION_TOLERANCE {
            return Err(ConfigError::DistributionOverflow { total });
        }
        Ok(distribution)
    }

    /// Parse tags (canonical or alias) and validate
    pub fn from_tags<S: AsRef<str>>(entries: impl IntoIterator<Item = (S, f64)>) -> Result<Self, ConfigError> {
        let parsed = entries
            .into_iter()
            .map(|(tag, p)| tag.as_ref().parse::<StrategyKind>().map(|kind| (kind, p)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(parsed)
    }

    pub fn entries(&self) -> &[(StrategyKind, f64)] {
        &self.entries
    }

    /// Sum of the listed proportions
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, p)| p).sum()
    }
}

/// Strategy list for `total` nodes before shuffling: `floor(p * total)` of
/// each listed strategy in listing order, then uniform draws for the rest.
pub fn plan_assignment<R: Rng + ?Sized>(
    distribution: &StrategyDistribution,
    total: usize,
    rng: &mut R,
) -> Vec<StrategyKind> {
    let mut plan = Vec::with_capacity(total);
    for &(kind, proportion) in distribution.entries() {
        let count = (proportion * total as f64).floor() as usize;
        plan.extend(std::iter::repeat(kind).take(count));
    }
    plan.truncate(total);

    let remaining = total - plan.len();
    plan.extend((0..remaining).map(|_| StrategyKind::random(rng)));
    plan
}

fn starting_action<R: Rng + ?Sized>(random_start: bool, rng: &mut R) -> Action {
    if random_start && rng.gen_bool(0.5) {
        Action::Defect
    } else {
        Action::Cooperate
    }
}

/// Create the state for every node of `graph`.
///
/// With a distribution the planned strategies are shuffled once across the
/// whole population before being bound to nodes; without one each node draws
/// its strategy independently.
pub fn initialize<G, R>(
    graph: &G,
    distribution: Option<&StrategyDistribution>,
    random_start: bool,
    rng: &mut R,
) -> Result<AgentStore, ConfigError>
where
    G: SocialGraph + ?Sized,
    R: Rng + ?Sized,
{
    let nodes = graph.nodes();
    let total = graph.node_count();
    if nodes.len() != total {
        return Err(ConfigError::InvalidGraph(format!(
            "graph reports {} nodes but enumerates {}",
            total,
            nodes.len()
        )));
    }

    let assignment = match distribution {
        Some(distribution) => {
            let mut plan = plan_assignment(distribution, total, rng);
            plan.shuffle(rng);
            plan
        }
        None => (0..total).map(|_| StrategyKind::random(rng)).collect(),
    };

    let mut slots: Vec<Option<AgentState>> = (0..total).map(|_| None).collect();
    for (node, strategy) in nodes.into_iter().zip(assignment) {
        let action = starting_action(random_start, rng);
        let slot = slots
            .get_mut(node.index())
            .ok_or_else(|| ConfigError::InvalidGraph(format!("node {node} is outside 0..{total}")))?;
        if slot.is_some() {
            return Err(ConfigError::InvalidGraph(format!("node {node} enumerated twice")));
        }
        *slot = Some(AgentState::new(strategy, action));
    }

    let states = slots
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| ConfigError::InvalidGraph("node identifiers are not dense".to_string()))?;

    tracing::info!(
        agents = states.len(),
        distribution = distribution.is_some(),
        random_start,
        "initialized agents"
    );

    Ok(AgentStore::from_states(states))
}
