//! Strategy Registry
//!
//! Closed set of decision rules. Each variant reads a frozen view of the
//! network and returns the next action; the round engine applies the result.

use dilemma_events::Action;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

use crate::components::agent::{AgentState, AgentStore};
use crate::components::network::NodeId;
use crate::error::ConfigError;

/// Probability/threshold constants for the strategy rules
pub mod strategy_constants {
    /// Payoff at or above which Pavlov stays and ZD-Extortion may cooperate
    pub const SATISFACTION_THRESHOLD: f64 = 3.0;
    /// Chance a Prober defects regardless of memory
    pub const PROBER_DEFECT_PROBABILITY: f64 = 0.1;
    /// Chance Generous-TFT mirrors instead of forgiving
    pub const GENEROUS_MIRROR_PROBABILITY: f64 = 0.7;
    /// Defections needed before Tit-for-Two-Tats retaliates
    pub const TWO_TATS_DEFECTIONS: usize = 2;
}

use strategy_constants::*;

/// Every strategy an agent can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StrategyKind {
    AlwaysCooperate,
    AlwaysDefect,
    TitForTat,
    TitForTwoTats,
    GrimTrigger,
    Pavlov,
    Prober,
    GenerousTitForTat,
    Random,
    ZdExtortion,
    Imitator,
}

impl StrategyKind {
    /// The full registry in canonical order
    pub const ALL: [StrategyKind; 11] = [
        StrategyKind::AlwaysCooperate,
        StrategyKind::AlwaysDefect,
        StrategyKind::TitForTat,
        StrategyKind::TitForTwoTats,
        StrategyKind::GrimTrigger,
        StrategyKind::Pavlov,
        StrategyKind::Prober,
        StrategyKind::GenerousTitForTat,
        StrategyKind::Random,
        StrategyKind::ZdExtortion,
        StrategyKind::Imitator,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            StrategyKind::AlwaysCooperate => "Always-Cooperate",
            StrategyKind::AlwaysDefect => "Always-Defect",
            StrategyKind::TitForTat => "Tit-for-Tat",
            StrategyKind::TitForTwoTats => "Tit-for-Two-Tats",
            StrategyKind::GrimTrigger => "Grim-Trigger",
            StrategyKind::Pavlov => "Pavlov",
            StrategyKind::Prober => "Prober",
            StrategyKind::GenerousTitForTat => "Generous-TFT",
            StrategyKind::Random => "Random",
            StrategyKind::ZdExtortion => "ZD-Extortion",
            StrategyKind::Imitator => "Imitator",
        }
    }

    /// Short name used by older configuration files
    pub fn alias(self) -> &'static str {
        match self {
            StrategyKind::AlwaysCooperate => "Always_C",
            StrategyKind::AlwaysDefect => "Always_D",
            StrategyKind::TitForTat => "TFT",
            StrategyKind::TitForTwoTats => "TFTT",
            StrategyKind::GrimTrigger => "Grim",
            StrategyKind::Pavlov => "Pavlov",
            StrategyKind::Prober => "Prober",
            StrategyKind::GenerousTitForTat => "GTFT",
            StrategyKind::Random => "Random",
            StrategyKind::ZdExtortion => "ZD_Extortion",
            StrategyKind::Imitator => "Imitator",
        }
    }

    /// Whether the rule draws from the random source
    pub fn is_randomized(self) -> bool {
        matches!(
            self,
            StrategyKind::Prober | StrategyKind::GenerousTitForTat | StrategyKind::Random
        )
    }

    /// Uniform draw from the full registry
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Decide the next action for `ctx.node`.
    ///
    /// Randomized strategies consume `rng`; the rest never touch it.
    pub fn decide<R: Rng + ?Sized>(self, ctx: &DecisionContext<'_>, rng: &mut R) -> Decision {
        let me = ctx.me;
        match self {
            StrategyKind::AlwaysCooperate => Decision::play(Action::Cooperate),
            StrategyKind::AlwaysDefect => Decision::play(Action::Defect),
            StrategyKind::TitForTat => Decision::play(ctx.mirror_first()),
            StrategyKind::TitForTwoTats => {
                if ctx.remembered_defections() >= TWO_TATS_DEFECTIONS {
                    Decision::play(Action::Defect)
                } else {
                    Decision::play(Action::Cooperate)
                }
            }
            StrategyKind::GrimTrigger => {
                if me.triggered {
                    Decision::play(Action::Defect)
                } else if ctx.remembered_defections() > 0 {
                    Decision::latch()
                } else {
                    Decision::play(Action::Cooperate)
                }
            }
            StrategyKind::Pavlov => {
                if me.prev_payoff >= SATISFACTION_THRESHOLD {
                    Decision::play(me.current_action)
                } else {
                    Decision::play(me.current_action.flip())
                }
            }
            StrategyKind::Prober => {
                if rng.gen_bool(PROBER_DEFECT_PROBABILITY) {
                    Decision::play(Action::Defect)
                } else {
                    Decision::play(ctx.mirror_first())
                }
            }
            StrategyKind::GenerousTitForTat => {
                if ctx.neighbors.is_empty() {
                    Decision::play(Action::Cooperate)
                } else if rng.gen_bool(GENEROUS_MIRROR_PROBABILITY) {
                    Decision::play(ctx.mirror_first())
                } else {
                    Decision::play(Action::Cooperate)
                }
            }
            StrategyKind::Random => {
                if rng.gen_bool(0.5) {
                    Decision::play(Action::Cooperate)
                } else {
                    Decision::play(Action::Defect)
                }
            }
            StrategyKind::ZdExtortion => {
                if ctx.neighbors.is_empty() {
                    return Decision::play(Action::Cooperate);
                }
                if ctx.mirror_first().is_cooperate() && me.prev_payoff >= SATISFACTION_THRESHOLD {
                    Decision::play(Action::Cooperate)
                } else {
                    Decision::play(Action::Defect)
                }
            }
            StrategyKind::Imitator => {
                let action = ctx
                    .best_neighbor()
                    .map_or(me.current_action, |best| best.current_action);
                Decision::play(action)
            }
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == s || kind.alias() == s)
            .ok_or_else(|| ConfigError::UnknownStrategy(s.to_string()))
    }
}

/// Outcome of a strategy evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    /// Set the node's trigger latch when committing
    pub trigger: bool,
}

impl Decision {
    pub fn play(action: Action) -> Self {
        Self {
            action,
            trigger: false,
        }
    }

    /// Defect and latch the trigger
    pub fn latch() -> Self {
        Self {
            action: Action::Defect,
            trigger: true,
        }
    }
}

/// Frozen start-of-round view handed to a strategy
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub node: NodeId,
    pub me: &'a AgentState,
    pub neighbors: &'a [NodeId],
    pub agents: &'a AgentStore,
}

impl<'a> DecisionContext<'a> {
    /// Returns `None` if `node` has no state in `agents`.
    pub fn new(node: NodeId, neighbors: &'a [NodeId], agents: &'a AgentStore) -> Option<Self> {
        let me = agents.get(node)?;
        Some(Self {
            node,
            me,
            neighbors,
            agents,
        })
    }

    /// Remembered action of the first neighbor, cooperation if none
    pub fn mirror_first(&self) -> Action {
        self.neighbors
            .first()
            .map_or(Action::Cooperate, |&first| self.me.recall(first))
    }

    /// Neighbors whose remembered action is a defection
    pub fn remembered_defections(&self) -> usize {
        self.neighbors
            .iter()
            .filter(|&&n| self.me.recall(n).is_defect())
            .count()
    }

    /// Neighbor with the highest previous payoff; the first maximum wins
    pub fn best_neighbor(&self) -> Option<&'a AgentState> {
        let mut best: Option<&'a AgentState> = None;
        for state in self.neighbors.iter().filter_map(|&n| self.agents.get(n)) {
            match best {
                Some(current) if state.prev_payoff <= current.prev_payoff => {}
                _ => best = Some(state),
            }
        }
        best
    }
}
