//! Agent Components
//!
//! Per-node mutable state and the dense store the engine owns.

use dilemma_events::Action;
use std::collections::HashMap;
use std::ops::Index;

use crate::components::network::NodeId;
use crate::systems::strategy::StrategyKind;

/// State of one agent. Created once at initialization, mutated in place
/// every round by the round engine.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentState {
    /// Fixed at creation
    pub strategy: StrategyKind,
    /// Action for the round about to be scored
    pub current_action: Action,
    /// Most recently observed action of each neighbor
    pub memory: HashMap<NodeId, Action>,
    /// Total from the most recent payoff pass
    pub payoff: f64,
    /// Payoff of the round before the current strategy evaluation
    pub prev_payoff: f64,
    /// Grim trigger latch. Only ever goes from false to true.
    pub triggered: bool,
}

impl AgentState {
    pub fn new(strategy: StrategyKind, current_action: Action) -> Self {
        Self {
            strategy,
            current_action,
            memory: HashMap::new(),
            payoff: 0.0,
            prev_payoff: 0.0,
            triggered: false,
        }
    }

    /// Remembered action of `neighbor`. No observation reads as cooperation.
    pub fn recall(&self, neighbor: NodeId) -> Action {
        self.memory.get(&neighbor).copied().unwrap_or(Action::Cooperate)
    }

    pub fn has_observed(&self, neighbor: NodeId) -> bool {
        self.memory.contains_key(&neighbor)
    }

    pub fn observe(&mut self, neighbor: NodeId, action: Action) {
        self.memory.insert(neighbor, action);
    }

    pub fn latch(&mut self) {
        self.triggered = true;
    }
}

/// Dense store of agent state indexed by [`NodeId`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentStore {
    agents: Vec<AgentState>,
}

impl AgentStore {
    /// Build a store where `states[i]` belongs to `NodeId(i)`
    pub fn from_states(states: Vec<AgentState>) -> Self {
        Self { agents: states }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.agents.len()
    }

    pub fn get(&self, node: NodeId) -> Option<&AgentState> {
        self.agents.get(node.index())
    }

    pub(crate) fn get_mut(&mut self, node: NodeId) -> Option<&mut AgentState> {
        self.agents.get_mut(node.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &AgentState)> {
        self.agents
            .iter()
            .enumerate()
            .map(|(i, state)| (NodeId(i), state))
    }
}

impl Index<NodeId> for AgentStore {
    type Output = AgentState;

    fn index(&self, node: NodeId) -> &AgentState {
        &self.agents[node.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_agent_is_zeroed() {
        let agent = AgentState::new(StrategyKind::Pavlov, Action::Defect);
        assert_eq!(agent.current_action, Action::Defect);
        assert!(agent.memory.is_empty());
        assert_eq!(agent.payoff, 0.0);
        assert_eq!(agent.prev_payoff, 0.0);
        assert!(!agent.triggered);
    }

    #[test]
    fn test_recall_defaults_to_cooperate() {
        let mut agent = AgentState::new(StrategyKind::TitForTat, Action::Cooperate);
        assert_eq!(agent.recall(NodeId(4)), Action::Cooperate);
        assert!(!agent.has_observed(NodeId(4)));

        agent.observe(NodeId(4), Action::Defect);
        assert_eq!(agent.recall(NodeId(4)), Action::Defect);

        agent.observe(NodeId(4), Action::Cooperate);
        assert_eq!(agent.recall(NodeId(4)), Action::Cooperate);
        assert_eq!(agent.memory.len(), 1);
    }

    #[test]
    fn test_store_lookup() {
        let store = AgentStore::from_states(vec![
            AgentState::new(StrategyKind::AlwaysCooperate, Action::Cooperate),
            AgentState::new(StrategyKind::AlwaysDefect, Action::Defect),
        ]);

        assert_eq!(store.len(), 2);
        assert!(store.contains(NodeId(1)));
        assert!(!store.contains(NodeId(2)));
        assert!(store.get(NodeId(2)).is_none());
        assert_eq!(store[NodeId(1)].strategy, StrategyKind::AlwaysDefect);

        let ids: Vec<NodeId> = store.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![NodeId(0), NodeId(1)]);
    }
}
