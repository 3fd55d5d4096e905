//! Configuration System
//!
//! Loads run parameters from a TOML file so a run can be adjusted without
//! recompiling. Every section is optional and falls back to its defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::components::payoff::PayoffMatrix;
use crate::error::ConfigError;
use crate::setup::agents::StrategyDistribution;
use crate::setup::network::{DEFAULT_NEAREST_NEIGHBORS, DEFAULT_NODES, DEFAULT_REWIRE_PROBABILITY};
use crate::simulation::SimOptions;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "dilemma.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub payoff: PayoffMatrix,
    /// Strategy tag -> target fraction of the population
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub strategy_distribution: BTreeMap<String, f64>,
}

/// Run parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: u64,
    pub rounds: u64,
    pub random_start: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            rounds: 50,
            random_start: true,
        }
    }
}

/// Small-world network shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub nodes: usize,
    /// Each node starts linked to its k nearest ring neighbors
    pub k: usize,
    pub rewire_probability: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            nodes: DEFAULT_NODES,
            k: DEFAULT_NEAREST_NEIGHBORS,
            rewire_probability: DEFAULT_REWIRE_PROBABILITY,
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load `path` if it exists, otherwise use defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!("Config file {} not found. Using defaults.", path.display());
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validated distribution, or `None` when the table is empty
    pub fn distribution(&self) -> Result<Option<StrategyDistribution>, ConfigError> {
        if self.strategy_distribution.is_empty() {
            return Ok(None);
        }
        let entries = self
            .strategy_distribution
            .iter()
            .map(|(tag, proportion)| (tag.as_str(), *proportion));
        StrategyDistribution::from_tags(entries).map(Some)
    }

    pub fn options(&self) -> Result<SimOptions, ConfigError> {
        Ok(SimOptions {
            seed: self.simulation.seed,
            random_start: self.simulation.random_start,
            distribution: self.distribution()?,
        })
    }
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Network dilemma run configuration

[simulation]
seed = 42
rounds = 50
random_start = true

[network]
nodes = 20
k = 4
rewire_probability = 0.3

# (self, other) payoffs; cd = self cooperates, other defects
[payoff]
cc = [3.0, 3.0]
cd = [0.0, 2.0]
dc = [2.0, 0.0]
dd = [0.0, 0.0]

# Optional target shares; the remainder is drawn uniformly from all strategies
[strategy_distribution]
"Tit-for-Tat" = 0.2
"Always-Defect" = 0.1
"#
    .to_string()
}
