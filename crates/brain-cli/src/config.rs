//! Scenario configuration, loaded from YAML.

use std::path::Path;

use anyhow::{Context, Result};
use brain_core::BrainConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Number of ticks to simulate
    pub ticks: u64,

    /// Seed for per-agent RNG streams
    pub seed: u64,

    /// Scheduler settings for the agent
    pub brain: BrainConfig,

    /// When and where the hostile shows up
    pub hostile: HostileConfig,

    /// Ticks during which the agent is in deep water
    pub water: Option<TickRange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostileConfig {
    pub appears_at: u64,
    pub leaves_at: u64,
    /// Starting distance from the agent, in blocks
    pub distance: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRange {
    pub from: u64,
    pub until: u64,
}

impl TickRange {
    pub fn contains(&self, tick: u64) -> bool {
        (self.from..self.until).contains(&tick)
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            ticks: 40,
            seed: 7,
            brain: BrainConfig::default(),
            hostile: HostileConfig::default(),
            water: Some(TickRange { from: 1, until: 4 }),
        }
    }
}

impl Default for HostileConfig {
    fn default() -> Self {
        Self {
            appears_at: 8,
            leaves_at: 30,
            distance: 6,
        }
    }
}

impl ScenarioConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse scenario from {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = ScenarioConfig::parse(
            "ticks: 12\nbrain:\n  think_every_ticks: 2\nhostile:\n  distance: 3\n",
        )
        .unwrap();
        assert_eq!(config.ticks, 12);
        assert_eq!(config.brain.think_every_ticks, 2);
        assert!(config.brain.sweep_expired);
        assert_eq!(config.hostile.distance, 3);
        assert_eq!(config.hostile.appears_at, 8);
        assert_eq!(config.water, Some(TickRange { from: 1, until: 4 }));
    }

    #[test]
    fn default_config_roundtrips_through_yaml() {
        let yaml = ScenarioConfig::default().to_yaml().unwrap();
        let back = ScenarioConfig::parse(&yaml).unwrap();
        assert_eq!(back.ticks, 40);
        assert_eq!(back.brain, BrainConfig::default());
    }
}
