use super::traits::ConfigSection;
use crate::engines::generation::operators::EliteStrategy;
use crate::error::Result;
use crate::types::OptimizationDirection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EliteConfig {
    pub elite_count: usize,
}

impl EliteConfig {
    pub fn new(elite_count: usize) -> Self {
        Self { elite_count }
    }

    pub fn build_strategy(&self, direction: OptimizationDirection) -> EliteStrategy {
        EliteStrategy::new(self.elite_count, direction)
    }
}

impl Default for EliteConfig {
    fn default() -> Self {
        Self { elite_count: 1 }
    }
}

impl ConfigSection for EliteConfig {
    fn section_name() -> &'static str {
        "elite"
    }

    // Any count is valid on its own; the bound against the population and
    // mating pool is checked by SimulationConfig.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}
