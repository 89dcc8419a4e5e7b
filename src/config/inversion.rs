use super::traits::{check_probability, ConfigSection};
use crate::engines::generation::operators::StandardInversion;
use crate::engines::generation::unit::UnitFactory;
use crate::error::Result;
use crate::types::Representation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InversionConfig {
    pub probability: u32,
}

impl InversionConfig {
    pub fn new(probability: u32) -> Result<Self> {
        let config = Self { probability };
        config.validate()?;
        Ok(config)
    }

    pub fn build_operator(&self, factory: UnitFactory, representation: Representation) -> Result<StandardInversion> {
        self.validate()?;
        Ok(StandardInversion::new(self.probability, factory, representation))
    }
}

impl Default for InversionConfig {
    fn default() -> Self {
        Self { probability: 30 }
    }
}

impl ConfigSection for InversionConfig {
    fn section_name() -> &'static str {
        "inversion"
    }

    fn validate(&self) -> Result<()> {
        check_probability(Self::section_name(), "probability", self.probability)
    }
}
