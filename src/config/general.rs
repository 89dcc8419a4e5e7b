use super::traits::ConfigSection;
use crate::error::{EvolabError, Result};
use crate::types::Representation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub population_size: usize,
    pub epochs_no: usize,
    /// Decimal places the binary encoding must resolve
    pub precision: u32,
    pub representation: Representation,
    /// Fixed RNG seed; entropy when absent
    pub seed: Option<u64>,
}

impl GeneralConfig {
    pub fn new(population_size: usize, epochs_no: usize, precision: u32) -> Result<Self> {
        let config = Self {
            population_size,
            epochs_no,
            precision,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_representation(mut self, representation: Representation) -> Self {
        self.representation = representation;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            epochs_no: 10,
            precision: 6,
            representation: Representation::default(),
            seed: None,
        }
    }
}

impl ConfigSection for GeneralConfig {
    fn section_name() -> &'static str {
        "general"
    }

    fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(EvolabError::Configuration(
                "Population size must be greater than 0".to_string()
            ));
        }
        if self.epochs_no == 0 {
            return Err(EvolabError::Configuration(
                "Number of epochs must be greater than 0".to_string()
            ));
        }
        if self.precision == 0 {
            return Err(EvolabError::Configuration(
                "Precision must be greater than 0".to_string()
            ));
        }
        Ok(())
    }
}
