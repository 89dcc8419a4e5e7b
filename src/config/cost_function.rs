use super::traits::ConfigSection;
use crate::error::{EvolabError, Result};
use crate::functions::CostFunction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostFunctionConfig {
    pub function: CostFunction,
    pub dimensions: usize,
}

impl CostFunctionConfig {
    pub fn new(function: CostFunction, dimensions: usize) -> Result<Self> {
        let config = Self {
            function,
            dimensions,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for CostFunctionConfig {
    fn default() -> Self {
        Self {
            function: CostFunction::Rastrigin,
            dimensions: 2,
        }
    }
}

impl ConfigSection for CostFunctionConfig {
    fn section_name() -> &'static str {
        "cost_function"
    }

    fn validate(&self) -> Result<()> {
        if self.dimensions == 0 {
            return Err(EvolabError::Configuration(
                "Dimensions must be greater than 0".to_string()
            ));
        }
        if self.dimensions < self.function.min_dimensions() {
            return Err(EvolabError::Configuration(format!(
                "{} needs at least {} dimensions, got {}",
                self.function,
                self.function.min_dimensions(),
                self.dimensions
            )));
        }
        Ok(())
    }
}
