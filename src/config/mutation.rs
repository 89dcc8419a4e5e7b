use super::traits::{check_probability, ConfigSection};
use crate::engines::generation::operators::{
    BoundaryMutation, GaussianMutation, MutationOperator, SinglePointMutation, TwoPointMutation,
    UniformMutation,
};
use crate::engines::generation::unit::UnitFactory;
use crate::error::{EvolabError, Result};
use crate::types::Representation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationType {
    Boundary,
    SinglePoint,
    TwoPoint,
    Uniform,
    Gaussian,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    pub mutation_type: MutationType,
    pub probability: u32,
    /// Standard deviation of the Gaussian noise
    pub sigma: Option<f64>,
}

impl MutationConfig {
    pub fn new(mutation_type: MutationType, probability: u32) -> Result<Self> {
        let config = Self {
            mutation_type,
            probability,
            sigma: None,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn gaussian(probability: u32, sigma: f64) -> Result<Self> {
        let config = Self {
            mutation_type: MutationType::Gaussian,
            probability,
            sigma: Some(sigma),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn build_operator(
        &self,
        factory: UnitFactory,
        representation: Representation,
    ) -> Result<Box<dyn MutationOperator>> {
        self.validate()?;
        let p = self.probability;
        let operator: Box<dyn MutationOperator> = match self.mutation_type {
            MutationType::Boundary => Box::new(BoundaryMutation::new(p, factory)),
            MutationType::SinglePoint => Box::new(SinglePointMutation::new(p, factory, representation)),
            MutationType::TwoPoint => Box::new(TwoPointMutation::new(p, factory, representation)),
            MutationType::Uniform => Box::new(UniformMutation::new(p, factory)),
            MutationType::Gaussian => Box::new(GaussianMutation::new(
                p,
                factory,
                self.sigma.unwrap_or_default(),
            )?),
        };
        Ok(operator)
    }
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            mutation_type: MutationType::SinglePoint,
            probability: 30,
            sigma: None,
        }
    }
}

impl ConfigSection for MutationConfig {
    fn section_name() -> &'static str {
        "mutation"
    }

    fn validate(&self) -> Result<()> {
        check_probability(Self::section_name(), "probability", self.probability)?;

        if self.mutation_type == MutationType::Gaussian {
            match self.sigma {
                Some(sigma) if sigma.is_finite() && sigma > 0.0 => {}
                Some(sigma) => {
                    return Err(EvolabError::Configuration(format!(
                        "Gaussian sigma must be positive, got {}",
                        sigma
                    )))
                }
                None => {
                    return Err(EvolabError::Configuration(
                        "Gaussian mutation requires sigma".to_string()
                    ))
                }
            }
        }
        Ok(())
    }
}
