use super::traits::{check_probability, ConfigSection};
use crate::engines::generation::operators::{
    AlphaBetaBlendCrossing, AlphaBlendCrossing, ArithmeticCrossing, Crossing, GrainCrossing,
    LinearCrossing, MeanCrossing, Recombination, SinglePointCrossing, TwoPointCrossing,
    UniformCrossing,
};
use crate::engines::generation::unit::UnitFactory;
use crate::error::{EvolabError, Result};
use crate::types::Representation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossingType {
    SinglePoint,
    TwoPoint,
    Uniform,
    Grain,
    Arithmetic,
    Linear,
    AlphaBlend,
    AlphaBetaBlend,
    Mean,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossingConfig {
    pub crossing_type: CrossingType,
    /// Percent chance that a parent pair is recombined at all
    pub probability: u32,
    pub grain_size: Option<usize>,
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
}

impl CrossingConfig {
    pub fn new(crossing_type: CrossingType, probability: u32) -> Result<Self> {
        let config = Self {
            crossing_type,
            probability,
            grain_size: None,
            alpha: None,
            beta: None,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn grain(probability: u32, grain_size: usize) -> Result<Self> {
        let config = Self {
            grain_size: Some(grain_size),
            ..Self::unchecked(CrossingType::Grain, probability)
        };
        config.validate()?;
        Ok(config)
    }

    pub fn blend(crossing_type: CrossingType, probability: u32, alpha: f64, beta: Option<f64>) -> Result<Self> {
        let config = Self {
            alpha: Some(alpha),
            beta,
            ..Self::unchecked(crossing_type, probability)
        };
        config.validate()?;
        Ok(config)
    }

    fn unchecked(crossing_type: CrossingType, probability: u32) -> Self {
        Self {
            crossing_type,
            probability,
            grain_size: None,
            alpha: None,
            beta: None,
        }
    }

    /// Resolve the configured variant behind its probability gate
    pub fn build_operator(&self, factory: UnitFactory, representation: Representation) -> Result<Crossing> {
        self.validate()?;
        let alpha = self.alpha.unwrap_or_default();
        let method: Box<dyn Recombination> = match self.crossing_type {
            CrossingType::SinglePoint => Box::new(SinglePointCrossing::new(factory, representation)),
            CrossingType::TwoPoint => Box::new(TwoPointCrossing::new(factory, representation)),
            CrossingType::Uniform => Box::new(UniformCrossing::new(factory, representation)),
            CrossingType::Grain => Box::new(GrainCrossing::new(
                factory,
                representation,
                self.grain_size.unwrap_or(1),
            )),
            CrossingType::Arithmetic => Box::new(ArithmeticCrossing::new(factory, alpha)),
            CrossingType::Linear => Box::new(LinearCrossing::new(factory)),
            CrossingType::AlphaBlend => Box::new(AlphaBlendCrossing::new(factory, alpha)),
            CrossingType::AlphaBetaBlend => Box::new(AlphaBetaBlendCrossing::new(
                factory,
                alpha,
                self.beta.unwrap_or_default(),
            )),
            CrossingType::Mean => Box::new(MeanCrossing::new(factory)),
        };
        Ok(Crossing::new(self.probability, method))
    }
}

impl Default for CrossingConfig {
    fn default() -> Self {
        Self::unchecked(CrossingType::SinglePoint, 80)
    }
}

fn require_coefficient(name: &str, value: Option<f64>, crossing_type: CrossingType) -> Result<f64> {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Some(v) => Err(EvolabError::Configuration(format!(
            "{} must be a non-negative number, got {}",
            name, v
        ))),
        None => Err(EvolabError::Configuration(format!(
            "{:?} crossing requires {}",
            crossing_type, name
        ))),
    }
}

impl ConfigSection for CrossingConfig {
    fn section_name() -> &'static str {
        "crossing"
    }

    fn validate(&self) -> Result<()> {
        check_probability(Self::section_name(), "probability", self.probability)?;

        match self.crossing_type {
            CrossingType::Grain => match self.grain_size {
                Some(size) if size > 0 => {}
                _ => {
                    return Err(EvolabError::Configuration(
                        "Grain crossing requires a grain size greater than 0".to_string()
                    ))
                }
            },
            CrossingType::Arithmetic => {
                let alpha = require_coefficient("alpha", self.alpha, self.crossing_type)?;
                if alpha > 1.0 {
                    return Err(EvolabError::Configuration(format!(
                        "Arithmetic crossing alpha must be in [0, 1], got {}",
                        alpha
                    )));
                }
            }
            CrossingType::AlphaBlend => {
                require_coefficient("alpha", self.alpha, self.crossing_type)?;
            }
            CrossingType::AlphaBetaBlend => {
                require_coefficient("alpha", self.alpha, self.crossing_type)?;
                require_coefficient("beta", self.beta, self.crossing_type)?;
            }
            _ => {}
        }
        Ok(())
    }
}
