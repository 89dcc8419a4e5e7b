use super::traits::ConfigSection;
use crate::engines::generation::operators::{
    BestSelection, RouletteWheelSelection, SelectionOperator, TournamentSelection,
};
use crate::error::{EvolabError, Result};
use crate::types::OptimizationDirection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionType {
    Best,
    RouletteWheel,
    Tournament,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub selection_type: SelectionType,
    /// Share of the population entering the mating pool, in percent
    pub selection_percentage: u32,
    pub direction: OptimizationDirection,
    pub tournament_size: Option<usize>,
}

impl SelectionConfig {
    pub fn new(
        selection_type: SelectionType,
        selection_percentage: u32,
        direction: OptimizationDirection,
        tournament_size: Option<usize>,
    ) -> Result<Self> {
        let config = Self {
            selection_type,
            selection_percentage,
            direction,
            tournament_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Count handed to the selection operator
    pub fn selection_count(&self, population_size: usize) -> usize {
        match (self.selection_type, self.tournament_size) {
            (SelectionType::Tournament, Some(size)) => size,
            _ => population_size * self.selection_percentage as usize / 100,
        }
    }

    /// Number of units the operator actually returns
    pub fn mating_pool_size(&self, population_size: usize) -> usize {
        match (self.selection_type, self.tournament_size) {
            (SelectionType::Tournament, Some(size)) if size > 0 => {
                (population_size + size - 1) / size
            }
            _ => self.selection_count(population_size),
        }
    }

    pub fn build_operator(&self) -> Result<Box<dyn SelectionOperator>> {
        self.validate()?;
        let operator: Box<dyn SelectionOperator> = match self.selection_type {
            SelectionType::Best => Box::new(BestSelection::new(self.direction)),
            SelectionType::RouletteWheel => Box::new(RouletteWheelSelection::new(self.direction)),
            SelectionType::Tournament => Box::new(TournamentSelection::new(
                self.direction,
                self.tournament_size.unwrap_or_default(),
            )),
        };
        Ok(operator)
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            selection_type: SelectionType::Best,
            selection_percentage: 50,
            direction: OptimizationDirection::Minimize,
            tournament_size: None,
        }
    }
}

impl ConfigSection for SelectionConfig {
    fn section_name() -> &'static str {
        "selection"
    }

    fn validate(&self) -> Result<()> {
        if self.selection_percentage == 0 || self.selection_percentage > 100 {
            return Err(EvolabError::Configuration(format!(
                "Selection percentage must be in (0, 100], got {}",
                self.selection_percentage
            )));
        }
        if self.selection_type == SelectionType::Tournament {
            match self.tournament_size {
                Some(size) if size >= 2 => {}
                Some(size) => {
                    return Err(EvolabError::Configuration(format!(
                        "Tournament size must be at least 2, got {}",
                        size
                    )))
                }
                None => {
                    return Err(EvolabError::Configuration(
                        "Tournament selection requires a tournament size".to_string()
                    ))
                }
            }
        }
        Ok(())
    }
}
