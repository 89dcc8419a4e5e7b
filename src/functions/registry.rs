use super::benchmarks::{Ackley, Rastrigin, Rosenbrock, Sphere};
use super::traits::Objective;
use crate::error::EvolabError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Built-in objectives selectable by name from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostFunction {
    Rastrigin,
    Rosenbrock,
    Ackley,
    Sphere,
}

impl CostFunction {
    pub fn all() -> [CostFunction; 4] {
        [
            CostFunction::Rastrigin,
            CostFunction::Rosenbrock,
            CostFunction::Ackley,
            CostFunction::Sphere,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            CostFunction::Rastrigin => "Rastrigin",
            CostFunction::Rosenbrock => "Rosenbrock",
            CostFunction::Ackley => "Ackley",
            CostFunction::Sphere => "Sphere",
        }
    }

    /// Smallest dimensionality the function is defined for
    pub fn min_dimensions(&self) -> usize {
        match self {
            CostFunction::Rosenbrock => 2,
            _ => 1,
        }
    }

    pub fn build(&self) -> Box<dyn Objective> {
        match self {
            CostFunction::Rastrigin => Box::new(Rastrigin),
            CostFunction::Rosenbrock => Box::new(Rosenbrock),
            CostFunction::Ackley => Box::new(Ackley),
            CostFunction::Sphere => Box::new(Sphere),
        }
    }
}

impl Default for CostFunction {
    fn default() -> Self {
        CostFunction::Rastrigin
    }
}

impl fmt::Display for CostFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CostFunction {
    type Err = EvolabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CostFunction::all()
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EvolabError::Configuration(format!("Unknown cost function: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_by_name() {
        assert_eq!("rastrigin".parse::<CostFunction>().unwrap(), CostFunction::Rastrigin);
        assert_eq!(" Ackley ".parse::<CostFunction>().unwrap(), CostFunction::Ackley);
        assert!("griewank".parse::<CostFunction>().is_err());
    }

    #[test]
    fn test_build_matches_name() {
        for function in CostFunction::all() {
            assert_eq!(function.build().name(), function.name());
        }
    }
}
