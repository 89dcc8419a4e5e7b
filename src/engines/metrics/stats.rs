// src/engines/metrics/stats.rs
use crate::types::OptimizationDirection;
use serde::{Deserialize, Serialize};

/// Cost summary of one evaluated population
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub best_cost: f64,
    pub avg_cost: f64,
    pub std_dev: f64,
}

impl GenerationStats {
    /// Summarize `costs`; `best_cost` honors the optimization direction.
    ///
    /// An empty slice yields NaN for every field.
    pub fn from_costs(costs: &[f64], direction: OptimizationDirection) -> Self {
        if costs.is_empty() {
            return Self {
                best_cost: f64::NAN,
                avg_cost: f64::NAN,
                std_dev: f64::NAN,
            };
        }

        let best_cost = match direction {
            OptimizationDirection::Maximize => costs.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            OptimizationDirection::Minimize => costs.iter().copied().fold(f64::INFINITY, f64::min),
        };

        Self {
            best_cost,
            avg_cost: Self::mean(costs),
            std_dev: Self::std_dev(costs),
        }
    }

    fn mean(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Sample standard deviation (n - 1 denominator); 0 for a single value
    fn std_dev(values: &[f64]) -> f64 {
        if values.len() < 2 {
            return 0.0;
        }

        let mean = Self::mean(values);
        let variance = values.iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>() / (values.len() - 1) as f64;

        variance.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_minimize() {
        let stats = GenerationStats::from_costs(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], OptimizationDirection::Minimize);
        assert_eq!(stats.best_cost, 2.0);
        assert_eq!(stats.avg_cost, 5.0);
        // sum of squares 32, n - 1 = 7
        assert!((stats.std_dev - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_stats_maximize() {
        let stats = GenerationStats::from_costs(&[1.0, 3.0], OptimizationDirection::Maximize);
        assert_eq!(stats.best_cost, 3.0);
        assert_eq!(stats.avg_cost, 2.0);
    }

    #[test]
    fn test_single_value_has_zero_deviation() {
        let stats = GenerationStats::from_costs(&[1.5], OptimizationDirection::Minimize);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.best_cost, 1.5);
    }
}
