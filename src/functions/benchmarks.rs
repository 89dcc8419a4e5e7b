//! Classic benchmark objectives.
//!
//! All four have their global minimum at a known point, which makes them
//! handy for checking that a run actually converges.
use super::traits::Objective;
use anyhow::{bail, Result};
use std::f64::consts::{E, PI};

fn uniform_bounds(lower: f64, upper: f64, dimensions: usize) -> (Vec<f64>, Vec<f64>) {
    (vec![lower; dimensions], vec![upper; dimensions])
}

/// Rastrigin function - N-dimensional multimodal
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-5.12, 5.12]
#[derive(Debug, Clone, Copy, Default)]
pub struct Rastrigin;

impl Objective for Rastrigin {
    fn name(&self) -> &str {
        "Rastrigin"
    }

    fn cost(&self, values: &[f64]) -> Result<f64> {
        if values.is_empty() {
            bail!("Rastrigin needs at least one dimension");
        }
        let n = values.len() as f64;
        let sum: f64 = values
            .iter()
            .map(|&xi| xi.powi(2) - 10.0 * (2.0 * PI * xi).cos())
            .sum();
        Ok(10.0 * n + sum)
    }

    fn suggested_bounds(&self, dimensions: usize) -> (Vec<f64>, Vec<f64>) {
        uniform_bounds(-5.12, 5.12, dimensions)
    }
}

/// Rosenbrock function - N-dimensional valley
/// Global minimum: f(x) = 0 at x = (1, 1, ..., 1)
/// Bounds: x_i in [-2.048, 2.048]
#[derive(Debug, Clone, Copy, Default)]
pub struct Rosenbrock;

impl Objective for Rosenbrock {
    fn name(&self) -> &str {
        "Rosenbrock"
    }

    fn cost(&self, values: &[f64]) -> Result<f64> {
        if values.len() < 2 {
            bail!("Rosenbrock needs at least two dimensions, got {}", values.len());
        }
        Ok(values
            .windows(2)
            .map(|w| 100.0 * (w[1] - w[0].powi(2)).powi(2) + (1.0 - w[0]).powi(2))
            .sum())
    }

    fn suggested_bounds(&self, dimensions: usize) -> (Vec<f64>, Vec<f64>) {
        uniform_bounds(-2.048, 2.048, dimensions)
    }
}

/// Ackley function - N-dimensional multimodal
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-32.768, 32.768]
#[derive(Debug, Clone, Copy, Default)]
pub struct Ackley;

impl Objective for Ackley {
    fn name(&self) -> &str {
        "Ackley"
    }

    fn cost(&self, values: &[f64]) -> Result<f64> {
        if values.is_empty() {
            bail!("Ackley needs at least one dimension");
        }
        let n = values.len() as f64;
        let sum_sq: f64 = values.iter().map(|&xi| xi.powi(2)).sum();
        let sum_cos: f64 = values.iter().map(|&xi| (2.0 * PI * xi).cos()).sum();

        Ok(-20.0 * (-0.2 * (sum_sq / n).sqrt()).exp() - (sum_cos / n).exp() + 20.0 + E)
    }

    fn suggested_bounds(&self, dimensions: usize) -> (Vec<f64>, Vec<f64>) {
        uniform_bounds(-32.768, 32.768, dimensions)
    }
}

/// Sphere function - sum of squares
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
#[derive(Debug, Clone, Copy, Default)]
pub struct Sphere;

impl Objective for Sphere {
    fn name(&self) -> &str {
        "Sphere"
    }

    fn cost(&self, values: &[f64]) -> Result<f64> {
        Ok(values.iter().map(|&xi| xi * xi).sum())
    }

    fn suggested_bounds(&self, dimensions: usize) -> (Vec<f64>, Vec<f64>) {
        uniform_bounds(-5.12, 5.12, dimensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_minima() {
        assert!(Rastrigin.cost(&[0.0, 0.0, 0.0]).unwrap().abs() < 1e-12);
        assert!(Rosenbrock.cost(&[1.0, 1.0, 1.0]).unwrap().abs() < 1e-12);
        assert!(Ackley.cost(&[0.0, 0.0]).unwrap().abs() < 1e-12);
        assert_eq!(Sphere.cost(&[0.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_known_values() {
        // cos(2*pi) = 1, so each unit coordinate adds 1
        assert!((Rastrigin.cost(&[1.0, 1.0]).unwrap() - 2.0).abs() < 1e-9);
        assert_eq!(Rosenbrock.cost(&[0.0, 0.0]).unwrap(), 1.0);
        assert_eq!(Sphere.cost(&[3.0, 4.0]).unwrap(), 25.0);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(Rosenbrock.cost(&[0.5]).is_err());
        assert!(Rastrigin.cost(&[]).is_err());
    }

    #[test]
    fn test_bounds() {
        let (lower, upper) = Ackley.suggested_bounds(2);
        assert_eq!(lower, vec![-32.768, -32.768]);
        assert_eq!(upper, vec![32.768, 32.768]);
    }
}
