use anyhow::Result;

/// A cost function the simulation optimizes
pub trait Objective: Send + Sync {
    /// Display name
    fn name(&self) -> &str;

    /// Cost of one point. An error aborts the run.
    fn cost(&self, values: &[f64]) -> Result<f64>;

    /// Per-dimension `(lower, upper)` search bounds
    fn suggested_bounds(&self, dimensions: usize) -> (Vec<f64>, Vec<f64>);
}

/// Adapts a plain closure into an [`Objective`] with uniform bounds
pub struct FnObjective<F> {
    name: String,
    lower_bound: f64,
    upper_bound: f64,
    func: F,
}

impl<F> FnObjective<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    pub fn new(name: impl Into<String>, lower_bound: f64, upper_bound: f64, func: F) -> Self {
        Self {
            name: name.into(),
            lower_bound,
            upper_bound,
            func,
        }
    }
}

impl<F> Objective for FnObjective<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn cost(&self, values: &[f64]) -> Result<f64> {
        Ok((self.func)(values))
    }

    fn suggested_bounds(&self, dimensions: usize) -> (Vec<f64>, Vec<f64>) {
        (
            vec![self.lower_bound; dimensions],
            vec![self.upper_bound; dimensions],
        )
    }
}
