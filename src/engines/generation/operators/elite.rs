use crate::engines::generation::unit::Unit;
use crate::types::OptimizationDirection;

/// Keeps the best `elite_count` units of each generation untouched.
///
/// Elites skip crossing, mutation and inversion and are carried into the
/// next population with their cost still cached.
#[derive(Debug, Clone)]
pub struct EliteStrategy {
    elite_count: usize,
    direction: OptimizationDirection,
}

impl EliteStrategy {
    pub fn new(elite_count: usize, direction: OptimizationDirection) -> Self {
        Self {
            elite_count,
            direction,
        }
    }

    pub fn elite_count(&self) -> usize {
        self.elite_count
    }

    /// The best `elite_count` units, best first
    pub fn select_elite(&self, population: &[Unit]) -> Vec<Unit> {
        let mut ranked = population.to_vec();
        ranked.sort_by(|a, b| self.direction.rank(a.cost(), b.cost()));
        ranked.truncate(self.elite_count);
        ranked
    }

    /// Split a mating pool into `(elites, breeding_pool)`.
    ///
    /// The breeding pool is the rest of the pool in rank order, so the two
    /// parts are disjoint and together hold every unit of `pool`.
    pub fn split(&self, mut pool: Vec<Unit>) -> (Vec<Unit>, Vec<Unit>) {
        pool.sort_by(|a, b| self.direction.rank(a.cost(), b.cost()));
        let rest = pool.split_off(self.elite_count.min(pool.len()));
        (pool, rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::unit::UnitFactory;

    fn pool(costs: &[f64]) -> Vec<Unit> {
        let factory = UnitFactory::new(0.0, 10.0, 1).unwrap();
        costs
            .iter()
            .map(|&c| factory.create_unit_with_real_values(vec![c]).evaluated(c))
            .collect()
    }

    #[test]
    fn test_select_elite_minimize() {
        let strategy = EliteStrategy::new(2, OptimizationDirection::Minimize);
        let elites = strategy.select_elite(&pool(&[5.0, 1.0, 3.0, 0.5]));
        let costs: Vec<f64> = elites.iter().filter_map(|u| u.cost()).collect();
        assert_eq!(costs, vec![0.5, 1.0]);
    }

    #[test]
    fn test_split_is_disjoint_and_complete() {
        let strategy = EliteStrategy::new(1, OptimizationDirection::Maximize);
        let (elites, rest) = strategy.split(pool(&[2.0, 9.0, 4.0]));
        assert_eq!(elites.len(), 1);
        assert_eq!(elites[0].cost(), Some(9.0));
        assert_eq!(rest.len(), 2);
        assert!(rest.iter().all(|u| u.cost() != Some(9.0)));
    }

    #[test]
    fn test_zero_elites() {
        let strategy = EliteStrategy::new(0, OptimizationDirection::Minimize);
        let (elites, rest) = strategy.split(pool(&[1.0, 2.0]));
        assert!(elites.is_empty());
        assert_eq!(rest.len(), 2);
    }
}
