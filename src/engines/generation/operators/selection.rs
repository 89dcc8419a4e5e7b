use crate::engines::generation::unit::Unit;
use crate::types::OptimizationDirection;
use rand::seq::{index, SliceRandom};
use rand::{Rng, RngCore};

/// Offset keeping inverted roulette weights strictly positive
const ROULETTE_EPSILON: f64 = 1e-9;

/// Picks the units that enter the mating pool
pub trait SelectionOperator: Send + Sync {
    fn name(&self) -> &'static str;

    fn select(&self, population: &[Unit], count: usize, rng: &mut dyn RngCore) -> Vec<Unit>;
}

/// Truncation selection: the `count` best units, in rank order
#[derive(Debug, Clone)]
pub struct BestSelection {
    direction: OptimizationDirection,
}

impl BestSelection {
    pub fn new(direction: OptimizationDirection) -> Self {
        Self { direction }
    }
}

impl SelectionOperator for BestSelection {
    fn name(&self) -> &'static str {
        "Best"
    }

    fn select(&self, population: &[Unit], count: usize, _rng: &mut dyn RngCore) -> Vec<Unit> {
        let mut sorted = population.to_vec();
        // stable sort keeps equal costs in population order
        sorted.sort_by(|a, b| self.direction.rank(a.cost(), b.cost()));
        sorted.truncate(count);
        sorted
    }
}

/// Fitness-proportional selection with replacement
#[derive(Debug, Clone)]
pub struct RouletteWheelSelection {
    direction: OptimizationDirection,
}

impl RouletteWheelSelection {
    pub fn new(direction: OptimizationDirection) -> Self {
        Self { direction }
    }

    /// Non-negative weight per unit.
    ///
    /// Maximization uses the cost itself (negative costs weigh nothing).
    /// Minimization inverts against the worst cost. Unevaluated units weigh
    /// nothing, and a population of identical costs gets uniform weights.
    fn weights(&self, population: &[Unit]) -> Vec<f64> {
        let costs: Vec<Option<f64>> = population
            .iter()
            .map(|u| u.cost().filter(|c| c.is_finite()))
            .collect();

        let known: Vec<f64> = costs.iter().flatten().copied().collect();
        if known.is_empty() {
            return vec![0.0; population.len()];
        }

        let max_cost = known.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min_cost = known.iter().copied().fold(f64::INFINITY, f64::min);
        if max_cost - min_cost <= f64::EPSILON {
            return costs.iter().map(|c| if c.is_some() { 1.0 } else { 0.0 }).collect();
        }

        match self.direction {
            OptimizationDirection::Maximize => {
                costs.iter().map(|c| c.map_or(0.0, |c| c.max(0.0))).collect()
            }
            OptimizationDirection::Minimize => costs
                .iter()
                .map(|c| c.map_or(0.0, |c| max_cost - c + ROULETTE_EPSILON))
                .collect(),
        }
    }
}

impl SelectionOperator for RouletteWheelSelection {
    fn name(&self) -> &'static str {
        "Roulette Wheel"
    }

    fn select(&self, population: &[Unit], count: usize, rng: &mut dyn RngCore) -> Vec<Unit> {
        if population.is_empty() {
            return Vec::new();
        }

        let weights = self.weights(population);
        let total: f64 = weights.iter().sum();

        if total <= 0.0 {
            log::warn!("Roulette wheel has zero total weight, sampling uniformly");
            if count <= population.len() {
                return population.choose_multiple(rng, count).cloned().collect();
            }
            return (0..count)
                .filter_map(|_| population.choose(rng).cloned())
                .collect();
        }

        let cumulative: Vec<f64> = weights
            .iter()
            .scan(0.0, |acc, w| {
                *acc += w;
                Some(*acc)
            })
            .collect();

        (0..count)
            .map(|_| {
                let pick = rng.gen::<f64>() * total;
                // first slot whose cumulative weight passes the pick; zero-weight
                // slots never satisfy the strict comparison
                let idx = cumulative
                    .partition_point(|&c| c <= pick)
                    .min(population.len() - 1);
                population[idx].clone()
            })
            .collect()
    }
}

/// Tournament selection over a shrinking pool.
///
/// Runs `ceil(population / tournament_size)` tournaments. Each draws its
/// contestants without replacement and the winner leaves the pool, so a
/// unit can win at most once. The requested count is not used: the number
/// of winners follows from the tournament size alone.
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    direction: OptimizationDirection,
    tournament_size: usize,
}

impl TournamentSelection {
    pub fn new(direction: OptimizationDirection, tournament_size: usize) -> Self {
        Self {
            direction,
            tournament_size: tournament_size.max(1),
        }
    }

    pub fn winner_count(&self, population_size: usize) -> usize {
        (population_size + self.tournament_size - 1) / self.tournament_size
    }
}

impl SelectionOperator for TournamentSelection {
    fn name(&self) -> &'static str {
        "Tournament"
    }

    fn select(&self, population: &[Unit], _count: usize, rng: &mut dyn RngCore) -> Vec<Unit> {
        let rounds = self.winner_count(population.len());
        let mut pool = population.to_vec();
        let mut winners = Vec::with_capacity(rounds);

        for _ in 0..rounds {
            if pool.is_empty() {
                break;
            }

            let size = self.tournament_size.min(pool.len());
            let contestants = index::sample(rng, pool.len(), size);
            let winner = contestants
                .iter()
                .min_by(|&a, &b| self.direction.rank(pool[a].cost(), pool[b].cost()));

            if let Some(idx) = winner {
                winners.push(pool.swap_remove(idx));
            }
        }

        winners
    }
}
