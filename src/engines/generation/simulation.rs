use crate::config::SimulationConfig;
use crate::engines::generation::operators::{
    Crossing, EliteStrategy, MutationOperator, SelectionOperator, StandardInversion,
};
use crate::engines::generation::unit::{Unit, UnitFactory};
use crate::engines::metrics::GenerationStats;
use crate::error::{EvolabError, Result};
use crate::functions::Objective;
use crate::types::OptimizationDirection;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use serde::Serialize;
use std::fmt;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SimulationState {
    Uninitialized,
    Ready,
    Evaluating,
    Reproducing,
    Done,
}

impl fmt::Display for SimulationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SimulationState::Uninitialized => "uninitialized",
            SimulationState::Ready => "ready",
            SimulationState::Evaluating => "evaluating",
            SimulationState::Reproducing => "reproducing",
            SimulationState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// One entry per evaluation pass: `epochs_no + 1` in total
    pub history: Vec<GenerationStats>,
    pub elapsed_secs: f64,
    pub final_population: Vec<Vec<f64>>,
    pub best_solution: Vec<f64>,
    pub best_cost: Option<f64>,
    pub config: SimulationConfig,
}

/// Generational loop: evaluate, select, split off elites, breed, mutate,
/// invert, repeat.
///
/// Elites are carried over with the cost cached from the epoch that
/// selected them and keep it until the next evaluation pass overwrites it.
pub struct Simulation {
    config: SimulationConfig,
    objective: Box<dyn Objective>,
    factory: UnitFactory,
    direction: OptimizationDirection,
    selection: Box<dyn SelectionOperator>,
    crossing: Crossing,
    mutation: Box<dyn MutationOperator>,
    inversion: StandardInversion,
    elite: EliteStrategy,
    population: Vec<Unit>,
    history: Vec<GenerationStats>,
    state: SimulationState,
    epoch: usize,
    rng: StdRng,
}

impl Simulation {
    /// Validate the configuration and resolve every operator up front
    pub fn new(config: SimulationConfig, objective: Box<dyn Objective>) -> Result<Self> {
        config.validate()?;

        let dimensions = config.cost_function.dimensions;
        let (lower, upper) = objective.suggested_bounds(dimensions);
        let (lower_bound, upper_bound) = match (lower.first(), upper.first()) {
            (Some(&lo), Some(&hi)) if lower.len() == dimensions && upper.len() == dimensions => (lo, hi),
            _ => {
                return Err(EvolabError::Configuration(format!(
                    "{} returned {}/{} bounds for {} dimensions",
                    objective.name(),
                    lower.len(),
                    upper.len(),
                    dimensions
                )))
            }
        };
        if lower.iter().any(|&v| v != lower_bound) || upper.iter().any(|&v| v != upper_bound) {
            log::warn!(
                "{} has per-dimension bounds; using [{}, {}] for every gene",
                objective.name(),
                lower_bound,
                upper_bound
            );
        }

        let factory = UnitFactory::new(lower_bound, upper_bound, config.general.precision)?;
        let representation = config.general.representation;
        let direction = config.selection.direction;

        let selection = config.selection.build_operator()?;
        let crossing = config.crossing.build_operator(factory, representation)?;
        let mutation = config.mutation.build_operator(factory, representation)?;
        let inversion = config.inversion.build_operator(factory, representation)?;
        let elite = config.elite.build_strategy(direction);

        let rng = match config.general.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            objective,
            factory,
            direction,
            selection,
            crossing,
            mutation,
            inversion,
            elite,
            population: Vec::new(),
            history: Vec::new(),
            state: SimulationState::Uninitialized,
            epoch: 0,
            rng,
        })
    }

    /// Same as [`Simulation::new`] with the objective named in the config
    pub fn from_config(config: SimulationConfig) -> Result<Self> {
        let objective = config.cost_function.function.build();
        Self::new(config, objective)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn factory(&self) -> &UnitFactory {
        &self.factory
    }

    pub fn population(&self) -> &[Unit] {
        &self.population
    }

    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Completed epochs
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    /// Fill the population with random units and clear the history
    pub fn initialize(&mut self) {
        let dimensions = self.config.cost_function.dimensions;
        self.population = (0..self.config.general.population_size)
            .map(|_| self.factory.create_random_unit(dimensions, &mut self.rng))
            .collect();
        self.history.clear();
        self.epoch = 0;
        self.state = SimulationState::Ready;
    }

    /// Score every unit and append the population statistics to the history
    pub fn evaluate(&mut self) -> Result<GenerationStats> {
        if self.state == SimulationState::Uninitialized {
            return Err(EvolabError::Simulation(
                "cannot evaluate before initialize()".to_string(),
            ));
        }
        let previous = self.state;
        self.state = SimulationState::Evaluating;
        let scored = self.score_population();
        self.state = previous;
        scored
    }

    fn score_population(&mut self) -> Result<GenerationStats> {
        let mut costs = Vec::with_capacity(self.population.len());
        for unit in &mut self.population {
            let cost = self
                .objective
                .cost(unit.real_values())
                .map_err(EvolabError::Objective)?;
            unit.assign_cost(cost);
            costs.push(cost);
        }

        let stats = GenerationStats::from_costs(&costs, self.direction);
        self.history.push(stats);
        Ok(stats)
    }

    /// One epoch: evaluate, then breed the next population
    pub fn step(&mut self) -> Result<GenerationStats> {
        match self.state {
            SimulationState::Ready => {}
            SimulationState::Uninitialized => {
                return Err(EvolabError::Simulation(
                    "cannot step before initialize()".to_string(),
                ))
            }
            other => {
                return Err(EvolabError::Simulation(format!(
                    "cannot step while {}",
                    other
                )))
            }
        }

        let stats = self.evaluate()?;
        log::debug!(
            "Epoch {}: best={:.6} avg={:.6} std={:.6}",
            self.epoch + 1,
            stats.best_cost,
            stats.avg_cost,
            stats.std_dev
        );

        self.state = SimulationState::Reproducing;
        self.population = self.next_generation()?;
        self.epoch += 1;
        self.state = SimulationState::Ready;
        Ok(stats)
    }

    /// Initialize, run every epoch, then score the final population
    pub fn run(&mut self) -> Result<SimulationReport> {
        let start = Instant::now();
        log::info!(
            "Starting simulation: {} over {} dimensions, population {}, {} epochs",
            self.objective.name(),
            self.config.cost_function.dimensions,
            self.config.general.population_size,
            self.config.general.epochs_no
        );

        self.initialize();
        for _ in 0..self.config.general.epochs_no {
            self.step()?;
        }
        let final_stats = self.evaluate()?;
        self.state = SimulationState::Done;

        let elapsed_secs = start.elapsed().as_secs_f64();
        log::info!(
            "Simulation finished in {:.3}s, best cost {:.6}",
            elapsed_secs,
            final_stats.best_cost
        );

        Ok(self.report(elapsed_secs))
    }

    /// Best unit of the current population by cached cost
    pub fn best_unit(&self) -> Option<&Unit> {
        self.population
            .iter()
            .min_by(|a, b| self.direction.rank(a.cost(), b.cost()))
    }

    fn report(&self, elapsed_secs: f64) -> SimulationReport {
        let best = self.best_unit();
        SimulationReport {
            history: self.history.clone(),
            elapsed_secs,
            final_population: self
                .population
                .iter()
                .map(|u| u.real_values().to_vec())
                .collect(),
            best_solution: best.map(|u| u.real_values().to_vec()).unwrap_or_default(),
            best_cost: best.and_then(|u| u.cost()),
            config: self.config.clone(),
        }
    }

    fn next_generation(&mut self) -> Result<Vec<Unit>> {
        let population_size = self.config.general.population_size;
        let count = self.config.selection_count();

        let mating_pool = self.selection.select(&self.population, count, &mut self.rng);
        let (elites, breeding_pool) = self.elite.split(mating_pool);

        let offspring_count = population_size.saturating_sub(elites.len());
        let mut offspring = self.breed(&breeding_pool, offspring_count)?;

        offspring = offspring
            .iter()
            .map(|child| self.mutation.mutate(child, &mut self.rng))
            .collect();
        offspring = offspring
            .iter()
            .map(|child| self.inversion.invert(child, &mut self.rng))
            .collect();

        offspring.extend(elites);
        debug_assert_eq!(offspring.len(), population_size);
        Ok(offspring)
    }

    /// Cross random parent pairs until exactly `count` children exist
    fn breed(&mut self, breeding_pool: &[Unit], count: usize) -> Result<Vec<Unit>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        if breeding_pool.is_empty() {
            return Err(EvolabError::Simulation(
                "breeding pool is empty after removing elites".to_string(),
            ));
        }

        let mut offspring = Vec::with_capacity(count + 1);
        while offspring.len() < count {
            let (first, second) = if breeding_pool.len() >= 2 {
                let pair = index::sample(&mut self.rng, breeding_pool.len(), 2);
                (pair.index(0), pair.index(1))
            } else {
                (0, 0)
            };

            let children = self.crossing.cross(
                &breeding_pool[first],
                &breeding_pool[second],
                &mut self.rng,
            );
            offspring.extend(self.keep_best_two(children)?);
        }

        offspring.truncate(count);
        Ok(offspring)
    }

    /// Methods returning more than two candidates are cut down to the two
    /// best by objective value
    fn keep_best_two(&self, children: Vec<Unit>) -> Result<Vec<Unit>> {
        if children.len() <= 2 {
            return Ok(children);
        }

        let mut scored = Vec::with_capacity(children.len());
        for child in children {
            let cost = self
                .objective
                .cost(child.real_values())
                .map_err(EvolabError::Objective)?;
            scored.push(child.evaluated(cost));
        }
        scored.sort_by(|a, b| self.direction.rank(a.cost(), b.cost()));
        scored.truncate(2);
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SelectionConfig, SelectionType};

    fn seeded_config(seed: u64) -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.general.seed = Some(seed);
        config
    }

    #[test]
    fn test_step_requires_initialize() {
        let mut sim = Simulation::from_config(seeded_config(1)).unwrap();
        assert_eq!(sim.state(), SimulationState::Uninitialized);
        assert!(sim.step().is_err());
        sim.initialize();
        assert_eq!(sim.state(), SimulationState::Ready);
        assert_eq!(sim.population().len(), 10);
    }

    #[test]
    fn test_evaluate_leaves_simulation_steppable() {
        let mut sim = Simulation::from_config(seeded_config(4)).unwrap();
        sim.initialize();
        sim.evaluate().unwrap();
        assert_eq!(sim.state(), SimulationState::Ready);
        sim.step().unwrap();
        sim.step().unwrap();
        assert_eq!(sim.history().len(), 3);
        assert_eq!(sim.epoch(), 2);

        sim.run().unwrap();
        sim.evaluate().unwrap();
        assert_eq!(sim.state(), SimulationState::Done);
    }

    #[test]
    fn test_step_keeps_population_size() {
        let mut config = seeded_config(2);
        config.selection = SelectionConfig::new(
            SelectionType::Tournament,
            50,
            OptimizationDirection::Minimize,
            Some(2),
        )
        .unwrap();
        let mut sim = Simulation::from_config(config).unwrap();
        sim.initialize();
        for _ in 0..5 {
            sim.step().unwrap();
            assert_eq!(sim.population().len(), 10);
        }
        assert_eq!(sim.epoch(), 5);
        assert_eq!(sim.history().len(), 5);
    }

    #[test]
    fn test_run_is_reproducible_with_seed() {
        let a = Simulation::from_config(seeded_config(42)).unwrap().run().unwrap();
        let b = Simulation::from_config(seeded_config(42)).unwrap().run().unwrap();
        assert_eq!(a.history, b.history);
        assert_eq!(a.best_solution, b.best_solution);
    }
}
