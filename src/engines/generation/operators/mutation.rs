use super::roll;
use crate::engines::generation::chromosome::BitString;
use crate::engines::generation::unit::{Unit, UnitFactory};
use crate::error::{EvolabError, Result};
use crate::types::Representation;
use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};

/// Random perturbation of a single unit.
///
/// Implementations return a new unit with no cost; the input is never
/// touched.
pub trait MutationOperator: Send + Sync {
    fn name(&self) -> &'static str;

    fn probability(&self) -> u32;

    fn mutate(&self, unit: &Unit, rng: &mut dyn RngCore) -> Unit;
}

/// Each gene, with probability `p`, snaps to the lower or upper bound
#[derive(Debug, Clone)]
pub struct BoundaryMutation {
    probability: u32,
    factory: UnitFactory,
}

impl BoundaryMutation {
    pub fn new(probability: u32, factory: UnitFactory) -> Self {
        Self {
            probability,
            factory,
        }
    }
}

impl MutationOperator for BoundaryMutation {
    fn name(&self) -> &'static str {
        "Boundary"
    }

    fn probability(&self) -> u32 {
        self.probability
    }

    fn mutate(&self, unit: &Unit, rng: &mut dyn RngCore) -> Unit {
        let values = unit
            .real_values()
            .iter()
            .map(|&v| {
                if !roll(self.probability, rng) {
                    v
                } else if rng.gen_bool(0.5) {
                    self.factory.lower_bound()
                } else {
                    self.factory.upper_bound()
                }
            })
            .collect();
        self.factory.create_unit_with_real_values(values)
    }
}

/// Each gene, with probability `p`, changes at one point: a single flipped
/// bit in the binary representation, a fresh uniform draw in the real one
#[derive(Debug, Clone)]
pub struct SinglePointMutation {
    probability: u32,
    factory: UnitFactory,
    representation: Representation,
}

impl SinglePointMutation {
    pub fn new(probability: u32, factory: UnitFactory, representation: Representation) -> Self {
        Self {
            probability,
            factory,
            representation,
        }
    }
}

impl MutationOperator for SinglePointMutation {
    fn name(&self) -> &'static str {
        "Single-point"
    }

    fn probability(&self) -> u32 {
        self.probability
    }

    fn mutate(&self, unit: &Unit, rng: &mut dyn RngCore) -> Unit {
        match self.representation {
            Representation::Binary => {
                let genes: Vec<BitString> = unit
                    .binary_values()
                    .iter()
                    .map(|gene| {
                        let mut gene = gene.clone();
                        if roll(self.probability, rng) {
                            let point = rng.gen_range(0..gene.len());
                            gene.flip(point);
                        }
                        gene
                    })
                    .collect();
                self.factory.unit_from_genes(genes, &[unit])
            }
            Representation::Real => {
                let values = unit
                    .real_values()
                    .iter()
                    .map(|&v| {
                        if roll(self.probability, rng) {
                            self.factory.sample_gene(rng)
                        } else {
                            v
                        }
                    })
                    .collect();
                self.factory.create_unit_with_real_values(values)
            }
        }
    }
}

/// Mutation over a contiguous range.
///
/// Binary: each gene, with probability `p`, has an inclusive run of bits
/// flipped. Real: one roll per unit; on success an inclusive run of genes is
/// redrawn uniformly.
#[derive(Debug, Clone)]
pub struct TwoPointMutation {
    probability: u32,
    factory: UnitFactory,
    representation: Representation,
}

impl TwoPointMutation {
    pub fn new(probability: u32, factory: UnitFactory, representation: Representation) -> Self {
        Self {
            probability,
            factory,
            representation,
        }
    }
}

/// Inclusive `[start, end]` with `start <= end < len`
fn inclusive_range(len: usize, rng: &mut dyn RngCore) -> (usize, usize) {
    let start = rng.gen_range(0..len);
    let end = rng.gen_range(start..len);
    (start, end)
}

impl MutationOperator for TwoPointMutation {
    fn name(&self) -> &'static str {
        "Two-point"
    }

    fn probability(&self) -> u32 {
        self.probability
    }

    fn mutate(&self, unit: &Unit, rng: &mut dyn RngCore) -> Unit {
        match self.representation {
            Representation::Binary => {
                let genes: Vec<BitString> = unit
                    .binary_values()
                    .iter()
                    .map(|gene| {
                        let mut gene = gene.clone();
                        if roll(self.probability, rng) {
                            let (start, end) = inclusive_range(gene.len(), rng);
                            for i in start..=end {
                                gene.flip(i);
                            }
                        }
                        gene
                    })
                    .collect();
                self.factory.unit_from_genes(genes, &[unit])
            }
            Representation::Real => {
                let mut values = unit.real_values().to_vec();
                if !values.is_empty() && roll(self.probability, rng) {
                    let (start, end) = inclusive_range(values.len(), rng);
                    for value in &mut values[start..=end] {
                        *value = self.factory.sample_gene(rng);
                    }
                }
                self.factory.create_unit_with_real_values(values)
            }
        }
    }
}

/// Each gene, with probability `p`, is redrawn uniformly within the bounds
#[derive(Debug, Clone)]
pub struct UniformMutation {
    probability: u32,
    factory: UnitFactory,
}

impl UniformMutation {
    pub fn new(probability: u32, factory: UnitFactory) -> Self {
        Self {
            probability,
            factory,
        }
    }
}

impl MutationOperator for UniformMutation {
    fn name(&self) -> &'static str {
        "Uniform"
    }

    fn probability(&self) -> u32 {
        self.probability
    }

    fn mutate(&self, unit: &Unit, rng: &mut dyn RngCore) -> Unit {
        let values = unit
            .real_values()
            .iter()
            .map(|&v| {
                if roll(self.probability, rng) {
                    self.factory.sample_gene(rng)
                } else {
                    v
                }
            })
            .collect();
        self.factory.create_unit_with_real_values(values)
    }
}

/// Each gene, with probability `p`, gets N(0, sigma) noise, then is clamped
#[derive(Debug, Clone)]
pub struct GaussianMutation {
    probability: u32,
    factory: UnitFactory,
    noise: Normal<f64>,
}

impl GaussianMutation {
    pub fn new(probability: u32, factory: UnitFactory, sigma: f64) -> Result<Self> {
        let noise = Normal::new(0.0, sigma).map_err(|e| {
            EvolabError::Configuration(format!("invalid Gaussian sigma {}: {}", sigma, e))
        })?;
        Ok(Self {
            probability,
            factory,
            noise,
        })
    }

    pub fn sigma(&self) -> f64 {
        self.noise.std_dev()
    }
}

impl MutationOperator for GaussianMutation {
    fn name(&self) -> &'static str {
        "Gaussian"
    }

    fn probability(&self) -> u32 {
        self.probability
    }

    fn mutate(&self, unit: &Unit, rng: &mut dyn RngCore) -> Unit {
        let values = unit
            .real_values()
            .iter()
            .map(|&v| {
                if roll(self.probability, rng) {
                    v + self.noise.sample(rng)
                } else {
                    v
                }
            })
            .collect();
        self.factory.create_unit_with_real_values(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn factory() -> UnitFactory {
        UnitFactory::new(-5.0, 5.0, 3).unwrap()
    }

    #[test]
    fn test_boundary_snaps_to_bounds() {
        let f = factory();
        let unit = f.create_unit_with_real_values(vec![0.1, 0.2, 0.3]);
        let mut rng = StdRng::seed_from_u64(1);
        let mutated = BoundaryMutation::new(100, f).mutate(&unit, &mut rng);
        assert!(mutated
            .real_values()
            .iter()
            .all(|&v| v == -5.0 || v == 5.0));
    }

    #[test]
    fn test_single_point_binary_flips_one_bit_per_gene() {
        let f = factory();
        let unit = f.create_unit_with_real_values(vec![1.0, -1.0]);
        let mut rng = StdRng::seed_from_u64(2);
        let mutated =
            SinglePointMutation::new(100, f, Representation::Binary).mutate(&unit, &mut rng);
        for (before, after) in unit.binary_values().iter().zip(mutated.binary_values()) {
            let flipped = before
                .bits()
                .iter()
                .zip(after.bits())
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(flipped, 1);
        }
    }

    #[test]
    fn test_two_point_binary_flips_contiguous_run() {
        let f = factory();
        let unit = f.create_unit_with_real_values(vec![0.0]);
        let mut rng = StdRng::seed_from_u64(9);
        let op = TwoPointMutation::new(100, f, Representation::Binary);
        for _ in 0..20 {
            let mutated = op.mutate(&unit, &mut rng);
            let diff: Vec<usize> = unit.binary_values()[0]
                .bits()
                .iter()
                .zip(mutated.binary_values()[0].bits())
                .enumerate()
                .filter(|(_, (a, b))| a != b)
                .map(|(i, _)| i)
                .collect();
            assert!(!diff.is_empty());
            assert_eq!(diff.last().unwrap() - diff[0] + 1, diff.len());
        }
    }

    #[test]
    fn test_gaussian_rejects_bad_sigma() {
        assert!(GaussianMutation::new(10, factory(), -1.0).is_err());
        assert!(GaussianMutation::new(10, factory(), 0.5).is_ok());
    }

    #[test]
    fn test_gaussian_stays_in_bounds() {
        let f = factory();
        let unit = f.create_unit_with_real_values(vec![4.9, -4.9, 0.0]);
        let mut rng = StdRng::seed_from_u64(4);
        let op = GaussianMutation::new(100, f, 3.0).unwrap();
        for _ in 0..100 {
            let mutated = op.mutate(&unit, &mut rng);
            assert!(mutated.real_values().iter().all(|&v| (-5.0..=5.0).contains(&v)));
        }
    }

    #[test]
    fn test_uniform_redraws_within_bounds() {
        let f = factory();
        let unit = f
            .create_unit_with_real_values(vec![1.25, -2.5, 3.75, 0.5])
            .evaluated(7.0);
        let mut rng = StdRng::seed_from_u64(6);

        let always = UniformMutation::new(100, f);
        for _ in 0..50 {
            let mutated = always.mutate(&unit, &mut rng);
            assert!(mutated.cost().is_none());
            for (before, after) in unit.real_values().iter().zip(mutated.real_values()) {
                assert!((-5.0..=5.0).contains(after));
                assert_ne!(before, after);
            }
        }

        let never = UniformMutation::new(0, f).mutate(&unit, &mut rng);
        assert_eq!(never.real_values(), unit.real_values());
        assert!(never.cost().is_none());
    }

    #[test]
    fn test_two_point_real_redraws_contiguous_run() {
        let f = factory();
        let original = vec![0.111, 0.222, 0.333, 0.444, 0.555, 0.666, 0.777, 0.888];
        let unit = f.create_unit_with_real_values(original.clone());
        let mut rng = StdRng::seed_from_u64(8);
        let op = TwoPointMutation::new(100, f, Representation::Real);
        for _ in 0..50 {
            let mutated = op.mutate(&unit, &mut rng);
            let diff: Vec<usize> = original
                .iter()
                .zip(mutated.real_values())
                .enumerate()
                .filter(|(_, (a, b))| a != b)
                .map(|(i, _)| i)
                .collect();
            assert!(!diff.is_empty());
            assert_eq!(diff.last().unwrap() - diff[0] + 1, diff.len());
            assert!(mutated.real_values().iter().all(|&v| (-5.0..=5.0).contains(&v)));
        }
    }
}
