//! Recombination operators.
//!
//! Positional variants (single-point, two-point, uniform, grain) exchange
//! segments between the parents and work on either representation: gene by
//! gene on the real vectors, or bit by bit on the concatenated chromosomes.
//! Value-based variants (arithmetic, linear, blends, mean) always compute on
//! the real vectors and clamp the result into the bounds.
use crate::engines::generation::unit::{Unit, UnitFactory};
use crate::types::Representation;
use rand::{Rng, RngCore};

/// One recombination method, without the probability gate
pub trait Recombination: Send + Sync {
    fn name(&self) -> &'static str;

    /// Produce offspring from two parents. Most methods return two
    /// children; [`LinearCrossing`] returns three.
    fn recombine(&self, parent1: &Unit, parent2: &Unit, rng: &mut dyn RngCore) -> Vec<Unit>;
}

/// A recombination method behind its crossing probability.
///
/// Each call draws an integer in `[1, 100]`. When it exceeds the
/// probability the parents come back unchanged, costs included.
pub struct Crossing {
    probability: u32,
    method: Box<dyn Recombination>,
}

impl Crossing {
    pub fn new(probability: u32, method: Box<dyn Recombination>) -> Self {
        Self {
            probability: probability.min(100),
            method,
        }
    }

    pub fn probability(&self) -> u32 {
        self.probability
    }

    pub fn name(&self) -> &'static str {
        self.method.name()
    }

    pub fn cross(&self, parent1: &Unit, parent2: &Unit, rng: &mut dyn RngCore) -> Vec<Unit> {
        let draw: u32 = rng.gen_range(1..=100);
        if draw > self.probability {
            return vec![parent1.clone(), parent2.clone()];
        }
        self.method.recombine(parent1, parent2, rng)
    }
}

/// Segment exchange that does not care what a position holds
trait Positional {
    fn exchange<T: Copy>(&self, a: &[T], b: &[T], rng: &mut dyn RngCore) -> (Vec<T>, Vec<T>);
}

fn positional_offspring<P: Positional>(
    op: &P,
    factory: &UnitFactory,
    representation: Representation,
    parent1: &Unit,
    parent2: &Unit,
    rng: &mut dyn RngCore,
) -> Vec<Unit> {
    match representation {
        Representation::Real => {
            let (a, b) = op.exchange(parent1.real_values(), parent2.real_values(), rng);
            vec![
                factory.create_unit_with_real_values(a),
                factory.create_unit_with_real_values(b),
            ]
        }
        Representation::Binary => {
            let (a, b) = op.exchange(&parent1.flat_bits(), &parent2.flat_bits(), rng);
            let sources = [parent1, parent2];
            vec![
                factory.unit_from_flat_bits(&a, &sources),
                factory.unit_from_flat_bits(&b, &sources),
            ]
        }
    }
}

/// Swap the tails after one random cut point
#[derive(Debug, Clone)]
pub struct SinglePointCrossing {
    factory: UnitFactory,
    representation: Representation,
}

impl SinglePointCrossing {
    pub fn new(factory: UnitFactory, representation: Representation) -> Self {
        Self {
            factory,
            representation,
        }
    }
}

impl Positional for SinglePointCrossing {
    fn exchange<T: Copy>(&self, a: &[T], b: &[T], rng: &mut dyn RngCore) -> (Vec<T>, Vec<T>) {
        let len = a.len().min(b.len());
        if len < 2 {
            return (a.to_vec(), b.to_vec());
        }
        let cut = rng.gen_range(1..len);
        let child1 = a[..cut].iter().chain(&b[cut..]).copied().collect();
        let child2 = b[..cut].iter().chain(&a[cut..]).copied().collect();
        (child1, child2)
    }
}

impl Recombination for SinglePointCrossing {
    fn name(&self) -> &'static str {
        "Single-point"
    }

    fn recombine(&self, parent1: &Unit, parent2: &Unit, rng: &mut dyn RngCore) -> Vec<Unit> {
        positional_offspring(self, &self.factory, self.representation, parent1, parent2, rng)
    }
}

/// Swap the segment between two random cut points.
///
/// Falls back to a single cut when there are fewer than three positions.
#[derive(Debug, Clone)]
pub struct TwoPointCrossing {
    factory: UnitFactory,
    representation: Representation,
}

impl TwoPointCrossing {
    pub fn new(factory: UnitFactory, representation: Representation) -> Self {
        Self {
            factory,
            representation,
        }
    }
}

impl Positional for TwoPointCrossing {
    fn exchange<T: Copy>(&self, a: &[T], b: &[T], rng: &mut dyn RngCore) -> (Vec<T>, Vec<T>) {
        let len = a.len().min(b.len());
        if len < 3 {
            return SinglePointCrossing::new(self.factory, self.representation).exchange(a, b, rng);
        }
        let first = rng.gen_range(1..len - 1);
        let second = rng.gen_range(first + 1..len);

        let mut child1 = a.to_vec();
        let mut child2 = b.to_vec();
        child1[first..second].copy_from_slice(&b[first..second]);
        child2[first..second].copy_from_slice(&a[first..second]);
        (child1, child2)
    }
}

impl Recombination for TwoPointCrossing {
    fn name(&self) -> &'static str {
        "Two-point"
    }

    fn recombine(&self, parent1: &Unit, parent2: &Unit, rng: &mut dyn RngCore) -> Vec<Unit> {
        positional_offspring(self, &self.factory, self.representation, parent1, parent2, rng)
    }
}

/// Fair coin per position; the second child takes the complement
#[derive(Debug, Clone)]
pub struct UniformCrossing {
    factory: UnitFactory,
    representation: Representation,
}

impl UniformCrossing {
    pub fn new(factory: UnitFactory, representation: Representation) -> Self {
        Self {
            factory,
            representation,
        }
    }
}

impl Positional for UniformCrossing {
    fn exchange<T: Copy>(&self, a: &[T], b: &[T], rng: &mut dyn RngCore) -> (Vec<T>, Vec<T>) {
        a.iter()
            .zip(b)
            .map(|(&x, &y)| if rng.gen_bool(0.5) { (x, y) } else { (y, x) })
            .unzip()
    }
}

impl Recombination for UniformCrossing {
    fn name(&self) -> &'static str {
        "Uniform"
    }

    fn recombine(&self, parent1: &Unit, parent2: &Unit, rng: &mut dyn RngCore) -> Vec<Unit> {
        positional_offspring(self, &self.factory, self.representation, parent1, parent2, rng)
    }
}

/// Alternate blocks of `grain_size` positions between the parents.
///
/// Block 0 of child 1 comes from parent 1, block 1 from parent 2 and so on.
/// Child 2 is the mirror image.
#[derive(Debug, Clone)]
pub struct GrainCrossing {
    factory: UnitFactory,
    representation: Representation,
    grain_size: usize,
}

impl GrainCrossing {
    pub fn new(factory: UnitFactory, representation: Representation, grain_size: usize) -> Self {
        Self {
            factory,
            representation,
            grain_size: grain_size.max(1),
        }
    }
}

impl Positional for GrainCrossing {
    fn exchange<T: Copy>(&self, a: &[T], b: &[T], _rng: &mut dyn RngCore) -> (Vec<T>, Vec<T>) {
        a.iter()
            .zip(b)
            .enumerate()
            .map(|(i, (&x, &y))| {
                if (i / self.grain_size) % 2 == 0 {
                    (x, y)
                } else {
                    (y, x)
                }
            })
            .unzip()
    }
}

impl Recombination for GrainCrossing {
    fn name(&self) -> &'static str {
        "Grain"
    }

    fn recombine(&self, parent1: &Unit, parent2: &Unit, rng: &mut dyn RngCore) -> Vec<Unit> {
        positional_offspring(self, &self.factory, self.representation, parent1, parent2, rng)
    }
}

/// `c1 = a*p1 + (1-a)*p2`, `c2 = (1-a)*p1 + a*p2`
#[derive(Debug, Clone)]
pub struct ArithmeticCrossing {
    factory: UnitFactory,
    alpha: f64,
}

impl ArithmeticCrossing {
    pub fn new(factory: UnitFactory, alpha: f64) -> Self {
        Self { factory, alpha }
    }
}

impl Recombination for ArithmeticCrossing {
    fn name(&self) -> &'static str {
        "Arithmetic"
    }

    fn recombine(&self, parent1: &Unit, parent2: &Unit, _rng: &mut dyn RngCore) -> Vec<Unit> {
        let alpha = self.alpha;
        let (child1, child2): (Vec<f64>, Vec<f64>) = parent1
            .real_values()
            .iter()
            .zip(parent2.real_values())
            .map(|(&x, &y)| {
                (
                    alpha * x + (1.0 - alpha) * y,
                    (1.0 - alpha) * x + alpha * y,
                )
            })
            .unzip();
        vec![
            self.factory.create_unit_with_real_values(child1),
            self.factory.create_unit_with_real_values(child2),
        ]
    }
}

/// Wright's heuristic: the midpoint plus two extrapolations
#[derive(Debug, Clone)]
pub struct LinearCrossing {
    factory: UnitFactory,
}

impl LinearCrossing {
    pub fn new(factory: UnitFactory) -> Self {
        Self { factory }
    }
}

impl Recombination for LinearCrossing {
    fn name(&self) -> &'static str {
        "Linear"
    }

    fn recombine(&self, parent1: &Unit, parent2: &Unit, _rng: &mut dyn RngCore) -> Vec<Unit> {
        let pairs: Vec<(f64, f64)> = parent1
            .real_values()
            .iter()
            .copied()
            .zip(parent2.real_values().iter().copied())
            .collect();

        let midpoint = pairs.iter().map(|&(x, y)| 0.5 * x + 0.5 * y).collect();
        let forward = pairs.iter().map(|&(x, y)| 1.5 * x - 0.5 * y).collect();
        let backward = pairs.iter().map(|&(x, y)| -0.5 * x + 1.5 * y).collect();

        vec![
            self.factory.create_unit_with_real_values(midpoint),
            self.factory.create_unit_with_real_values(forward),
            self.factory.create_unit_with_real_values(backward),
        ]
    }
}

/// Uniform draw from `[lo, hi]`, tolerating a collapsed interval
fn sample_interval(lo: f64, hi: f64, rng: &mut dyn RngCore) -> f64 {
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        lo
    }
}

/// BLX-alpha: each child gene is drawn from the parents' interval widened
/// by `alpha * d` on both sides
#[derive(Debug, Clone)]
pub struct AlphaBlendCrossing {
    factory: UnitFactory,
    alpha: f64,
}

impl AlphaBlendCrossing {
    pub fn new(factory: UnitFactory, alpha: f64) -> Self {
        Self { factory, alpha }
    }

    fn child(&self, parent1: &Unit, parent2: &Unit, rng: &mut dyn RngCore) -> Unit {
        let values = parent1
            .real_values()
            .iter()
            .zip(parent2.real_values())
            .map(|(&x, &y)| {
                let (lo, hi) = (x.min(y), x.max(y));
                let d = hi - lo;
                sample_interval(lo - self.alpha * d, hi + self.alpha * d, rng)
            })
            .collect();
        self.factory.create_unit_with_real_values(values)
    }
}

impl Recombination for AlphaBlendCrossing {
    fn name(&self) -> &'static str {
        "Alpha-blend"
    }

    fn recombine(&self, parent1: &Unit, parent2: &Unit, rng: &mut dyn RngCore) -> Vec<Unit> {
        vec![
            self.child(parent1, parent2, rng),
            self.child(parent1, parent2, rng),
        ]
    }
}

/// BLX-alpha-beta: each gene is drawn from
/// `[min(x, y) - alpha * d, max(x, y) + beta * d]`.
#[derive(Debug, Clone)]
pub struct AlphaBetaBlendCrossing {
    factory: UnitFactory,
    alpha: f64,
    beta: f64,
}

impl AlphaBetaBlendCrossing {
    pub fn new(factory: UnitFactory, alpha: f64, beta: f64) -> Self {
        Self {
            factory,
            alpha,
            beta,
        }
    }

    fn child(&self, parent1: &Unit, parent2: &Unit, rng: &mut dyn RngCore) -> Unit {
        let values = parent1
            .real_values()
            .iter()
            .zip(parent2.real_values())
            .map(|(&x, &y)| {
                let d = (x - y).abs();
                sample_interval(x.min(y) - self.alpha * d, x.max(y) + self.beta * d, rng)
            })
            .collect();
        self.factory.create_unit_with_real_values(values)
    }
}

impl Recombination for AlphaBetaBlendCrossing {
    fn name(&self) -> &'static str {
        "Alpha-beta-blend"
    }

    fn recombine(&self, parent1: &Unit, parent2: &Unit, rng: &mut dyn RngCore) -> Vec<Unit> {
        vec![
            self.child(parent1, parent2, rng),
            self.child(parent1, parent2, rng),
        ]
    }
}

/// Both children sit at the gene-wise midpoint
#[derive(Debug, Clone)]
pub struct MeanCrossing {
    factory: UnitFactory,
}

impl MeanCrossing {
    pub fn new(factory: UnitFactory) -> Self {
        Self { factory }
    }
}

impl Recombination for MeanCrossing {
    fn name(&self) -> &'static str {
        "Mean"
    }

    fn recombine(&self, parent1: &Unit, parent2: &Unit, _rng: &mut dyn RngCore) -> Vec<Unit> {
        let mean: Vec<f64> = parent1
            .real_values()
            .iter()
            .zip(parent2.real_values())
            .map(|(&x, &y)| (x + y) / 2.0)
            .collect();
        vec![
            self.factory.create_unit_with_real_values(mean.clone()),
            self.factory.create_unit_with_real_values(mean),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn factory() -> UnitFactory {
        UnitFactory::new(0.0, 10.0, 3).unwrap()
    }

    #[test]
    fn test_single_point_keeps_prefix_and_suffix() {
        let op = SinglePointCrossing::new(factory(), Representation::Real);
        let mut rng = StdRng::seed_from_u64(11);
        let a = [1, 1, 1, 1, 1];
        let b = [2, 2, 2, 2, 2];
        for _ in 0..20 {
            let (c1, c2) = op.exchange(&a, &b, &mut rng);
            let cut = c1.iter().position(|&v| v == 2).unwrap();
            assert!(cut >= 1 && cut < 5);
            assert!(c1[cut..].iter().all(|&v| v == 2));
            assert!(c2[..cut].iter().all(|&v| v == 2));
            assert!(c2[cut..].iter().all(|&v| v == 1));
        }
    }

    #[test]
    fn test_two_point_swaps_inner_segment() {
        let op = TwoPointCrossing::new(factory(), Representation::Real);
        let mut rng = StdRng::seed_from_u64(5);
        let a = [0u8; 8];
        let b = [1u8; 8];
        for _ in 0..20 {
            let (c1, c2) = op.exchange(&a, &b, &mut rng);
            assert_eq!(c1[0], 0);
            assert_eq!(c2[0], 1);
            assert!(c1.iter().any(|&v| v == 1));
            for i in 0..8 {
                assert_eq!(c1[i] + c2[i], 1);
            }
        }
    }

    #[test]
    fn test_grain_alternates_blocks() {
        let op = GrainCrossing::new(factory(), Representation::Binary, 2);
        let mut rng = StdRng::seed_from_u64(0);
        let (c1, c2) = op.exchange(&[0u8; 6], &[1u8; 6], &mut rng);
        assert_eq!(c1, vec![0, 0, 1, 1, 0, 0]);
        assert_eq!(c2, vec![1, 1, 0, 0, 1, 1]);
    }

    #[test]
    fn test_linear_produces_three_children() {
        let f = factory();
        let p1 = f.create_unit_with_real_values(vec![4.0]);
        let p2 = f.create_unit_with_real_values(vec![6.0]);
        let mut rng = StdRng::seed_from_u64(0);
        let children = LinearCrossing::new(f).recombine(&p1, &p2, &mut rng);
        let values: Vec<f64> = children.iter().map(|c| c.real_values()[0]).collect();
        assert_eq!(values, vec![5.0, 3.0, 7.0]);
    }

    #[test]
    fn test_blend_degenerates_on_equal_parents() {
        let f = factory();
        let p = f.create_unit_with_real_values(vec![2.5, 7.5]);
        let mut rng = StdRng::seed_from_u64(0);
        let children = AlphaBlendCrossing::new(f, 0.5).recombine(&p, &p, &mut rng);
        for child in children {
            assert_eq!(child.real_values(), p.real_values());
        }
    }

    #[test]
    fn test_arithmetic_weights_each_child() {
        let f = factory();
        let p1 = f.create_unit_with_real_values(vec![2.0, 4.0]);
        let p2 = f.create_unit_with_real_values(vec![6.0, 8.0]);
        let mut rng = StdRng::seed_from_u64(0);
        let children = ArithmeticCrossing::new(f, 0.25).recombine(&p1, &p2, &mut rng);
        assert_eq!(children[0].real_values(), &[5.0, 7.0]);
        assert_eq!(children[1].real_values(), &[3.0, 5.0]);
    }

    #[test]
    fn test_uniform_real_takes_each_gene_from_a_parent() {
        let f = factory();
        let p1 = f.create_unit_with_real_values(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let p2 = f.create_unit_with_real_values(vec![9.0, 8.0, 7.0, 6.5, 5.5, 0.5]);
        let op = UniformCrossing::new(f, Representation::Real);
        let mut rng = StdRng::seed_from_u64(21);
        let mut mixed = false;
        for _ in 0..50 {
            let children = op.recombine(&p1, &p2, &mut rng);
            assert_eq!(children.len(), 2);
            let (c1, c2) = (children[0].real_values(), children[1].real_values());
            for i in 0..6 {
                let (a, b) = (p1.real_values()[i], p2.real_values()[i]);
                assert!((c1[i] == a && c2[i] == b) || (c1[i] == b && c2[i] == a));
            }
            mixed |= c1 != p1.real_values() && c1 != p2.real_values();
        }
        assert!(mixed);
    }

    #[test]
    fn test_alpha_blend_stays_in_widened_interval() {
        let f = factory();
        let p1 = f.create_unit_with_real_values(vec![6.0, 4.5]);
        let p2 = f.create_unit_with_real_values(vec![4.0, 5.5]);
        let op = AlphaBlendCrossing::new(f, 0.5);
        let mut rng = StdRng::seed_from_u64(3);
        let (mut below, mut above) = (false, false);
        for _ in 0..200 {
            for child in op.recombine(&p1, &p2, &mut rng) {
                let v = child.real_values();
                assert!((3.0..=7.0).contains(&v[0]), "{}", v[0]);
                assert!((4.0..=6.0).contains(&v[1]), "{}", v[1]);
                below |= v[0] < 4.0;
                above |= v[0] > 6.0;
            }
        }
        assert!(below && above);
    }

    #[test]
    fn test_alpha_beta_blend_extends_low_by_alpha_and_high_by_beta() {
        let f = factory();
        // the larger gene comes from the first parent
        let p1 = f.create_unit_with_real_values(vec![8.0]);
        let p2 = f.create_unit_with_real_values(vec![2.0]);
        let mut rng = StdRng::seed_from_u64(4);

        let high_only = AlphaBetaBlendCrossing::new(f, 0.0, 0.5);
        let mut above_max = false;
        for _ in 0..200 {
            for child in high_only.recombine(&p1, &p2, &mut rng) {
                let v = child.real_values()[0];
                assert!((2.0..=10.0).contains(&v), "{}", v);
                above_max |= v > 8.0;
            }
        }
        assert!(above_max);

        let low_only = AlphaBetaBlendCrossing::new(f, 0.5, 0.0);
        let mut below_min = false;
        for _ in 0..200 {
            for child in low_only.recombine(&p1, &p2, &mut rng) {
                let v = child.real_values()[0];
                assert!((0.0..=8.0).contains(&v), "{}", v);
                below_min |= v < 2.0;
            }
        }
        assert!(below_min);
    }
}
