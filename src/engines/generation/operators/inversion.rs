use super::roll;
use crate::engines::generation::unit::{Unit, UnitFactory};
use crate::types::Representation;
use rand::{Rng, RngCore};

/// Segment reversal.
///
/// With probability `p` per call, picks `left < right` and reverses the
/// inclusive range: over the concatenated bits for the binary representation,
/// over the gene vector for the real one. Units with fewer than two positions
/// pass through unchanged.
#[derive(Debug, Clone)]
pub struct StandardInversion {
    probability: u32,
    factory: UnitFactory,
    representation: Representation,
}

impl StandardInversion {
    pub fn new(probability: u32, factory: UnitFactory, representation: Representation) -> Self {
        Self {
            probability,
            factory,
            representation,
        }
    }

    pub fn probability(&self) -> u32 {
        self.probability
    }

    pub fn invert(&self, unit: &Unit, rng: &mut dyn RngCore) -> Unit {
        if !roll(self.probability, rng) {
            return unit.clone();
        }

        match self.representation {
            Representation::Binary => {
                let mut bits = unit.flat_bits();
                if bits.len() < 2 {
                    return unit.clone();
                }
                reverse_random_segment(&mut bits, rng);
                self.factory.unit_from_flat_bits(&bits, &[unit])
            }
            Representation::Real => {
                let mut values = unit.real_values().to_vec();
                if values.len() < 2 {
                    return unit.clone();
                }
                reverse_random_segment(&mut values, rng);
                self.factory.create_unit_with_real_values(values)
            }
        }
    }
}

fn reverse_random_segment<T>(items: &mut [T], rng: &mut dyn RngCore) {
    let left = rng.gen_range(0..items.len() - 1);
    let right = rng.gen_range(left + 1..items.len());
    items[left..=right].reverse();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_reverse_random_segment_is_permutation() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..50 {
            let mut items: Vec<u32> = (0..10).collect();
            reverse_random_segment(&mut items, &mut rng);
            let mut sorted = items.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..10).collect::<Vec<_>>());
            assert_ne!(items, (0..10).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_single_gene_real_unit_is_untouched() {
        let factory = UnitFactory::new(0.0, 1.0, 2).unwrap();
        let unit = factory.create_unit_with_real_values(vec![0.3]).evaluated(1.0);
        let mut rng = StdRng::seed_from_u64(0);
        let op = StandardInversion::new(100, factory, Representation::Real);
        assert_eq!(op.invert(&unit, &mut rng), unit);
    }
}
