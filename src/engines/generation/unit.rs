use crate::engines::generation::chromosome::{self, BitString};
use crate::error::{EvolabError, Result};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// One candidate solution held in both representations.
///
/// `binary_values[i]` always encodes `real_values[i]` under the bounds and
/// precision of the [`UnitFactory`] that built the unit. There is no public
/// constructor taking both vectors, so they cannot drift apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unit {
    real_values: Vec<f64>,
    binary_values: Vec<BitString>,
    cost: Option<f64>,
}

impl Unit {
    pub fn real_values(&self) -> &[f64] {
        &self.real_values
    }

    pub fn binary_values(&self) -> &[BitString] {
        &self.binary_values
    }

    /// Cached objective value; `None` until the unit has been evaluated
    pub fn cost(&self) -> Option<f64> {
        self.cost
    }

    pub fn dimensions(&self) -> usize {
        self.real_values.len()
    }

    /// All genes' bits concatenated in dimension order
    pub fn flat_bits(&self) -> Vec<bool> {
        self.binary_values
            .iter()
            .flat_map(|bits| bits.bits().iter().copied())
            .collect()
    }

    /// Same unit carrying the given cost
    pub fn evaluated(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    pub(crate) fn assign_cost(&mut self, cost: f64) {
        self.cost = Some(cost);
    }
}

/// Codec holder and the only legal constructor of [`Unit`]s
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitFactory {
    lower_bound: f64,
    upper_bound: f64,
    precision: u32,
    binary_length: usize,
}

impl UnitFactory {
    pub fn new(lower_bound: f64, upper_bound: f64, precision: u32) -> Result<Self> {
        let binary_length = chromosome::binary_length(lower_bound, upper_bound, precision)?;
        Ok(Self {
            lower_bound,
            upper_bound,
            precision,
            binary_length,
        })
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Bits per gene
    pub fn binary_length(&self) -> usize {
        self.binary_length
    }

    pub fn quantization_step(&self) -> f64 {
        chromosome::quantization_step(self.lower_bound, self.upper_bound, self.binary_length)
    }

    pub fn encode(&self, value: f64) -> BitString {
        chromosome::encode(value, self.lower_bound, self.upper_bound, self.binary_length)
    }

    pub fn decode(&self, bits: &BitString) -> f64 {
        chromosome::decode(bits, self.lower_bound, self.upper_bound, self.binary_length)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.lower_bound, self.upper_bound)
    }

    /// Uniform draw inside the bounds
    pub fn sample_gene(&self, rng: &mut dyn RngCore) -> f64 {
        rng.gen_range(self.lower_bound..=self.upper_bound)
    }

    /// Build a unit from real values, deriving the binary form.
    ///
    /// Values outside the bounds are clamped first.
    pub fn create_unit_with_real_values(&self, real_values: Vec<f64>) -> Unit {
        let real_values: Vec<f64> = real_values.into_iter().map(|v| self.clamp(v)).collect();
        let binary_values = real_values.iter().map(|&v| self.encode(v)).collect();
        Unit {
            real_values,
            binary_values,
            cost: None,
        }
    }

    /// Build a unit from one bit string per gene, deriving the real form
    pub fn create_unit_with_binary_values(&self, binary_values: Vec<BitString>) -> Result<Unit> {
        if let Some(bad) = binary_values
            .iter()
            .find(|bits| bits.len() != self.binary_length)
        {
            return Err(EvolabError::Codec(format!(
                "gene \"{}\" has {} bits, expected {}",
                bad,
                bad.len(),
                self.binary_length
            )));
        }
        Ok(self.unit_from_genes(binary_values, &[]))
    }

    /// Build a unit from a concatenated chromosome
    pub fn create_unit_with_flat_bits(&self, bits: &[bool]) -> Result<Unit> {
        if bits.is_empty() || bits.len() % self.binary_length != 0 {
            return Err(EvolabError::Codec(format!(
                "chromosome of {} bits is not a multiple of the gene width {}",
                bits.len(),
                self.binary_length
            )));
        }
        Ok(self.unit_from_flat_bits(bits, &[]))
    }

    pub fn create_random_unit(&self, dimensions: usize, rng: &mut dyn RngCore) -> Unit {
        let values = (0..dimensions).map(|_| self.sample_gene(rng)).collect();
        self.create_unit_with_real_values(values)
    }

    /// Operators only ever hand over chromosomes recombined from parents of
    /// this factory, so the width is a multiple of `binary_length`.
    ///
    /// A gene whose bits match the same gene of one of `sources` takes that
    /// source's real value, so untouched genes skip the lossy decode.
    pub(crate) fn unit_from_flat_bits(&self, bits: &[bool], sources: &[&Unit]) -> Unit {
        debug_assert_eq!(bits.len() % self.binary_length, 0);
        let genes = bits
            .chunks_exact(self.binary_length)
            .map(|chunk| BitString::new(chunk.to_vec()))
            .collect();
        self.unit_from_genes(genes, sources)
    }

    pub(crate) fn unit_from_genes(&self, binary_values: Vec<BitString>, sources: &[&Unit]) -> Unit {
        let real_values = binary_values
            .iter()
            .enumerate()
            .map(|(i, bits)| {
                sources
                    .iter()
                    .find(|source| source.binary_values.get(i) == Some(bits))
                    .map(|source| source.real_values[i])
                    .unwrap_or_else(|| self.decode(bits))
            })
            .collect();
        Unit {
            real_values,
            binary_values,
            cost: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_factory_derives_binary_length() {
        let factory = UnitFactory::new(-5.12, 5.12, 6).unwrap();
        assert_eq!(factory.binary_length(), 24);
        assert!(UnitFactory::new(1.0, -1.0, 6).is_err());
    }

    #[test]
    fn test_real_values_are_encoded() {
        let factory = UnitFactory::new(0.0, 10.0, 3).unwrap();
        let unit = factory.create_unit_with_real_values(vec![0.0, 2.5, 10.0]);
        assert_eq!(unit.dimensions(), 3);
        assert_eq!(unit.binary_values().len(), 3);
        assert!(unit.cost().is_none());
        for (real, bits) in unit.real_values().iter().zip(unit.binary_values()) {
            assert!((factory.decode(bits) - real).abs() <= factory.quantization_step());
        }
    }

    #[test]
    fn test_out_of_bounds_values_are_clamped() {
        let factory = UnitFactory::new(0.0, 10.0, 3).unwrap();
        let unit = factory.create_unit_with_real_values(vec![-1.0, 11.0]);
        assert_eq!(unit.real_values(), &[0.0, 10.0]);
    }

    #[test]
    fn test_binary_values_are_decoded() {
        let factory = UnitFactory::new(0.0, 15.0, 0).unwrap();
        assert_eq!(factory.binary_length(), 4);
        let unit = factory
            .create_unit_with_binary_values(vec!["0000".parse().unwrap(), "1111".parse().unwrap()])
            .unwrap();
        assert_eq!(unit.real_values(), &[0.0, 15.0]);
        assert_eq!(unit.flat_bits().len(), 8);
    }

    #[test]
    fn test_binary_width_mismatch_is_rejected() {
        let factory = UnitFactory::new(0.0, 15.0, 0).unwrap();
        assert!(factory
            .create_unit_with_binary_values(vec!["010".parse().unwrap()])
            .is_err());
        assert!(factory.create_unit_with_flat_bits(&[true; 6]).is_err());
        assert!(factory.create_unit_with_flat_bits(&[true; 8]).is_ok());
    }

    #[test]
    fn test_random_unit_within_bounds() {
        let factory = UnitFactory::new(-2.0, 3.0, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let unit = factory.create_random_unit(5, &mut rng);
            assert!(unit.real_values().iter().all(|&v| (-2.0..=3.0).contains(&v)));
        }
    }

    #[test]
    fn test_unchanged_genes_keep_source_reals() {
        let factory = UnitFactory::new(-5.12, 5.12, 6).unwrap();
        let source = factory.create_unit_with_real_values(vec![1.234_567_89, -2.5]);
        let mut bits = source.flat_bits();
        let last = bits.len() - 1;
        bits[last] = !bits[last];

        let child = factory.unit_from_flat_bits(&bits, &[&source]);
        assert_eq!(child.real_values()[0], 1.234_567_89);
        assert_ne!(child.binary_values()[1], source.binary_values()[1]);
        assert!((child.real_values()[1] - -2.5).abs() <= 2.0 * factory.quantization_step());
    }

    #[test]
    fn test_evaluated_sets_cost() {
        let factory = UnitFactory::new(0.0, 1.0, 2).unwrap();
        let unit = factory.create_unit_with_real_values(vec![0.5]).evaluated(3.5);
        assert_eq!(unit.cost(), Some(3.5));
    }
}
