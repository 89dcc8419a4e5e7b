//! Chromosome codec: bounded real numbers <-> fixed-length bit strings
//!
//! A real value `x` in `[lower, upper]` is normalized to `[0, 1]`, scaled to
//! the integer range `[0, 2^L - 1]` and written MSB first as `L` bits. The
//! width `L` is the smallest number of bits resolving the range to the
//! requested number of decimal places:
//!
//! ```text
//! L = ceil(log2((upper - lower) * 10^precision))
//! ```
//!
//! The round trip is lossy: `decode(encode(x))` lands within one
//! quantization step `(upper - lower) / (2^L - 1)` of `x`.
use crate::error::{EvolabError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Widest supported bit string. Beyond 52 bits the scaled integer no longer
/// fits the f64 mantissa and decoding stops being monotonic.
pub const MAX_BINARY_LENGTH: usize = 52;

/// Fixed-length bit string, most significant bit first
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct BitString(Vec<bool>);

impl BitString {
    pub fn new(bits: Vec<bool>) -> Self {
        Self(bits)
    }

    /// Big-endian `len`-bit rendering of `value`; higher bits are dropped
    pub fn from_u64(value: u64, len: usize) -> Self {
        let bits = (0..len)
            .rev()
            .map(|shift| shift < 64 && (value >> shift) & 1 == 1)
            .collect();
        Self(bits)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
            .iter()
            .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn flip(&mut self, index: usize) {
        self.0[index] = !self.0[index];
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for BitString {
    type Err = EvolabError;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(EvolabError::Codec(format!(
                    "invalid character '{}' in bit string \"{}\"",
                    other, s
                ))),
            })
            .collect::<Result<Vec<bool>>>()
            .map(BitString)
    }
}

impl From<BitString> for String {
    fn from(bits: BitString) -> Self {
        bits.to_string()
    }
}

impl TryFrom<String> for BitString {
    type Error = EvolabError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Minimum bit width that resolves `[lower, upper]` to `precision` decimals
pub fn binary_length(lower: f64, upper: f64, precision: u32) -> Result<usize> {
    if !lower.is_finite() || !upper.is_finite() {
        return Err(EvolabError::Configuration(format!(
            "bounds must be finite, got [{}, {}]",
            lower, upper
        )));
    }
    if upper <= lower {
        return Err(EvolabError::Configuration(format!(
            "upper bound {} must be greater than lower bound {}",
            upper, lower
        )));
    }

    let exponent = i32::try_from(precision).map_err(|_| {
        EvolabError::Configuration(format!("precision {} is out of range", precision))
    })?;
    let resolution = (upper - lower) * 10f64.powi(exponent);
    if !resolution.is_finite() {
        return Err(EvolabError::Configuration(format!(
            "precision {} overflows the representable range",
            precision
        )));
    }

    let length = resolution.log2().ceil().max(1.0) as usize;
    if length > MAX_BINARY_LENGTH {
        return Err(EvolabError::Configuration(format!(
            "range [{}, {}] at precision {} needs {} bits (max {})",
            lower, upper, precision, length, MAX_BINARY_LENGTH
        )));
    }

    Ok(length)
}

/// Largest integer representable on `binary_length` bits, as f64
fn max_level(binary_length: usize) -> f64 {
    ((1u64 << binary_length) - 1) as f64
}

/// Smallest real increment representable on `binary_length` bits
pub fn quantization_step(lower: f64, upper: f64, binary_length: usize) -> f64 {
    (upper - lower) / max_level(binary_length)
}

/// Encode a real value into a zero-padded bit string.
///
/// Values outside `[lower, upper]` saturate to the nearest end of the range.
pub fn encode(value: f64, lower: f64, upper: f64, binary_length: usize) -> BitString {
    let normalized = ((value - lower) / (upper - lower)).clamp(0.0, 1.0);
    let level = (normalized * max_level(binary_length)).round() as u64;
    BitString::from_u64(level, binary_length)
}

/// Decode a bit string back into `[lower, upper]`
pub fn decode(bits: &BitString, lower: f64, upper: f64, binary_length: usize) -> f64 {
    debug_assert_eq!(bits.len(), binary_length, "bit string width mismatch");
    let normalized = bits.to_u64() as f64 / max_level(binary_length);
    lower + normalized * (upper - lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_length_matches_precision() {
        // 10 * 10^6 = 1e7 -> log2 = 23.25 -> 24 bits
        assert_eq!(binary_length(0.0, 10.0, 6).unwrap(), 24);
        // Rastrigin range at 6 decimals
        assert_eq!(binary_length(-5.12, 5.12, 6).unwrap(), 24);
        assert_eq!(binary_length(0.0, 1.0, 1).unwrap(), 4);
    }

    #[test]
    fn test_binary_length_is_at_least_one_bit() {
        assert_eq!(binary_length(0.0, 0.5, 0).unwrap(), 1);
    }

    #[test]
    fn test_binary_length_rejects_bad_bounds() {
        assert!(binary_length(1.0, 1.0, 3).is_err());
        assert!(binary_length(2.0, 1.0, 3).is_err());
        assert!(binary_length(f64::NEG_INFINITY, 1.0, 3).is_err());
        assert!(binary_length(0.0, 1e6, 20).is_err());
    }

    #[test]
    fn test_binary_length_rejects_oversized_precision() {
        for precision in [400, 1 << 31, u32::MAX] {
            assert!(matches!(
                binary_length(0.0, 1.0, precision),
                Err(EvolabError::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_encode_extremes() {
        assert_eq!(encode(0.0, 0.0, 10.0, 4).to_string(), "0000");
        assert_eq!(encode(10.0, 0.0, 10.0, 4).to_string(), "1111");
        // saturates outside the range
        assert_eq!(encode(-3.0, 0.0, 10.0, 4).to_string(), "0000");
        assert_eq!(encode(42.0, 0.0, 10.0, 4).to_string(), "1111");
    }

    #[test]
    fn test_decode_known_values() {
        let bits: BitString = "0101".parse().unwrap();
        assert!((decode(&bits, 0.0, 15.0, 4) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_round_trip_within_one_step() {
        let (lower, upper) = (-32.768, 32.768);
        for precision in 1..=6 {
            let len = binary_length(lower, upper, precision).unwrap();
            let step = quantization_step(lower, upper, len);
            for i in 0..=100 {
                let x = lower + (upper - lower) * i as f64 / 100.0;
                let back = decode(&encode(x, lower, upper, len), lower, upper, len);
                assert!(
                    (back - x).abs() <= step,
                    "x={} back={} step={} precision={}",
                    x, back, step, precision
                );
            }
        }
    }

    #[test]
    fn test_bit_string_parse_and_display() {
        let bits: BitString = "100110".parse().unwrap();
        assert_eq!(bits.len(), 6);
        assert_eq!(bits.to_u64(), 0b100110);
        assert_eq!(bits.to_string(), "100110");
        assert!("10a1".parse::<BitString>().is_err());
    }

    #[test]
    fn test_bit_string_serde_as_text() {
        let bits = BitString::from_u64(5, 4);
        let json = serde_json::to_string(&bits).unwrap();
        assert_eq!(json, "\"0101\"");
        let back: BitString = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bits);
    }
}
