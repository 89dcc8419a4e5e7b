//! Genetic operator families.
//!
//! Each family is a trait with one implementing type per variant. The
//! configuration layer resolves a variant once, before the run, and the
//! simulation only ever talks to the trait.
pub mod crossing;
pub mod elite;
pub mod inversion;
pub mod mutation;
pub mod selection;

pub use crossing::{
    AlphaBetaBlendCrossing, AlphaBlendCrossing, ArithmeticCrossing, Crossing, GrainCrossing,
    LinearCrossing, MeanCrossing, Recombination, SinglePointCrossing, TwoPointCrossing,
    UniformCrossing,
};
pub use elite::EliteStrategy;
pub use inversion::StandardInversion;
pub use mutation::{
    BoundaryMutation, GaussianMutation, MutationOperator, SinglePointMutation, TwoPointMutation,
    UniformMutation,
};
pub use selection::{BestSelection, RouletteWheelSelection, SelectionOperator, TournamentSelection};

use rand::{Rng, RngCore};

/// Bernoulli trial against a percentage in `[0, 100]`
pub(crate) fn roll(probability: u32, rng: &mut dyn RngCore) -> bool {
    probability > 0 && rng.gen::<f64>() < f64::from(probability) / 100.0
}
