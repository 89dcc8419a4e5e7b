pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod functions;
pub mod types;

pub use error::{EvolabError, Result};
pub use types::{OptimizationDirection, Representation};
