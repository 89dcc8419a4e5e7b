pub mod generation;
pub mod metrics;
