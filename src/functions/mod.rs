pub mod benchmarks;
pub mod registry;
pub mod traits;

pub use benchmarks::{Ackley, Rastrigin, Rosenbrock, Sphere};
pub use registry::CostFunction;
pub use traits::{FnObjective, Objective};
