pub mod chromosome;
pub mod unit;
pub mod operators;
pub mod simulation;

pub use chromosome::BitString;
pub use unit::{Unit, UnitFactory};
pub use simulation::{Simulation, SimulationReport, SimulationState};
