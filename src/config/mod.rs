pub mod traits;
pub mod general;
pub mod cost_function;
pub mod selection;
pub mod crossing;
pub mod mutation;
pub mod inversion;
pub mod elite;
pub mod manager;

pub use manager::{ConfigManager, SimulationConfig};
pub use general::GeneralConfig;
pub use cost_function::CostFunctionConfig;
pub use selection::{SelectionConfig, SelectionType};
pub use crossing::{CrossingConfig, CrossingType};
pub use mutation::{MutationConfig, MutationType};
pub use inversion::InversionConfig;
pub use elite::EliteConfig;
pub use traits::ConfigSection;
