pub mod results;

pub use results::{AdditionalInfo, ResultsSaver};
