use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<()>;
}

/// Rejects percentages above 100
pub(crate) fn check_probability(section: &str, field: &str, value: u32) -> Result<()> {
    if value > 100 {
        return Err(crate::error::EvolabError::Configuration(format!(
            "{}.{} must be between 0 and 100, got {}",
            section, field, value
        )));
    }
    Ok(())
}
