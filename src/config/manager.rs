use super::{
    cost_function::CostFunctionConfig,
    crossing::CrossingConfig,
    elite::EliteConfig,
    general::GeneralConfig,
    inversion::InversionConfig,
    mutation::MutationConfig,
    selection::SelectionConfig,
    traits::ConfigSection,
};
use crate::error::{EvolabError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Prefix for environment overrides, e.g. `EVOLAB__GENERAL__EPOCHS_NO=50`
pub const ENV_PREFIX: &str = "EVOLAB";

/// Everything a simulation run needs, one section per concern
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub general: GeneralConfig,
    pub cost_function: CostFunctionConfig,
    pub selection: SelectionConfig,
    pub crossing: CrossingConfig,
    pub mutation: MutationConfig,
    pub inversion: InversionConfig,
    pub elite: EliteConfig,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        self.general.validate()?;
        self.cost_function.validate()?;
        self.selection.validate()?;
        self.crossing.validate()?;
        self.mutation.validate()?;
        self.inversion.validate()?;
        self.elite.validate()?;

        let population_size = self.general.population_size;
        let elite_count = self.elite.elite_count;
        if elite_count >= population_size {
            return Err(EvolabError::Configuration(format!(
                "Elite count ({}) must be smaller than the population size ({})",
                elite_count, population_size
            )));
        }

        let pool = self.mating_pool_size();
        if pool <= elite_count {
            return Err(EvolabError::Configuration(format!(
                "Mating pool of {} units leaves no parents after {} elites",
                pool, elite_count
            )));
        }
        Ok(())
    }

    /// Count handed to the selection operator each epoch
    pub fn selection_count(&self) -> usize {
        self.selection.selection_count(self.general.population_size)
    }

    /// Units actually selected each epoch
    pub fn mating_pool_size(&self) -> usize {
        self.selection.mating_pool_size(self.general.population_size)
    }
}

/// Shared, validated configuration backed by TOML/JSON files
pub struct ConfigManager {
    config: Arc<RwLock<SimulationConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_config(SimulationConfig::default())
    }

    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// Read a config file (format from its extension), apply `EVOLAB__*`
    /// environment overrides and validate the result
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<SimulationConfig> {
        let path = path.as_ref();
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| EvolabError::Configuration(format!("Failed to read config {}: {}", path.display(), e)))?;

        let config: SimulationConfig = settings
            .try_deserialize()
            .map_err(|e| EvolabError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config = Self::read_file(path)?;
        *self.config.write().unwrap_or_else(|e| e.into_inner()) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| EvolabError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| EvolabError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> SimulationConfig {
        self.config.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Apply `f` to a copy and commit it only if it validates
    pub fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut SimulationConfig),
    {
        let mut config = self.config.write().unwrap_or_else(|e| e.into_inner());
        let mut candidate = config.clone();
        f(&mut candidate);
        candidate.validate()?;
        *config = candidate;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
