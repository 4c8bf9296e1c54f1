use super::{
    evolution::EvolutionConfig, mating::MatingConfig, selection::SelectionConfig,
    traits::ConfigSection,
};
use crate::error::BitgenesError;
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Prefix for environment overrides, e.g. `BITGENES__EVOLUTION__PARALLELISM=8`.
pub const ENV_PREFIX: &str = "BITGENES";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub mating: MatingConfig,
    pub selection: SelectionConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), BitgenesError> {
        self.evolution.validate()?;
        self.mating.validate()?;
        self.selection.validate()?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), BitgenesError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| BitgenesError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| BitgenesError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        self.replace(config);
        Ok(())
    }

    /// The TOML file at `path` if given, then `BITGENES__*` environment
    /// variables. Anything neither sets keeps its default. Lists such as
    /// `mating.operators` are replaced whole, never merged with the defaults.
    pub fn load_layered<P: AsRef<Path>>(&self, path: Option<P>) -> Result<(), BitgenesError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path.as_ref()).format(FileFormat::Toml));
        }

        let config: AppConfig = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|layered| layered.try_deserialize())
            .map_err(layering_error)?;

        config.validate()?;
        self.replace(config);
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), BitgenesError> {
        let toml_str = toml::to_string_pretty(&self.get())
            .map_err(|e| BitgenesError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| BitgenesError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        match self.config.read() {
            Ok(config) => config.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Apply `f` and keep the result only if it still validates.
    pub fn update<F>(&self, f: F) -> Result<(), BitgenesError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut updated = self.get();
        f(&mut updated);
        updated.validate()?;
        self.replace(updated);
        Ok(())
    }

    fn replace(&self, config: AppConfig) {
        match self.config.write() {
            Ok(mut current) => *current = config,
            Err(poisoned) => *poisoned.into_inner() = config,
        }
    }
}

fn layering_error(e: ::config::ConfigError) -> BitgenesError {
    BitgenesError::Configuration(format!("Failed to load layered config: {}", e))
}
