use super::{
    evolution::EvolutionConfig,
    rules::RulesConfig,
    sampling::{MutationConfig, SamplingConfig},
    traits::{ConfigManifest, ConfigSection},
};
use crate::error::CpuGenError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Prefix for environment overrides, e.g. `CPUGEN__EVOLUTION__GENERATIONS=20`
pub const ENV_PREFIX: &str = "CPUGEN";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub sampling: SamplingConfig,
    pub mutation: MutationConfig,
    pub rules: RulesConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), CpuGenError> {
        self.evolution.validate()?;
        self.sampling.validate()?;
        self.mutation.validate()?;
        self.rules.validate()?;
        Ok(())
    }

    pub fn manifests(&self) -> Vec<ConfigManifest> {
        vec![
            self.evolution.to_manifest(),
            self.sampling.to_manifest(),
            self.mutation.to_manifest(),
            self.rules.to_manifest(),
        ]
    }
}

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

    /// Layer defaults, a TOML file, then `CPUGEN__*` environment variables.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CpuGenError> {
        let config = Self::resolve(Some(path.as_ref()))?;
        self.replace(config)
    }

    /// Layer `CPUGEN__*` environment variables over the defaults.
    pub fn load_from_env(&self) -> Result<(), CpuGenError> {
        let config = Self::resolve(None)?;
        self.replace(config)
    }

    /// Build the layered configuration without validating it.
    ///
    /// Callers that apply further overrides (e.g. command-line flags) must
    /// validate the final result themselves.
    pub fn resolve(path: Option<&Path>) -> Result<AppConfig, CpuGenError> {
        let file = match path {
            Some(path) if !path.exists() => {
                return Err(CpuGenError::Configuration(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => Some(config::File::from(path).format(config::FileFormat::Toml)),
            None => None,
        };
        Self::build(file)
    }

    fn build(
        file: Option<config::File<config::FileSourceFile, config::FileFormat>>,
    ) -> Result<AppConfig, CpuGenError> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?);
        if let Some(file) = file {
            builder = builder.add_source(file);
        }
        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    fn replace(&self, config: AppConfig) -> Result<(), CpuGenError> {
        config.validate()?;
        log::debug!("Loaded configuration: {:?}", config);
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CpuGenError> {
        let toml_str = self.to_toml()?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, CpuGenError> {
        let config = self.get();
        Ok(toml::to_string_pretty(&config)?)
    }

    pub fn get(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply `f` and keep the result only if it still validates.
    pub fn update<F>(&self, f: F) -> Result<(), CpuGenError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.get();
        f(&mut candidate);
        candidate.validate()?;
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = candidate;
        Ok(())
    }
}
