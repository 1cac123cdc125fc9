use super::traits::{ConfigSection, ConfigManifest, FieldManifest};
use crate::error::CpuGenError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    pub num_best: usize,
    pub seed: Option<u64>,
    pub parallel_evaluation: bool,
    pub seeding: SeedingMode,
}

/// How generation 0 is populated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedingMode {
    Uniform,   // independent draws from the sampling ranges
    RuleBased, // rule-constrained designs projected onto variants
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            generations: 5,
            num_best: 3,
            seed: None,
            parallel_evaluation: false,
            seeding: SeedingMode::Uniform,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), CpuGenError> {
        if self.population_size == 0 {
            return Err(CpuGenError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        if self.num_best == 0 {
            return Err(CpuGenError::Configuration(
                "Number of elites must be at least 1".to_string(),
            ));
        }
        if self.num_best > self.population_size {
            return Err(CpuGenError::Configuration(format!(
                "Number of elites ({}) cannot exceed population size ({})",
                self.num_best, self.population_size
            )));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Evolution".to_string(),
            fields: vec![
                FieldManifest::new(
                    "population_size",
                    "integer",
                    serde_json::json!(10),
                    "Number of variants in every generation",
                )
                .with_bounds(Some(1.0), None),
                FieldManifest::new(
                    "generations",
                    "integer",
                    serde_json::json!(5),
                    "Number of select/breed cycles to run",
                )
                .with_bounds(Some(0.0), None),
                FieldManifest::new(
                    "num_best",
                    "integer",
                    serde_json::json!(3),
                    "Elites kept as parents each generation",
                )
                .with_bounds(Some(1.0), Some(self.population_size as f64)),
                FieldManifest::new(
                    "seed",
                    "integer",
                    serde_json::Value::Null,
                    "Random seed; OS entropy when unset",
                ),
                FieldManifest::new(
                    "parallel_evaluation",
                    "boolean",
                    serde_json::json!(false),
                    "Score variants on the rayon thread pool",
                ),
                FieldManifest::new(
                    "seeding",
                    "enum",
                    serde_json::json!("Uniform"),
                    "Initial population source: Uniform or RuleBased",
                ),
            ],
        }
    }
}
