use super::traits::{check_range, ConfigManifest, ConfigSection, FieldManifest};
use crate::error::CpuGenError;
use serde::{Deserialize, Serialize};

/// Search-space bounds used to seed the population
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub clock_speed_range: (f64, f64),
    pub memory_size_range: (i64, i64),
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            clock_speed_range: (1.0, 3.0),
            memory_size_range: (2048, 65536),
        }
    }
}

impl ConfigSection for SamplingConfig {
    fn section_name() -> &'static str {
        "sampling"
    }

    fn validate(&self) -> Result<(), CpuGenError> {
        let (clock_min, clock_max) = self.clock_speed_range;
        if !clock_min.is_finite() || !clock_max.is_finite() {
            return Err(CpuGenError::Configuration(
                "Clock speed range must be finite".to_string(),
            ));
        }
        if clock_min <= 0.0 {
            return Err(CpuGenError::Configuration(
                "Clock speed must be positive".to_string(),
            ));
        }
        check_range("clock_speed_range", self.clock_speed_range)?;

        if self.memory_size_range.0 <= 0 {
            return Err(CpuGenError::Configuration(
                "Memory size must be positive".to_string(),
            ));
        }
        check_range("memory_size_range", self.memory_size_range)?;
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Sampling".to_string(),
            fields: vec![
                FieldManifest::new(
                    "clock_speed_range",
                    "range<float>",
                    serde_json::json!([1.0, 3.0]),
                    "Clock speed bounds in MHz",
                )
                .with_bounds(Some(0.0), None),
                FieldManifest::new(
                    "memory_size_range",
                    "range<integer>",
                    serde_json::json!([2048, 65536]),
                    "Memory size bounds in bytes",
                )
                .with_bounds(Some(1.0), None),
            ],
        }
    }
}

/// What happens when a mutation leaves the sampling bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundsPolicy {
    Clamp,     // pull offspring back into the sampling bounds
    Unbounded, // let values drift freely across generations
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    pub clock_factor_range: (f64, f64),
    pub memory_offset_range: (i64, i64),
    pub bounds_policy: BoundsPolicy,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            clock_factor_range: (0.9, 1.1),
            memory_offset_range: (-1024, 1024),
            bounds_policy: BoundsPolicy::Clamp,
        }
    }
}

impl ConfigSection for MutationConfig {
    fn section_name() -> &'static str {
        "mutation"
    }

    fn validate(&self) -> Result<(), CpuGenError> {
        let (factor_min, factor_max) = self.clock_factor_range;
        if !factor_min.is_finite() || !factor_max.is_finite() {
            return Err(CpuGenError::Configuration(
                "Clock factor range must be finite".to_string(),
            ));
        }
        if factor_min <= 0.0 {
            return Err(CpuGenError::Configuration(
                "Clock factor must be positive".to_string(),
            ));
        }
        check_range("clock_factor_range", self.clock_factor_range)?;
        check_range("memory_offset_range", self.memory_offset_range)?;
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Mutation".to_string(),
            fields: vec![
                FieldManifest::new(
                    "clock_factor_range",
                    "range<float>",
                    serde_json::json!([0.9, 1.1]),
                    "Multiplier applied to the parent's clock speed",
                )
                .with_bounds(Some(0.0), None),
                FieldManifest::new(
                    "memory_offset_range",
                    "range<integer>",
                    serde_json::json!([-1024, 1024]),
                    "Offset added to the parent's memory size",
                ),
                FieldManifest::new(
                    "bounds_policy",
                    "enum",
                    serde_json::json!("Clamp"),
                    "Clamp or Unbounded",
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SamplingConfig::default().validate().is_ok());
        assert!(MutationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_ranges_rejected() {
        let sampling = SamplingConfig {
            clock_speed_range: (3.0, 1.0),
            ..Default::default()
        };
        assert!(sampling.validate().is_err());

        let sampling = SamplingConfig {
            memory_size_range: (65536, 2048),
            ..Default::default()
        };
        assert!(sampling.validate().is_err());

        let mutation = MutationConfig {
            memory_offset_range: (10, -10),
            ..Default::default()
        };
        assert!(mutation.validate().is_err());
    }

    #[test]
    fn test_non_positive_sizes_rejected() {
        let sampling = SamplingConfig {
            memory_size_range: (0, 1024),
            ..Default::default()
        };
        assert!(sampling.validate().is_err());

        let mutation = MutationConfig {
            clock_factor_range: (0.0, 1.1),
            ..Default::default()
        };
        assert!(mutation.validate().is_err());
    }
}
