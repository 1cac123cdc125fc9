use super::traits::{check_range, ConfigManifest, ConfigSection, FieldManifest};
use crate::error::CpuGenError;
use serde::{Deserialize, Serialize};

/// Settings for the two one-shot design generators
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub random: RandomDesignRules,
    pub rule_based: RuleBasedDesignRules,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            random: RandomDesignRules::default(),
            rule_based: RuleBasedDesignRules::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomDesignRules {
    pub clock_speed_range: (f64, f64),
    pub opcode_count_range: (usize, usize),
    pub memory_sizes: Vec<i64>,
    pub min_ram: i64,
}

impl Default for RandomDesignRules {
    fn default() -> Self {
        Self {
            clock_speed_range: (1.0, 3.0),
            opcode_count_range: (3, 5),
            memory_sizes: vec![2048, 4096, 8192, 16384, 32768, 65536],
            min_ram: 512,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleBasedDesignRules {
    pub clock_speed_range: (f64, f64),
    pub extra_opcode_range: (usize, usize),
    pub memory_size_range: (i64, i64),
    pub min_ram: i64,
}

impl Default for RuleBasedDesignRules {
    fn default() -> Self {
        Self {
            clock_speed_range: (1.5, 2.5),
            extra_opcode_range: (1, 3),
            memory_size_range: (8192, 65536),
            min_ram: 512,
        }
    }
}

fn check_clock(field: &str, range: (f64, f64)) -> Result<(), CpuGenError> {
    if !range.0.is_finite() || !range.1.is_finite() || range.0 <= 0.0 {
        return Err(CpuGenError::Configuration(format!(
            "{} must be finite and positive",
            field
        )));
    }
    check_range(field, range)
}

impl RandomDesignRules {
    pub fn validate(&self) -> Result<(), CpuGenError> {
        check_clock("random.clock_speed_range", self.clock_speed_range)?;
        check_range("random.opcode_count_range", self.opcode_count_range)?;
        if self.opcode_count_range.1 > crate::types::Opcode::ALL.len() {
            return Err(CpuGenError::Configuration(format!(
                "Cannot pick more than {} distinct opcodes",
                crate::types::Opcode::ALL.len()
            )));
        }
        if self.min_ram < 0 {
            return Err(CpuGenError::Configuration(
                "Minimum RAM cannot be negative".to_string(),
            ));
        }
        let smallest = self.memory_sizes.iter().min().ok_or_else(|| {
            CpuGenError::Configuration("Memory size catalog cannot be empty".to_string())
        })?;
        if self.min_ram > smallest / 2 {
            return Err(CpuGenError::Configuration(format!(
                "Minimum RAM {} exceeds half of the smallest memory size {}",
                self.min_ram, smallest
            )));
        }
        Ok(())
    }
}

impl RuleBasedDesignRules {
    /// Opcodes every rule-based design starts with
    pub const REQUIRED: [crate::types::Opcode; 2] =
        [crate::types::Opcode::Lda, crate::types::Opcode::Sta];

    pub fn validate(&self) -> Result<(), CpuGenError> {
        check_clock("rule_based.clock_speed_range", self.clock_speed_range)?;
        check_range("rule_based.extra_opcode_range", self.extra_opcode_range)?;
        let optional = crate::types::Opcode::ALL.len() - Self::REQUIRED.len();
        if self.extra_opcode_range.1 > optional {
            return Err(CpuGenError::Configuration(format!(
                "Cannot add more than {} extra opcodes",
                optional
            )));
        }
        check_range("rule_based.memory_size_range", self.memory_size_range)?;
        if self.min_ram < 0 {
            return Err(CpuGenError::Configuration(
                "Minimum RAM cannot be negative".to_string(),
            ));
        }
        // RAM must stay strictly below half of the smallest memory size
        if self.min_ram >= self.memory_size_range.0 / 2 {
            return Err(CpuGenError::Configuration(format!(
                "Minimum RAM {} must be below half of the smallest memory size {}",
                self.min_ram, self.memory_size_range.0
            )));
        }
        Ok(())
    }
}

impl ConfigSection for RulesConfig {
    fn section_name() -> &'static str {
        "rules"
    }

    fn validate(&self) -> Result<(), CpuGenError> {
        self.random.validate()?;
        self.rule_based.validate()?;
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Rules".to_string(),
            fields: vec![
                FieldManifest::new(
                    "random.clock_speed_range",
                    "range<float>",
                    serde_json::json!([1.0, 3.0]),
                    "Clock speed bounds for random designs",
                ),
                FieldManifest::new(
                    "random.opcode_count_range",
                    "range<integer>",
                    serde_json::json!([3, 5]),
                    "How many distinct opcodes a random design carries",
                )
                .with_bounds(Some(0.0), Some(5.0)),
                FieldManifest::new(
                    "random.memory_sizes",
                    "list<integer>",
                    serde_json::json!([2048, 4096, 8192, 16384, 32768, 65536]),
                    "Catalog of memory sizes for random designs",
                ),
                FieldManifest::new(
                    "random.min_ram",
                    "integer",
                    serde_json::json!(512),
                    "Smallest RAM region in bytes",
                )
                .with_bounds(Some(0.0), None),
                FieldManifest::new(
                    "rule_based.clock_speed_range",
                    "range<float>",
                    serde_json::json!([1.5, 2.5]),
                    "Clock speed bounds for rule-based designs",
                ),
                FieldManifest::new(
                    "rule_based.extra_opcode_range",
                    "range<integer>",
                    serde_json::json!([1, 3]),
                    "Opcodes added after LDA and STA",
                )
                .with_bounds(Some(0.0), Some(3.0)),
                FieldManifest::new(
                    "rule_based.memory_size_range",
                    "range<integer>",
                    serde_json::json!([8192, 65536]),
                    "Memory size bounds for rule-based designs",
                ),
                FieldManifest::new(
                    "rule_based.min_ram",
                    "integer",
                    serde_json::json!(512),
                    "Smallest RAM region in bytes",
                )
                .with_bounds(Some(0.0), None),
            ],
        }
    }
}
