use super::sampler::RandomSampler;
use crate::config::{RandomDesignRules, RuleBasedDesignRules};
use crate::error::{CpuGenError, Result};
use crate::types::{CpuDesign, MemoryMap, Opcode};

/// Common interface of the one-shot design generators
pub trait DesignGenerator {
    fn name(&self) -> &'static str;
    fn generate(&self, sampler: &mut RandomSampler) -> Result<CpuDesign>;
}

/// Unconstrained designs: any opcode subset, memory from a fixed catalog
pub struct RandomDesignGenerator {
    rules: RandomDesignRules,
}

impl RandomDesignGenerator {
    pub fn new(rules: RandomDesignRules) -> Result<Self> {
        rules.validate()?;
        Ok(Self { rules })
    }
}

impl DesignGenerator for RandomDesignGenerator {
    fn name(&self) -> &'static str {
        "random"
    }

    fn generate(&self, sampler: &mut RandomSampler) -> Result<CpuDesign> {
        let clock_speed = sampler.sample_real_range(self.rules.clock_speed_range)?;

        let (min_count, max_count) = self.rules.opcode_count_range;
        let count = sampler.sample_uniform_int(min_count as i64, max_count as i64)? as usize;
        let opcodes = sampler.sample_subset(&Opcode::ALL, count)?;

        let idx = sampler.choose_index(self.rules.memory_sizes.len())?;
        let memory_size = self.rules.memory_sizes[idx];

        let ram = sampler.sample_uniform_int(self.rules.min_ram, memory_size / 2)?;
        let memory_map = MemoryMap::split(memory_size, ram)?;

        Ok(CpuDesign {
            clock_speed,
            opcodes,
            memory_size,
            memory_map,
        })
    }
}

/// Designs that always carry LDA/STA and keep RAM below half of memory
pub struct RuleBasedDesignGenerator {
    rules: RuleBasedDesignRules,
}

impl RuleBasedDesignGenerator {
    pub fn new(rules: RuleBasedDesignRules) -> Result<Self> {
        rules.validate()?;
        Ok(Self { rules })
    }

    fn generate_opcodes(&self, sampler: &mut RandomSampler) -> Result<Vec<Opcode>> {
        let mut opcodes = RuleBasedDesignRules::REQUIRED.to_vec();

        let optional: Vec<Opcode> = Opcode::ALL
            .iter()
            .copied()
            .filter(|op| !opcodes.contains(op))
            .collect();
        let (min_extra, max_extra) = self.rules.extra_opcode_range;
        let extra = sampler.sample_uniform_int(min_extra as i64, max_extra as i64)? as usize;

        opcodes.extend(sampler.sample_subset(&optional, extra)?);
        Ok(opcodes)
    }

    fn generate_memory_map(
        &self,
        sampler: &mut RandomSampler,
        memory_size: i64,
    ) -> Result<MemoryMap> {
        // RAM < memory_size / 2
        let max_ram = memory_size / 2 - 1;
        if max_ram < self.rules.min_ram {
            return Err(CpuGenError::Configuration(format!(
                "Memory size {} leaves no room for {} bytes of RAM",
                memory_size, self.rules.min_ram
            )));
        }
        let ram = sampler.sample_uniform_int(self.rules.min_ram, max_ram)?;
        MemoryMap::split(memory_size, ram)
    }
}

impl DesignGenerator for RuleBasedDesignGenerator {
    fn name(&self) -> &'static str {
        "rule-based"
    }

    fn generate(&self, sampler: &mut RandomSampler) -> Result<CpuDesign> {
        let clock_speed = sampler.sample_real_range(self.rules.clock_speed_range)?;
        let opcodes = self.generate_opcodes(sampler)?;
        let memory_size = sampler.sample_int_range(self.rules.memory_size_range)?;
        let memory_map = self.generate_memory_map(sampler, memory_size)?;

        Ok(CpuDesign {
            clock_speed,
            opcodes,
            memory_size,
            memory_map,
        })
    }
}
