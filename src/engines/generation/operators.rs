use crate::config::{BoundsPolicy, MutationConfig, SamplingConfig};
use crate::engines::sampling::RandomSampler;
use crate::error::{CpuGenError, Result};
use crate::types::CpuVariant;

/// Mutation: scale the clock and shift the memory size of one parent
pub fn mutate(
    parent: &CpuVariant,
    mutation: &MutationConfig,
    bounds: &SamplingConfig,
    sampler: &mut RandomSampler,
) -> Result<CpuVariant> {
    let factor = sampler.sample_real_range(mutation.clock_factor_range)?;
    let offset = sampler.sample_int_range(mutation.memory_offset_range)?;

    let mut child = CpuVariant::new(
        parent.clock_speed * factor,
        parent.memory_size.saturating_add(offset),
    );

    match mutation.bounds_policy {
        BoundsPolicy::Clamp => {
            let (clock_min, clock_max) = bounds.clock_speed_range;
            let (mem_min, mem_max) = bounds.memory_size_range;
            child.clock_speed = child.clock_speed.max(clock_min).min(clock_max);
            child.memory_size = child.memory_size.max(mem_min).min(mem_max);
        }
        BoundsPolicy::Unbounded => {
            if !within_bounds(&child, bounds) {
                log::trace!("Offspring drifted outside sampling bounds: {}", child);
            }
        }
    }

    Ok(child)
}

pub fn within_bounds(variant: &CpuVariant, bounds: &SamplingConfig) -> bool {
    let (clock_min, clock_max) = bounds.clock_speed_range;
    let (mem_min, mem_max) = bounds.memory_size_range;
    (clock_min..=clock_max).contains(&variant.clock_speed)
        && (mem_min..=mem_max).contains(&variant.memory_size)
}

/// Breed `target_size` offspring, each a mutated copy of one elite
/// drawn uniformly with replacement.
pub fn breed(
    elites: &[CpuVariant],
    target_size: usize,
    mutation: &MutationConfig,
    bounds: &SamplingConfig,
    sampler: &mut RandomSampler,
) -> Result<Vec<CpuVariant>> {
    if elites.is_empty() {
        return Err(CpuGenError::Configuration(
            "Cannot breed from an empty elite set".to_string(),
        ));
    }

    (0..target_size)
        .map(|_| {
            let parent = &elites[sampler.choose_index(elites.len())?];
            mutate(parent, mutation, bounds, sampler)
        })
        .collect()
}
