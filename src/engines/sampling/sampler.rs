use crate::config::SamplingConfig;
use crate::error::{CpuGenError, Result};
use crate::types::CpuVariant;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform variates shared by seeding and mutation.
///
/// One sampler owns one `StdRng` for a whole run. Seed it explicitly for
/// reproducible runs; otherwise it draws its seed from OS entropy.
pub struct RandomSampler {
    rng: StdRng,
}

impl RandomSampler {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    pub fn from_rng(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Uniform draw from the inclusive range `[min, max]`.
    pub fn sample_uniform_real(&mut self, min: f64, max: f64) -> Result<f64> {
        // The width must also be finite for rand's uniform sampler
        if !min.is_finite() || !max.is_finite() || min > max || !(max - min).is_finite() {
            return Err(CpuGenError::sampling_range(min, max));
        }
        Ok(self.rng.gen_range(min..=max))
    }

    /// Uniform draw from the inclusive range `[min, max]`.
    pub fn sample_uniform_int(&mut self, min: i64, max: i64) -> Result<i64> {
        if min > max {
            return Err(CpuGenError::sampling_range(min, max));
        }
        Ok(self.rng.gen_range(min..=max))
    }

    pub fn sample_real_range(&mut self, range: (f64, f64)) -> Result<f64> {
        self.sample_uniform_real(range.0, range.1)
    }

    pub fn sample_int_range(&mut self, range: (i64, i64)) -> Result<i64> {
        self.sample_uniform_int(range.0, range.1)
    }

    /// Uniform index into a slice of length `len`.
    pub fn choose_index(&mut self, len: usize) -> Result<usize> {
        if len == 0 {
            return Err(CpuGenError::sampling_range(0, -1));
        }
        Ok(self.rng.gen_range(0..len))
    }

    /// Pick `count` distinct items, keeping their relative order in `items`.
    pub fn sample_subset<T: Clone>(&mut self, items: &[T], count: usize) -> Result<Vec<T>> {
        if count > items.len() {
            return Err(CpuGenError::sampling_range(count, items.len()));
        }
        let mut indices = rand::seq::index::sample(&mut self.rng, items.len(), count).into_vec();
        indices.sort_unstable();
        Ok(indices.into_iter().map(|i| items[i].clone()).collect())
    }

    /// Draw every field independently from the configured ranges.
    pub fn generate_variant(&mut self, config: &SamplingConfig) -> Result<CpuVariant> {
        let clock_speed = self.sample_real_range(config.clock_speed_range)?;
        let memory_size = self.sample_int_range(config.memory_size_range)?;
        Ok(CpuVariant::new(clock_speed, memory_size))
    }
}
