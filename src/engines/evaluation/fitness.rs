use crate::types::CpuVariant;

/// Scores a variant; higher is better.
///
/// Implementations must be pure: the same variant always yields the same
/// score, and scoring never mutates shared state. That is what allows
/// populations to be scored on the rayon pool.
pub trait FitnessFunction: Send + Sync {
    fn evaluate(&self, variant: &CpuVariant) -> f64;

    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> FitnessFunction for F
where
    F: Fn(&CpuVariant) -> f64 + Send + Sync,
{
    fn evaluate(&self, variant: &CpuVariant) -> f64 {
        self(variant)
    }
}

/// Placeholder policy: clock speed times memory size.
///
/// Monotone in both fields, so searches drift toward the largest specs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThroughputFitness;

impl FitnessFunction for ThroughputFitness {
    fn evaluate(&self, variant: &CpuVariant) -> f64 {
        variant.clock_speed * variant.memory_size as f64
    }

    fn name(&self) -> &str {
        "throughput"
    }
}

/// Scores every variant the same
#[derive(Debug, Clone, Copy)]
pub struct ConstantFitness(pub f64);

impl FitnessFunction for ConstantFitness {
    fn evaluate(&self, _variant: &CpuVariant) -> f64 {
        self.0
    }

    fn name(&self) -> &str {
        "constant"
    }
}
