pub mod sampler;
pub mod generators;

pub use sampler::RandomSampler;
pub use generators::{DesignGenerator, RandomDesignGenerator, RuleBasedDesignGenerator};
