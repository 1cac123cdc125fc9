//! Procedural generation of CPU hardware variants.
//!
//! Variants are drawn at random, built from design rules, or evolved with a
//! select-and-mutate genetic search against a pluggable fitness function.

pub mod config;
pub mod engines;
pub mod error;
pub mod types;

pub use crate::config::{AppConfig, ConfigManager};
pub use crate::engines::evaluation::{ConstantFitness, FitnessFunction, ThroughputFitness};
pub use crate::engines::generation::{EvolutionEngine, EvolutionOutcome};
pub use crate::engines::sampling::RandomSampler;
pub use crate::error::{CpuGenError, Result};
pub use crate::types::{CpuDesign, CpuVariant, MemoryMap, Opcode};
