pub mod fitness;

pub use fitness::{ConstantFitness, FitnessFunction, ThroughputFitness};
