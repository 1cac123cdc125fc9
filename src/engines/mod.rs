pub mod sampling;
pub mod evaluation;
pub mod generation;
