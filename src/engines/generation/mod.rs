pub mod selection;
pub mod operators;
pub mod evolution_engine;
pub mod progress;

pub use selection::{
    rank_population, score_population, select_best, select_best_scored, ScoredVariant,
};
pub use operators::{breed, mutate, within_bounds};
pub use evolution_engine::{
    EvolutionEngine, EvolutionOutcome, EvolutionPhase, GenerationStats, ProgressCallback,
};
pub use progress::{
    ChannelProgressCallback, ConsoleProgressCallback, ProgressMessage, SilentProgressCallback,
};
