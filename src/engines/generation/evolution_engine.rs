use crate::config::{AppConfig, SeedingMode};
use crate::engines::evaluation::FitnessFunction;
use crate::engines::generation::{
    operators::breed,
    selection::{rank_population, select_best_scored, ScoredVariant},
};
use crate::engines::sampling::{DesignGenerator, RandomSampler, RuleBasedDesignGenerator};
use crate::error::{CpuGenError, Result};
use crate::types::CpuVariant;
use serde::{Deserialize, Serialize};

/// Where the engine is in its seed -> (evaluate -> select -> breed) x G cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvolutionPhase {
    Created,
    Seeded,
    Evaluating,
    Selecting,
    Breeding,
    Terminal,
}

/// Summary of one generation, taken before its population is replaced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub best: CpuVariant,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    pub elites: Vec<ScoredVariant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionOutcome {
    pub best: CpuVariant,
    pub best_fitness: f64,
    pub generations: usize,
    pub history: Vec<GenerationStats>,
    pub final_population: Vec<CpuVariant>,
}

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, stats: &GenerationStats);
}

pub struct EvolutionEngine {
    config: AppConfig,
    fitness: Box<dyn FitnessFunction>,
    sampler: RandomSampler,
    population: Vec<CpuVariant>,
    phase: EvolutionPhase,
}

impl EvolutionEngine {
    /// Validates `config` before anything runs.
    pub fn new<F>(config: AppConfig, fitness: F) -> Result<Self>
    where
        F: FitnessFunction + 'static,
    {
        config.validate()?;

        let sampler = RandomSampler::new(config.evolution.seed);

        Ok(Self {
            config,
            fitness: Box::new(fitness),
            sampler,
            population: Vec::new(),
            phase: EvolutionPhase::Created,
        })
    }

    /// Replace the random source, e.g. with a fixed-seed sampler in tests.
    pub fn with_sampler(mut self, sampler: RandomSampler) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn phase(&self) -> EvolutionPhase {
        self.phase
    }

    pub fn population(&self) -> &[CpuVariant] {
        &self.population
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the evolution process
    pub fn run<C: ProgressCallback>(&mut self, mut callback: C) -> Result<EvolutionOutcome> {
        let generations = self.config.evolution.generations;
        log::info!(
            "Starting evolution: population={}, generations={}, elites={}, fitness={}",
            self.config.evolution.population_size,
            generations,
            self.config.evolution.num_best,
            self.fitness.name()
        );

        self.initialize_population()?;

        let mut history = Vec::new();
        for generation in 0..generations {
            callback.on_generation_start(generation);
            let stats = self.step_generation(generation)?;
            callback.on_generation_complete(&stats);
            history.push(stats);
        }

        let best = self.best()?;
        self.phase = EvolutionPhase::Terminal;
        log::info!("Evolution finished. Best: {} (fitness {:.4})", best.variant, best.fitness);

        Ok(EvolutionOutcome {
            best: best.variant,
            best_fitness: best.fitness,
            generations,
            history,
            final_population: self.population.clone(),
        })
    }

    /// Fill generation 0 according to the configured seeding mode.
    pub fn initialize_population(&mut self) -> Result<()> {
        let size = self.config.evolution.population_size;

        self.population = match self.config.evolution.seeding {
            SeedingMode::Uniform => (0..size)
                .map(|_| self.sampler.generate_variant(&self.config.sampling))
                .collect::<Result<Vec<_>>>()?,
            SeedingMode::RuleBased => {
                let generator =
                    RuleBasedDesignGenerator::new(self.config.rules.rule_based.clone())?;
                (0..size)
                    .map(|_| generator.generate(&mut self.sampler).map(|d| d.variant()))
                    .collect::<Result<Vec<_>>>()?
            }
        };

        self.phase = EvolutionPhase::Seeded;
        log::debug!(
            "Seeded {} variants ({:?})",
            self.population.len(),
            self.config.evolution.seeding
        );
        Ok(())
    }

    /// Evaluate, select elites, and replace the population with their offspring.
    pub fn step_generation(&mut self, generation: usize) -> Result<GenerationStats> {
        if self.population.is_empty() {
            return Err(CpuGenError::Configuration(
                "Population must be initialized before stepping".to_string(),
            ));
        }
        let evolution = &self.config.evolution;

        self.phase = EvolutionPhase::Evaluating;
        let mut ranked = rank_population(
            &self.population,
            self.fitness.as_ref(),
            evolution.parallel_evaluation,
        );
        let mean_fitness = ranked.iter().map(|s| s.fitness).sum::<f64>() / ranked.len() as f64;

        self.phase = EvolutionPhase::Selecting;
        ranked.truncate(evolution.num_best);
        let elites = ranked;
        for (rank, elite) in elites.iter().enumerate() {
            log::debug!("  elite #{}: {} (fitness {:.4})", rank + 1, elite.variant, elite.fitness);
        }

        self.phase = EvolutionPhase::Breeding;
        let parents: Vec<CpuVariant> = elites.iter().map(|s| s.variant).collect();
        self.population = breed(
            &parents,
            evolution.population_size,
            &self.config.mutation,
            &self.config.sampling,
            &mut self.sampler,
        )?;

        Ok(GenerationStats {
            generation,
            best: elites[0].variant,
            best_fitness: elites[0].fitness,
            mean_fitness,
            elites,
        })
    }

    /// Best member of the current population.
    pub fn best(&self) -> Result<ScoredVariant> {
        let mut best = select_best_scored(
            &self.population,
            1,
            self.fitness.as_ref(),
            self.config.evolution.parallel_evaluation,
        )?;
        best.pop().ok_or_else(|| CpuGenError::Configuration("Population is empty".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::evaluation::ThroughputFitness;
    use crate::engines::generation::progress::SilentProgressCallback;

    fn config(population_size: usize, generations: usize, num_best: usize) -> AppConfig {
        let mut config = AppConfig::default();
        config.evolution.population_size = population_size;
        config.evolution.generations = generations;
        config.evolution.num_best = num_best;
        config.evolution.seed = Some(7);
        config
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        assert!(EvolutionEngine::new(config(0, 5, 0), ThroughputFitness).is_err());
        assert!(EvolutionEngine::new(config(3, 5, 4), ThroughputFitness).is_err());
        assert!(EvolutionEngine::new(config(3, 5, 0), ThroughputFitness).is_err());
    }

    #[test]
    fn test_phases_advance() {
        let mut engine = EvolutionEngine::new(config(10, 2, 3), ThroughputFitness).unwrap();
        assert_eq!(engine.phase(), EvolutionPhase::Created);

        engine.initialize_population().unwrap();
        assert_eq!(engine.phase(), EvolutionPhase::Seeded);
        assert_eq!(engine.population().len(), 10);

        engine.step_generation(0).unwrap();
        assert_eq!(engine.phase(), EvolutionPhase::Breeding);
        assert_eq!(engine.population().len(), 10);

        engine.run(SilentProgressCallback).unwrap();
        assert_eq!(engine.phase(), EvolutionPhase::Terminal);
    }

    #[test]
    fn test_step_before_seed_is_an_error() {
        let mut engine = EvolutionEngine::new(config(10, 1, 3), ThroughputFitness).unwrap();
        assert!(engine.step_generation(0).is_err());
    }

    #[test]
    fn test_history_matches_generations() {
        let mut engine = EvolutionEngine::new(config(10, 4, 3), ThroughputFitness).unwrap();
        let outcome = engine.run(SilentProgressCallback).unwrap();

        assert_eq!(outcome.history.len(), 4);
        for (i, stats) in outcome.history.iter().enumerate() {
            assert_eq!(stats.generation, i);
            assert_eq!(stats.elites.len(), 3);
            assert!(stats.best_fitness >= stats.mean_fitness * (1.0 - 1e-12));
        }
        assert_eq!(outcome.final_population.len(), 10);
        assert_eq!(engine.config().evolution.generations, 4);
    }

    /// Panics with a marker once `limit` generations have completed
    struct StopAfter {
        limit: usize,
    }

    impl ProgressCallback for StopAfter {
        fn on_generation_start(&mut self, _generation: usize) {}

        fn on_generation_complete(&mut self, stats: &GenerationStats) {
            if stats.generation + 1 == self.limit {
                panic!("stop after {}", self.limit);
            }
        }
    }

    #[test]
    fn test_huge_generation_count_starts_running() {
        let mut engine =
            EvolutionEngine::new(config(10, usize::MAX, 3), ThroughputFitness).unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            engine.run(StopAfter { limit: 3 })
        }));

        let payload = result.err().unwrap();
        let message = payload
            .downcast_ref::<String>()
            .cloned()
            .unwrap_or_default();
        assert_eq!(message, "stop after 3");
        assert_eq!(engine.phase(), EvolutionPhase::Breeding);
    }
}
