use crate::engines::evaluation::FitnessFunction;
use crate::error::{CpuGenError, Result};
use crate::types::CpuVariant;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A variant paired with its fitness score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredVariant {
    pub variant: CpuVariant,
    pub fitness: f64,
}

/// Descending by fitness; NaN scores rank below everything else.
fn by_fitness_desc(a: &ScoredVariant, b: &ScoredVariant) -> Ordering {
    let key = |s: &ScoredVariant| {
        if s.fitness.is_nan() {
            f64::NEG_INFINITY
        } else {
            s.fitness
        }
    };
    key(b).total_cmp(&key(a))
}

/// Score every member, keeping population order.
pub fn score_population<F>(
    population: &[CpuVariant],
    fitness: &F,
    parallel: bool,
) -> Vec<ScoredVariant>
where
    F: FitnessFunction + ?Sized,
{
    let score = |variant: &CpuVariant| ScoredVariant {
        variant: *variant,
        fitness: fitness.evaluate(variant),
    };

    if parallel {
        population.par_iter().map(score).collect()
    } else {
        population.iter().map(score).collect()
    }
}

/// Score and sort a population, best first. Ties keep population order.
pub fn rank_population<F>(
    population: &[CpuVariant],
    fitness: &F,
    parallel: bool,
) -> Vec<ScoredVariant>
where
    F: FitnessFunction + ?Sized,
{
    let mut scored = score_population(population, fitness, parallel);
    scored.sort_by(by_fitness_desc);
    scored
}

/// Top `k` members with their scores, best first.
pub fn select_best_scored<F>(
    population: &[CpuVariant],
    k: usize,
    fitness: &F,
    parallel: bool,
) -> Result<Vec<ScoredVariant>>
where
    F: FitnessFunction + ?Sized,
{
    if k == 0 || k > population.len() {
        return Err(CpuGenError::Configuration(format!(
            "Cannot select {} variants from a population of {}",
            k,
            population.len()
        )));
    }

    let mut ranked = rank_population(population, fitness, parallel);
    ranked.truncate(k);
    Ok(ranked)
}

/// Top `k` members, best first. Requires `1 <= k <= population.len()`.
pub fn select_best<F>(population: &[CpuVariant], k: usize, fitness: &F) -> Result<Vec<CpuVariant>>
where
    F: FitnessFunction + ?Sized,
{
    Ok(select_best_scored(population, k, fitness, false)?
        .into_iter()
        .map(|s| s.variant)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::evaluation::{ConstantFitness, ThroughputFitness};

    fn population() -> Vec<CpuVariant> {
        vec![
            CpuVariant::new(1.0, 4096),  // 4096
            CpuVariant::new(3.0, 8192),  // 24576
            CpuVariant::new(2.0, 2048),  // 4096
            CpuVariant::new(2.5, 65536), // 163840
        ]
    }

    #[test]
    fn test_select_best_orders_descending() {
        let best = select_best(&population(), 2, &ThroughputFitness).unwrap();
        assert_eq!(best, vec![CpuVariant::new(2.5, 65536), CpuVariant::new(3.0, 8192)]);
    }

    #[test]
    fn test_ties_keep_population_order() {
        let ranked = rank_population(&population(), &ThroughputFitness, false);
        assert_eq!(ranked[2].variant, CpuVariant::new(1.0, 4096));
        assert_eq!(ranked[3].variant, CpuVariant::new(2.0, 2048));

        let flat = select_best(&population(), 4, &ConstantFitness(1.0)).unwrap();
        assert_eq!(flat, population());
    }

    #[test]
    fn test_select_all_returns_everything() {
        let pop = population();
        let all = select_best(&pop, pop.len(), &ThroughputFitness).unwrap();
        assert_eq!(all.len(), pop.len());
        for variant in &pop {
            assert!(all.contains(variant));
        }
    }

    #[test]
    fn test_out_of_range_k_is_rejected() {
        let pop = population();
        assert!(select_best(&pop, 0, &ThroughputFitness).is_err());
        assert!(select_best(&pop, 5, &ThroughputFitness).is_err());
        assert!(select_best(&[], 1, &ThroughputFitness).is_err());
    }

    #[test]
    fn test_nan_scores_rank_last() {
        let fitness = |v: &CpuVariant| if v.memory_size == 8192 { f64::NAN } else { v.clock_speed };
        let ranked = rank_population(&population(), &fitness, false);
        assert_eq!(ranked.last().unwrap().variant, CpuVariant::new(3.0, 8192));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let pop: Vec<CpuVariant> = (0..64)
            .map(|i| CpuVariant::new(1.0 + i as f64 * 0.01, 2048 + (i * 37 % 11) as i64))
            .collect();
        let sequential = rank_population(&pop, &ThroughputFitness, false);
        let parallel = rank_population(&pop, &ThroughputFitness, true);
        assert_eq!(sequential, parallel);
    }
}
