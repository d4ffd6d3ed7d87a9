//! Genetic tuning of the controller's membership functions.
//!
//! A [`Chromosome`] encodes the breakpoints of the angle, angular-velocity
//! and force labels. [`tune`] evolves a population of chromosomes with the
//! generic [`GaRunner`](crate::ga::GaRunner), scoring each one by the sum of
//! absolute forces its two-input controller produces on the benchmark
//! inputs.
//!
//! # Algorithm
//!
//! Per generation:
//!
//! 1. Clone the population into an offspring pool
//! 2. BLX-α crossover on adjacent pairs with probability `crossover_rate`
//! 3. Gaussian mutation per offspring with probability `mutation_rate`
//! 4. Re-evaluate changed offspring; failures score `+inf`
//! 5. Tournament selection forms the next population
//!
//! The best chromosome of the final population is returned.
//!
//! # Examples
//!
//! ```
//! use u_fuzzy::tuning::{tune, TuningConfig};
//!
//! let config = TuningConfig::default()
//!     .with_population_size(20)
//!     .with_generations(5)
//!     .with_seed(1);
//! let result = tune(&config).unwrap();
//! assert_eq!(result.generations, 5);
//! ```

mod benchmark;
mod chromosome;
mod config;
mod problem;

pub use benchmark::{Benchmark, Evaluation, BENCHMARK_INPUTS};
pub use chromosome::{Chromosome, DecodedChromosome, Segment, CHROMOSOME_LEN, LAYOUT};
pub use config::TuningConfig;
pub use problem::TuningProblem;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::controller::PendulumController;
use crate::error::FuzzyResult;
use crate::ga::{GaRunner, GenerationStats};

/// Outcome of a tuning run.
#[derive(Debug, Clone)]
pub struct TuningResult {
    /// Best chromosome of the final population.
    pub best: Chromosome,

    /// Its fitness; `+inf` if no chromosome ever evaluated successfully.
    pub best_fitness: f64,

    /// Generations executed.
    pub generations: usize,

    /// Whether the run was cancelled.
    pub cancelled: bool,

    /// Best population fitness per generation, initial population first.
    pub fitness_history: Vec<f64>,

    /// Per-generation statistics, aligned with `fitness_history`.
    pub stats: Vec<GenerationStats>,
}

impl TuningResult {
    /// Builds the tuned two-input controller from the best chromosome.
    ///
    /// # Errors
    /// [`FuzzyError::InvalidChromosome`](crate::FuzzyError::InvalidChromosome)
    /// if the best chromosome does not
    /// decode (only possible when every candidate was invalid).
    pub fn controller(&self) -> FuzzyResult<PendulumController> {
        self.best.to_controller()
    }
}

/// Runs the genetic tuning loop.
///
/// # Errors
/// [`FuzzyError::InvalidConfig`](crate::FuzzyError::InvalidConfig) if `config`
/// does not validate.
pub fn tune(config: &TuningConfig) -> FuzzyResult<TuningResult> {
    tune_with_cancel(config, None)
}

/// Runs the genetic tuning loop with an optional cancellation flag.
///
/// Setting the flag stops the run before the next generation; the best
/// chromosome found so far is still returned.
pub fn tune_with_cancel(
    config: &TuningConfig,
    cancel: Option<Arc<AtomicBool>>,
) -> FuzzyResult<TuningResult> {
    let problem = TuningProblem::new(config)?;
    tracing::info!(
        population = config.ga.population_size,
        generations = config.ga.max_generations,
        seed = ?config.ga.seed,
        "tuning membership functions"
    );

    let result = GaRunner::run_with_cancel(&problem, &config.ga, cancel);

    if result.best_fitness.is_finite() {
        tracing::info!(best = result.best_fitness, generations = result.generations, "tuning finished");
    } else {
        tracing::warn!(generations = result.generations, "no valid chromosome found");
    }

    Ok(TuningResult {
        best_fitness: result.best_fitness,
        best: result.best,
        generations: result.generations,
        cancelled: result.cancelled,
        fitness_history: result.fitness_history,
        stats: result.stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FuzzyError;
    use std::sync::atomic::Ordering;

    fn small() -> TuningConfig {
        TuningConfig::default()
            .with_population_size(20)
            .with_generations(8)
            .with_seed(42)
            .with_parallel(false)
    }

    #[test]
    fn test_invalid_config_is_error() {
        let config = TuningConfig::default().with_generations(0);
        assert!(matches!(tune(&config), Err(FuzzyError::InvalidConfig(_))));
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let a = tune(&small()).unwrap();
        let b = tune(&small()).unwrap();
        assert_eq!(a.best.genes(), b.best.genes());
        assert_eq!(a.fitness_history, b.fitness_history);
    }

    #[test]
    fn test_history_covers_every_generation() {
        let r = tune(&small()).unwrap();
        assert_eq!(r.generations, 8);
        assert_eq!(r.fitness_history.len(), 9);
        assert_eq!(r.stats.len(), 9);
        assert!(!r.cancelled);
    }

    #[test]
    fn test_cancelled_before_first_generation() {
        let flag = Arc::new(AtomicBool::new(false));
        flag.store(true, Ordering::Relaxed);
        let r = tune_with_cancel(&small(), Some(flag)).unwrap();
        assert!(r.cancelled);
        assert_eq!(r.generations, 0);
    }

    #[test]
    fn test_best_controller_is_usable() {
        let r = tune(&small().with_generations(15)).unwrap();
        if r.best_fitness.is_finite() {
            let c = r.controller().unwrap();
            for &(a, v) in &BENCHMARK_INPUTS {
                assert!(c.evaluate(a, v, None, None).unwrap().is_finite());
            }
        }
    }
}
