//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//!
//! ```text
//! Initialized ──evaluate──▶ (vary ──▶ Evaluated ──select──▶ Selected)×G ──▶ Terminated
//! ```
//!
//! Each generation clones the population into an offspring pool, applies
//! crossover to adjacent pairs and mutation to single offspring, evaluates
//! every changed offspring, and replaces the population wholesale with the
//! selection result. There is no elitism, so the best fitness of the
//! population is expected, but not guaranteed, to improve over time.

use super::config::GaConfig;
use super::selection::select_best;
use super::types::{Fitness, GaProblem, Individual};
use crate::random::rng_from_option;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Population statistics after one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    /// Generation number; 0 is the initial population.
    pub generation: usize,

    /// Lowest fitness in the population.
    pub best: f64,

    /// Mean over finite fitness values; `NaN` if there are none.
    pub mean: f64,

    /// Individuals with non-finite (failed) fitness.
    pub invalid: usize,

    /// Fitness evaluations performed in this generation.
    pub evaluations: usize,
}

/// Result of a GA optimization run.
///
/// Contains the best solution of the final population, along with
/// statistics about the evolutionary process.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual of the final population.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: I::Fitness,

    /// Total number of generations executed.
    pub generations: usize,

    /// Whether the run was terminated due to stagnation.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best population fitness: initial population first, then one entry
    /// per generation.
    pub fitness_history: Vec<f64>,

    /// Per-generation statistics, aligned with `fitness_history`.
    pub stats: Vec<GenerationStats>,

    /// The final population.
    pub population: Vec<I>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config);
/// println!("Best fitness: {:?}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`GaConfig::validate`] first
    /// to get a descriptive error).
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> GaResult<P::Individual> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA will
    /// stop before the next generation and return the best individual of
    /// the current population.
    pub fn run_with_cancel<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> GaResult<P::Individual> {
        config.validate().expect("invalid GaConfig");

        let n = config.population_size;
        let mut rng = rng_from_option(config.seed);

        // 1. Initialize population
        let mut population: Vec<P::Individual> =
            (0..n).map(|_| problem.create_individual(&mut rng)).collect();

        // 2. Evaluate initial population
        let everyone = vec![true; n];
        evaluate_marked(problem, &mut population, &everyone, config.parallel);

        let initial = generation_stats(0, &population, n);
        let mut best_so_far = initial.best;
        let mut fitness_history = Vec::with_capacity(config.max_generations + 1);
        fitness_history.push(initial.best);
        let mut stats = Vec::with_capacity(config.max_generations + 1);
        stats.push(initial);

        let mut stagnation_counter = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;
        let mut generations = 0usize;

        // 3. Evolutionary loop
        for gen in 0..config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            // Variation
            let mut offspring = population.clone();
            let mut changed = vec![false; n];

            for i in (1..n).step_by(2) {
                if rng.random::<f64>() < config.crossover_rate {
                    let children =
                        problem.crossover(&offspring[i - 1], &offspring[i], &mut rng);
                    let mut children = children.into_iter();
                    if let Some(c) = children.next() {
                        offspring[i - 1] = c;
                        changed[i - 1] = true;
                    }
                    if let Some(c) = children.next() {
                        offspring[i] = c;
                        changed[i] = true;
                    }
                }
            }

            for (child, flag) in offspring.iter_mut().zip(changed.iter_mut()) {
                if rng.random::<f64>() < config.mutation_rate {
                    problem.mutate(child, &mut rng);
                    *flag = true;
                }
            }

            // Evaluated
            evaluate_marked(problem, &mut offspring, &changed, config.parallel);
            let evaluations = changed.iter().filter(|&&c| c).count();

            // Selected
            population = config
                .selection
                .select(&offspring, n, &mut rng)
                .into_iter()
                .map(|i| offspring[i].clone())
                .collect();

            generations = gen + 1;
            let gen_stats = generation_stats(generations, &population, evaluations);
            tracing::info!(
                generation = generations,
                best = gen_stats.best,
                mean = gen_stats.mean,
                invalid = gen_stats.invalid,
                "generation complete"
            );

            if gen_stats.best < best_so_far {
                best_so_far = gen_stats.best;
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }

            fitness_history.push(gen_stats.best);
            problem.on_generation(generations, find_best(&population).fitness());
            stats.push(gen_stats);

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        // 4. Terminated
        let best = find_best(&population).clone();
        GaResult {
            best_fitness: best.fitness(),
            best,
            generations,
            stagnated,
            cancelled,
            fitness_history,
            stats,
            population,
        }
    }
}

/// Evaluate the individuals whose flag is set.
fn evaluate_marked<P: GaProblem>(
    problem: &P,
    population: &mut [P::Individual],
    marked: &[bool],
    parallel: bool,
) {
    if parallel && cfg!(feature = "parallel") {
        evaluate_parallel(problem, population, marked);
    } else {
        for (ind, _) in population.iter_mut().zip(marked).filter(|(_, &m)| m) {
            let f = problem.evaluate(ind);
            ind.set_fitness(f);
        }
    }
}

#[cfg(feature = "parallel")]
fn evaluate_parallel<P: GaProblem>(problem: &P, population: &mut [P::Individual], marked: &[bool]) {
    use rayon::prelude::*;

    population
        .par_iter_mut()
        .zip(marked.par_iter())
        .filter(|(_, m)| **m)
        .for_each(|(ind, _)| {
            let f = problem.evaluate(ind);
            ind.set_fitness(f);
        });
}

#[cfg(not(feature = "parallel"))]
fn evaluate_parallel<P: GaProblem>(problem: &P, population: &mut [P::Individual], marked: &[bool]) {
    evaluate_marked(problem, population, marked, false);
}

/// Find the individual with the best (lowest) fitness.
fn find_best<I: Individual>(population: &[I]) -> &I {
    let idx = select_best(population, 1)
        .first()
        .copied()
        .expect("population must not be empty");
    &population[idx]
}

fn generation_stats<I: Individual>(
    generation: usize,
    population: &[I],
    evaluations: usize,
) -> GenerationStats {
    let fitness: Vec<f64> = population.iter().map(|i| i.fitness().to_f64()).collect();
    let finite: Vec<f64> = fitness.iter().copied().filter(|f| f.is_finite()).collect();
    GenerationStats {
        generation,
        best: fitness.iter().copied().fold(<I::Fitness as Fitness>::worst().to_f64(), f64::min),
        mean: if finite.is_empty() {
            f64::NAN
        } else {
            finite.iter().sum::<f64>() / finite.len() as f64
        },
        invalid: fitness.len() - finite.len(),
        evaluations,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::operators::{blend_crossover, gaussian_mutation};
    use crate::ga::{GaConfig, Selection};
    use rand_distr::Normal;

    // ---- Continuous optimization: sphere function ----

    #[derive(Clone, Debug)]
    struct RealVector {
        genes: Vec<f64>,
        fitness: f64,
    }

    impl Individual for RealVector {
        type Fitness = f64;
        fn fitness(&self) -> f64 {
            self.fitness
        }
        fn set_fitness(&mut self, f: f64) {
            self.fitness = f;
        }
    }

    struct SphereProblem {
        dim: usize,
    }

    impl GaProblem for SphereProblem {
        type Individual = RealVector;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> RealVector {
            let genes: Vec<f64> = (0..self.dim)
                .map(|_| rng.random_range(-5.0..5.0))
                .collect();
            RealVector {
                genes,
                fitness: f64::INFINITY,
            }
        }

        fn evaluate(&self, ind: &RealVector) -> f64 {
            // f(x) = sum(x_i^2), minimum at origin
            ind.genes.iter().map(|x| x * x).sum()
        }

        fn crossover<R: Rng>(
            &self,
            p1: &RealVector,
            p2: &RealVector,
            rng: &mut R,
        ) -> Vec<RealVector> {
            let (a, b) = blend_crossover(&p1.genes, &p2.genes, 0.5, rng);
            vec![
                RealVector {
                    genes: a,
                    fitness: f64::INFINITY,
                },
                RealVector {
                    genes: b,
                    fitness: f64::INFINITY,
                },
            ]
        }

        fn mutate<R: Rng>(&self, ind: &mut RealVector, rng: &mut R) {
            let noise = Normal::new(0.0, 0.3).unwrap();
            gaussian_mutation(&mut ind.genes, &noise, 0.2, rng);
        }
    }

    #[test]
    fn test_sphere_optimization() {
        let problem = SphereProblem { dim: 5 };
        let config = GaConfig::default()
            .with_population_size(100)
            .with_max_generations(150)
            .with_seed(42)
            .with_parallel(false);

        let result = GaRunner::run(&problem, &config);

        assert!(
            result.best_fitness < result.fitness_history[0],
            "expected improvement over the initial population: {} vs {}",
            result.best_fitness,
            result.fitness_history[0]
        );
        assert!(
            result.best_fitness < 1.0,
            "expected fitness < 1.0 for 5D sphere, got {}",
            result.best_fitness
        );
    }

    #[test]
    fn test_same_seed_same_result() {
        let problem = SphereProblem { dim: 4 };
        let config = GaConfig::default().with_seed(7).with_parallel(false);

        let a = GaRunner::run(&problem, &config);
        let b = GaRunner::run(&problem, &config);
        assert_eq!(a.best.genes, b.best.genes);
        assert_eq!(a.fitness_history, b.fitness_history);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let problem = SphereProblem { dim: 6 };
        let sequential = GaRunner::run(&problem, &GaConfig::default().with_seed(5).with_parallel(false));
        let parallel = GaRunner::run(&problem, &GaConfig::default().with_seed(5).with_parallel(true));
        assert_eq!(sequential.best.genes, parallel.best.genes);
        assert_eq!(sequential.fitness_history, parallel.fitness_history);
    }

    #[test]
    fn test_fitness_history_and_stats() {
        let problem = SphereProblem { dim: 3 };
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(30)
            .with_seed(42)
            .with_parallel(false);

        let result = GaRunner::run(&problem, &config);

        // initial + each generation
        assert_eq!(result.fitness_history.len(), 31);
        assert_eq!(result.stats.len(), 31);
        assert_eq!(result.generations, 30);
        assert_eq!(result.population.len(), 20);
        assert_eq!(result.stats[0].evaluations, 20);
        assert!(result.stats[1..].iter().all(|s| s.evaluations <= 20));
        assert_eq!(result.best_fitness, *result.fitness_history.last().unwrap());
    }

    #[test]
    fn test_stagnation_termination() {
        let problem = SphereProblem { dim: 2 };
        let config = GaConfig::default()
            .with_population_size(10)
            .with_max_generations(1000)
            .with_crossover_rate(0.0)
            .with_mutation_rate(0.0)
            .with_stagnation_limit(5)
            .with_seed(42)
            .with_parallel(false);

        // Without variation selection can only keep or lose the best
        let result = GaRunner::run(&problem, &config);
        assert!(result.stagnated);
        assert_eq!(result.generations, 5);
    }

    #[test]
    fn test_cancellation() {
        let problem = SphereProblem { dim: 3 };
        let config = GaConfig::default().with_seed(42).with_parallel(false);

        let cancel = Arc::new(AtomicBool::new(true));
        let result = GaRunner::run_with_cancel(&problem, &config, Some(cancel));

        assert!(result.cancelled, "expected cancelled result");
        assert_eq!(result.generations, 0);
        assert_eq!(result.fitness_history.len(), 1);
    }

    #[test]
    fn test_truncation_selection() {
        let problem = SphereProblem { dim: 3 };
        let config = GaConfig::default()
            .with_selection(Selection::Best)
            .with_seed(3)
            .with_parallel(false);

        // Truncation over the whole offspring pool returns it best-first
        let result = GaRunner::run(&problem, &config);
        assert!(result
            .population
            .windows(2)
            .all(|w| w[0].fitness <= w[1].fitness));
        assert_eq!(result.best_fitness, result.population[0].fitness);
    }

    // ---- Failed evaluations ----

    struct FlakyProblem;

    impl GaProblem for FlakyProblem {
        type Individual = RealVector;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> RealVector {
            RealVector {
                genes: vec![rng.random_range(-10.0..10.0)],
                fitness: f64::INFINITY,
            }
        }

        fn evaluate(&self, ind: &RealVector) -> f64 {
            // Negative genes "fail"
            if ind.genes[0] < 0.0 {
                f64::INFINITY
            } else {
                ind.genes[0]
            }
        }
        // Uses default crossover (clone) and mutate (no-op)
    }

    #[test]
    fn test_failed_evaluations_do_not_abort() {
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(10)
            .with_seed(42)
            .with_parallel(false);

        let result = GaRunner::run(&FlakyProblem, &config);

        assert_eq!(result.generations, 10);
        assert!(result.stats[0].invalid > 0);
        assert!(result.best_fitness.is_finite());
        assert!(result.best_fitness >= 0.0);
    }

    #[test]
    #[should_panic(expected = "invalid GaConfig")]
    fn test_invalid_config_panics() {
        let config = GaConfig::default().with_population_size(1);
        GaRunner::run(&FlakyProblem, &config);
    }
}
