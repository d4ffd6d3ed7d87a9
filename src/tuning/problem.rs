//! Membership-function tuning as a GA problem.

use rand::Rng;
use rand_distr::Normal;

use super::benchmark::{Benchmark, Evaluation};
use super::chromosome::Chromosome;
use super::config::TuningConfig;
use crate::error::{FuzzyError, FuzzyResult};
use crate::ga::operators::{blend_crossover, gaussian_mutation};
use crate::ga::GaProblem;

/// Tunes the 39 membership-function parameters of the two-input controller.
#[derive(Debug, Clone)]
pub struct TuningProblem {
    benchmark: Benchmark,
    blend_alpha: f64,
    noise: Normal<f64>,
    gene_probability: f64,
    gene_range: (f64, f64),
}

impl TuningProblem {
    /// Builds the problem from a tuning configuration.
    ///
    /// # Errors
    /// [`FuzzyError::InvalidConfig`] if the configuration does not validate.
    pub fn new(config: &TuningConfig) -> FuzzyResult<Self> {
        config.validate()?;
        let noise = Normal::new(config.mutation_mean, config.mutation_sigma)
            .map_err(|e| FuzzyError::InvalidConfig(format!("mutation noise: {e}")))?;
        Ok(Self {
            benchmark: Benchmark::new(config.benchmark.clone()),
            blend_alpha: config.blend_alpha,
            noise,
            gene_probability: config.gene_mutation_probability,
            gene_range: config.gene_range,
        })
    }

    pub fn benchmark(&self) -> &Benchmark {
        &self.benchmark
    }
}

impl GaProblem for TuningProblem {
    type Individual = Chromosome;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Chromosome {
        let (lo, hi) = self.gene_range;
        Chromosome::random(lo, hi, rng)
    }

    fn evaluate(&self, chromosome: &Chromosome) -> f64 {
        let evaluation = self.benchmark.evaluate(chromosome);
        if let Evaluation::Invalid(ref reason) = evaluation {
            tracing::debug!(%reason, "chromosome rejected");
        }
        evaluation.fitness()
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> Vec<Chromosome> {
        let (a, b) = blend_crossover(parent1.genes(), parent2.genes(), self.blend_alpha, rng);
        vec![Chromosome::from_genes(a), Chromosome::from_genes(b)]
    }

    fn mutate<R: Rng>(&self, chromosome: &mut Chromosome, rng: &mut R) {
        gaussian_mutation(chromosome.genes_mut(), &self.noise, self.gene_probability, rng);
    }

    fn on_generation(&self, generation: usize, best_fitness: f64) {
        tracing::debug!(generation, best_fitness, "tuning progress");
    }
}
