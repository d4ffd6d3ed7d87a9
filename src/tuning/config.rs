//! Tuning configuration.

use crate::error::{FuzzyError, FuzzyResult};
use crate::ga::GaConfig;

use super::benchmark::BENCHMARK_INPUTS;

/// Configuration for a membership-function tuning run.
///
/// Wraps the generic [`GaConfig`] and adds the operator parameters and the
/// benchmark inputs.
///
/// # Examples
///
/// ```
/// use u_fuzzy::tuning::TuningConfig;
///
/// let config = TuningConfig::default()
///     .with_population_size(30)
///     .with_generations(10)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TuningConfig {
    /// Population, generations, selection, rates, seed.
    pub ga: GaConfig,

    /// BLX-α extension factor. Default: 0.5
    pub blend_alpha: f64,

    /// Mean of the Gaussian mutation noise. Default: 0.0
    pub mutation_mean: f64,

    /// Standard deviation of the Gaussian mutation noise. Default: 1.0
    pub mutation_sigma: f64,

    /// Probability that a single gene is perturbed. Default: 0.2
    pub gene_mutation_probability: f64,

    /// Range the initial genes are drawn from. Default: `[-100, 100)`
    pub gene_range: (f64, f64),

    /// `(angle, angular_velocity)` pairs scored by the fitness function.
    pub benchmark: Vec<(f64, f64)>,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            ga: GaConfig::default(),
            blend_alpha: 0.5,
            mutation_mean: 0.0,
            mutation_sigma: 1.0,
            gene_mutation_probability: 0.2,
            gene_range: (-100.0, 100.0),
            benchmark: BENCHMARK_INPUTS.to_vec(),
        }
    }
}

impl TuningConfig {
    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.ga.population_size = n;
        self
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.ga.max_generations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.ga.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.ga.parallel = parallel;
        self
    }

    pub fn with_blend_alpha(mut self, alpha: f64) -> Self {
        self.blend_alpha = alpha;
        self
    }

    pub fn with_mutation(mut self, mean: f64, sigma: f64, gene_probability: f64) -> Self {
        self.mutation_mean = mean;
        self.mutation_sigma = sigma;
        self.gene_mutation_probability = gene_probability;
        self
    }

    pub fn with_gene_range(mut self, lo: f64, hi: f64) -> Self {
        self.gene_range = (lo, hi);
        self
    }

    pub fn with_benchmark(mut self, inputs: Vec<(f64, f64)>) -> Self {
        self.benchmark = inputs;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`FuzzyError::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> FuzzyResult<()> {
        self.ga.validate().map_err(FuzzyError::InvalidConfig)?;
        if !(self.blend_alpha.is_finite() && self.blend_alpha >= 0.0) {
            return Err(FuzzyError::InvalidConfig(format!(
                "blend_alpha must be finite and non-negative, got {}",
                self.blend_alpha
            )));
        }
        if !self.mutation_mean.is_finite()
            || !(self.mutation_sigma.is_finite() && self.mutation_sigma >= 0.0)
        {
            return Err(FuzzyError::InvalidConfig(format!(
                "mutation noise N({}, {}) is not a valid distribution",
                self.mutation_mean, self.mutation_sigma
            )));
        }
        if !(0.0..=1.0).contains(&self.gene_mutation_probability) {
            return Err(FuzzyError::InvalidConfig(format!(
                "gene_mutation_probability must be in [0, 1], got {}",
                self.gene_mutation_probability
            )));
        }
        let (lo, hi) = self.gene_range;
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(FuzzyError::InvalidConfig(format!(
                "gene_range must be a finite non-empty interval, got [{lo}, {hi})"
            )));
        }
        if self.benchmark.is_empty() {
            return Err(FuzzyError::InvalidConfig(
                "benchmark must contain at least one input".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let c = TuningConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.ga.population_size, 50);
        assert_eq!(c.ga.max_generations, 20);
        assert_eq!(c.blend_alpha, 0.5);
        assert_eq!(c.benchmark.len(), 5);
    }

    #[test]
    fn test_ga_errors_are_wrapped() {
        let c = TuningConfig::default().with_population_size(1);
        assert!(matches!(c.validate(), Err(FuzzyError::InvalidConfig(_))));
    }

    #[test]
    fn test_invalid_operator_parameters() {
        assert!(TuningConfig::default().with_blend_alpha(-0.1).validate().is_err());
        assert!(TuningConfig::default()
            .with_mutation(0.0, -1.0, 0.2)
            .validate()
            .is_err());
        assert!(TuningConfig::default()
            .with_mutation(0.0, 1.0, 1.5)
            .validate()
            .is_err());
        assert!(TuningConfig::default().with_gene_range(5.0, 5.0).validate().is_err());
        assert!(TuningConfig::default().with_benchmark(vec![]).validate().is_err());
    }
}
