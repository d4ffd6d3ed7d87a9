//! Fitness evaluation of a chromosome.
//!
//! The score of a chromosome is the sum of absolute controller outputs over
//! a fixed set of `(angle, angular_velocity)` benchmark inputs. Lower is
//! better. Any failure while decoding or inferring makes the chromosome
//! invalid, which the GA sees as `+inf`.

use super::chromosome::Chromosome;
use crate::error::{FuzzyError, FuzzyResult};

/// Default benchmark inputs `(angle, angular_velocity)`.
pub const BENCHMARK_INPUTS: [(f64, f64); 5] = [
    (-30.0, 20.0),
    (45.0, -10.0),
    (0.0, 0.0),
    (15.0, 5.0),
    (-45.0, -30.0),
];

/// Outcome of evaluating one chromosome.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// Decoded and inferred every benchmark input.
    Scored(f64),
    /// Decoding or some inference failed.
    Invalid(FuzzyError),
}

impl Evaluation {
    /// Fitness as seen by the GA: the score, or `+inf` when invalid.
    pub fn fitness(&self) -> f64 {
        match self {
            Evaluation::Scored(score) => *score,
            Evaluation::Invalid(_) => f64::INFINITY,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Evaluation::Scored(_))
    }
}

/// A set of benchmark inputs that scores chromosomes.
#[derive(Debug, Clone, PartialEq)]
pub struct Benchmark {
    inputs: Vec<(f64, f64)>,
}

impl Default for Benchmark {
    fn default() -> Self {
        Self::new(BENCHMARK_INPUTS.to_vec())
    }
}

impl Benchmark {
    pub fn new(inputs: Vec<(f64, f64)>) -> Self {
        Self { inputs }
    }

    pub fn inputs(&self) -> &[(f64, f64)] {
        &self.inputs
    }

    /// Sum of `|force|` over the benchmark inputs.
    pub fn score(&self, chromosome: &Chromosome) -> FuzzyResult<f64> {
        let controller = chromosome.to_controller()?;
        self.inputs.iter().try_fold(0.0, |acc, &(angle, velocity)| {
            Ok(acc + controller.evaluate(angle, velocity, None, None)?.abs())
        })
    }

    /// Scores a chromosome, capturing the failure instead of propagating it.
    pub fn evaluate(&self, chromosome: &Chromosome) -> Evaluation {
        match self.score(chromosome) {
            Ok(score) => Evaluation::Scored(score),
            Err(e) => Evaluation::Invalid(e),
        }
    }
}
