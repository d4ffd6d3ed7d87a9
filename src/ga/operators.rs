//! Real-valued genetic operators.
//!
//! Crossover and mutation operators for chromosomes encoded as `[f64]`
//! gene vectors. They are unconstrained: children may leave the initial
//! sampling range and may reorder values that a decoder reads as sorted
//! breakpoints, so decoders must restore their own invariants.
//!
//! # Crossover Operators
//!
//! - [`blend_crossover`] (BLX-α): Eshelman & Schaffer (1993)
//!
//! # Mutation Operators
//!
//! - [`gaussian_mutation`]: additive normal noise, per-gene probability
//!
//! # References
//!
//! - Eshelman & Schaffer (1993), "Real-Coded Genetic Algorithms and
//!   Interval-Schemata"
//! - Bäck & Schwefel (1993), "An Overview of Evolutionary Algorithms for
//!   Parameter Optimization"

use rand::Rng;
use rand_distr::{Distribution, Normal};

// ============================================================================
// Crossover operators
// ============================================================================

/// Blend crossover (BLX-α) producing two children.
///
/// For each gene a fresh `γ = (1 + 2α)·U[0, 1) − α` is drawn and
///
/// ```text
/// child1 = (1 − γ)·x1 + γ·x2
/// child2 = γ·x1 + (1 − γ)·x2
/// ```
///
/// so every child gene lies in the parents' interval extended by `α` times
/// its width on each side. With `α = 0` children stay between the parents.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths.
pub fn blend_crossover<R: Rng>(
    parent1: &[f64],
    parent2: &[f64],
    alpha: f64,
    rng: &mut R,
) -> (Vec<f64>, Vec<f64>) {
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "parents must have equal length"
    );

    parent1
        .iter()
        .zip(parent2)
        .map(|(&x1, &x2)| {
            let gamma = (1.0 + 2.0 * alpha) * rng.random::<f64>() - alpha;
            ((1.0 - gamma) * x1 + gamma * x2, gamma * x1 + (1.0 - gamma) * x2)
        })
        .unzip()
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Gaussian mutation: adds a draw from `noise` to each gene independently
/// with probability `gene_probability`.
///
/// Returns the number of genes changed.
///
/// # Complexity
/// O(n)
pub fn gaussian_mutation<R: Rng>(
    genes: &mut [f64],
    noise: &Normal<f64>,
    gene_probability: f64,
    rng: &mut R,
) -> usize {
    let p = gene_probability.clamp(0.0, 1.0);
    let mut changed = 0;
    for gene in genes.iter_mut() {
        if rng.random::<f64>() < p {
            *gene += noise.sample(rng);
            changed += 1;
        }
    }
    changed
}

// ============================================================================
// Tests
// ============================================================================
