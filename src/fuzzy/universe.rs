//! Discretized universe of discourse.

use crate::error::{FuzzyError, FuzzyResult};

/// A bounded, evenly stepped numeric range.
///
/// Points are `min, min + step, ...` up to and including `max` (within a
/// small tolerance). The output universe is where aggregation and
/// defuzzification happen; input universes only document the intended range.
///
/// Invariant: bounds are finite, `min < max` and `0 < step <= max - min`, so
/// every universe holds at least two points (`min` and `min + step`). The
/// only constructor, [`Universe::new`], enforces it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Universe {
    min: f64,
    max: f64,
    step: f64,
}

impl Universe {
    /// Creates a universe over `[min, max]` with the given step.
    pub fn new(min: f64, max: f64, step: f64) -> FuzzyResult<Self> {
        if !(min.is_finite() && max.is_finite() && step.is_finite()) {
            return Err(FuzzyError::InvalidUniverse(format!(
                "non-finite bounds [{min}, {max}] step {step}"
            )));
        }
        if min >= max {
            return Err(FuzzyError::InvalidUniverse(format!(
                "min {min} must be below max {max}"
            )));
        }
        if step <= 0.0 || step > max - min {
            return Err(FuzzyError::InvalidUniverse(format!(
                "step {step} must be in (0, {}]",
                max - min
            )));
        }
        Ok(Self { min, max, step })
    }

    /// Integer-stepped universe over `[min, max]`.
    pub fn integer(min: i32, max: i32) -> FuzzyResult<Self> {
        Self::new(f64::from(min), f64::from(max), 1.0)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of discrete points.
    pub fn len(&self) -> usize {
        ((self.max - self.min) / self.step + 1e-9).floor() as usize + 1
    }

    /// Never true: see the type-level invariant.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `x` lies within `[min, max]`.
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// The `i`-th discrete point.
    pub fn point(&self, i: usize) -> f64 {
        self.min + i as f64 * self.step
    }

    /// Iterates over the discrete points in ascending order.
    pub fn points(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| self.point(i))
    }
}
