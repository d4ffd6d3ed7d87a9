//! Mamdani fuzzy inference with genetic membership-function tuning.
//!
//! Provides the pieces of an inverted-pendulum fuzzy controller study:
//!
//! - **Fuzzy inference**: membership functions, linguistic variables,
//!   rule bases and a Mamdani engine (min AND, clip implication, max
//!   aggregation, discrete centroid defuzzification).
//! - **Genetic Algorithm (GA)**: a generic population-based optimizer with
//!   tournament selection, blend crossover and Gaussian mutation.
//! - **Tuning**: a 39-gene chromosome encoding of the controller's
//!   membership functions, evolved by the GA.
//! - **Controller**: the hand-tuned four-input controller and the
//!   two-input controller built from a tuned chromosome.
//! - **Approximator / comparison**: training data for black-box models and
//!   a side-by-side evaluation harness.
//!
//! # Example
//!
//! ```
//! use u_fuzzy::controller::PendulumController;
//!
//! let controller = PendulumController::hand_tuned()?;
//! let force = controller.evaluate(-30.0, 20.0, Some(0.0), Some(0.0))?;
//! assert!(force < 0.0);
//! # Ok::<(), u_fuzzy::FuzzyError>(())
//! ```

pub mod approximator;
pub mod comparison;
pub mod controller;
pub mod error;
pub mod fuzzy;
pub mod ga;
pub mod random;
pub mod tuning;

pub use error::{FuzzyError, FuzzyResult};
