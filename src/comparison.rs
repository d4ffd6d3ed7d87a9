//! Side-by-side evaluation of the controllers against a desired force.
//!
//! Each system is run over [`COMPARISON_CASES`] and scored by its mean
//! squared error against [`DESIRED_FORCE`] and by wall-clock time. The
//! two-input systems only see angle and angular velocity.

use std::fmt;
use std::time::{Duration, Instant};

use crate::approximator::{mean_squared_error, Predictor};
use crate::controller::{PendulumController, PendulumState};
use crate::error::FuzzyResult;

/// Desired force for every comparison case.
pub const DESIRED_FORCE: f64 = 0.0;

/// `(angle, angular_velocity, position, velocity)` comparison states.
pub const COMPARISON_CASES: [PendulumState; 7] = [
    PendulumState::new(-30.0, 20.0, 0.0, 0.0),
    PendulumState::new(45.0, -10.0, -5.0, -2.0),
    PendulumState::new(0.0, 0.0, 0.0, 0.0),
    PendulumState::new(15.0, 5.0, 5.0, 1.0),
    PendulumState::new(-45.0, -30.0, -10.0, -3.0),
    PendulumState::new(90.0, 100.0, 10.0, 5.0),
    PendulumState::new(-90.0, -100.0, -10.0, -5.0),
];

/// Results of one system over the comparison cases.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemReport {
    pub name: String,
    /// One entry per case; `None` where inference failed.
    pub outputs: Vec<Option<f64>>,
    /// MSE against [`DESIRED_FORCE`] over the cases that produced an output.
    pub mse: f64,
    pub elapsed: Duration,
}

impl SystemReport {
    fn new(name: impl Into<String>, outputs: Vec<Option<f64>>, elapsed: Duration) -> Self {
        let produced: Vec<f64> = outputs.iter().flatten().copied().collect();
        let reference = vec![DESIRED_FORCE; produced.len()];
        Self {
            name: name.into(),
            mse: mean_squared_error(&reference, &produced),
            outputs,
            elapsed,
        }
    }

    /// Cases where the system produced no output.
    pub fn failures(&self) -> usize {
        self.outputs.iter().filter(|o| o.is_none()).count()
    }
}

/// Reports for every compared system, in evaluation order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComparisonReport {
    pub systems: Vec<SystemReport>,
}

impl ComparisonReport {
    pub fn system(&self, name: &str) -> Option<&SystemReport> {
        self.systems.iter().find(|s| s.name == name)
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<16}", "criterion")?;
        for s in &self.systems {
            write!(f, " | {:>14}", s.name)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", "-".repeat(16 + 17 * self.systems.len()))?;

        write!(f, "{:<16}", "time (ms)")?;
        for s in &self.systems {
            write!(f, " | {:>14.3}", s.elapsed.as_secs_f64() * 1e3)?;
        }
        writeln!(f)?;

        write!(f, "{:<16}", "mse")?;
        for s in &self.systems {
            write!(f, " | {:>14.2}", s.mse)?;
        }
        writeln!(f)?;

        write!(f, "{:<16}", "failed cases")?;
        for s in &self.systems {
            write!(f, " | {:>14}", s.failures())?;
        }
        writeln!(f)
    }
}

fn timed<F>(name: &str, cases: &[PendulumState], mut eval: F) -> SystemReport
where
    F: FnMut(&PendulumState) -> FuzzyResult<f64>,
{
    let start = Instant::now();
    let outputs = cases
        .iter()
        .map(|case| match eval(case) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(system = name, ?case, error = %e, "comparison case failed");
                None
            }
        })
        .collect();
    SystemReport::new(name, outputs, start.elapsed())
}

/// Evaluates the hand-tuned controller on full states, the tuned controller
/// and `predictor` on `(angle, angular_velocity)` only.
pub fn compare<P: Predictor + ?Sized>(
    hand_tuned: &PendulumController,
    tuned: &PendulumController,
    predictor: &P,
    cases: &[PendulumState],
) -> ComparisonReport {
    let systems = vec![
        timed("hand-tuned", cases, |s| hand_tuned.evaluate_state(s)),
        timed("genetic", cases, |s| {
            tuned.evaluate(s.angle, s.angular_velocity, None, None)
        }),
        timed("approximator", cases, |s| {
            Ok(predictor.predict(s.angle, s.angular_velocity))
        }),
    ];
    ComparisonReport { systems }
}
