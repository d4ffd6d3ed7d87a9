//! Training data for black-box approximators of the fuzzy controller.
//!
//! The fuzzy engine supplies the targets: random `(angle, angular_velocity)`
//! samples are run through a controller and the crisp force becomes the
//! regression target. Any model implementing [`Predictor`] can then be
//! compared against the fuzzy controllers.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::controller::PendulumController;
use crate::error::{FuzzyError, FuzzyResult};
use crate::random::create_rng;

/// A trained model mapping `(angle, angular_velocity)` to a force.
pub trait Predictor {
    fn predict(&self, angle: f64, angular_velocity: f64) -> f64;
}

impl<F> Predictor for F
where
    F: Fn(f64, f64) -> f64,
{
    fn predict(&self, angle: f64, angular_velocity: f64) -> f64 {
        self(angle, angular_velocity)
    }
}

/// One `(angle, angular_velocity) -> force` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainingSample {
    pub angle: f64,
    pub angular_velocity: f64,
    pub force: f64,
}

impl TrainingSample {
    pub fn features(&self) -> [f64; 2] {
        [self.angle, self.angular_velocity]
    }
}

/// Sampling parameters for [`generate_training_set`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainingConfig {
    /// Number of samples. Default: 1000
    pub samples: usize,
    /// Angle sampling range. Default: `[-90, 90)`
    pub angle_range: (f64, f64),
    /// Angular-velocity sampling range. Default: `[-100, 100)`
    pub angular_velocity_range: (f64, f64),
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            samples: 1000,
            angle_range: (-90.0, 90.0),
            angular_velocity_range: (-100.0, 100.0),
        }
    }
}

impl TrainingConfig {
    pub fn with_samples(mut self, n: usize) -> Self {
        self.samples = n;
        self
    }

    pub fn validate(&self) -> FuzzyResult<()> {
        if self.samples == 0 {
            return Err(FuzzyError::InvalidConfig("samples must be > 0".into()));
        }
        for (name, (lo, hi)) in [
            ("angle_range", self.angle_range),
            ("angular_velocity_range", self.angular_velocity_range),
        ] {
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(FuzzyError::InvalidConfig(format!(
                    "{name} must be a finite non-empty interval, got [{lo}, {hi})"
                )));
            }
        }
        Ok(())
    }
}

/// A collection of training samples.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainingSet {
    samples: Vec<TrainingSample>,
}

impl TrainingSet {
    pub fn new(samples: Vec<TrainingSample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[TrainingSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Feature rows `[angle, angular_velocity]`.
    pub fn features(&self) -> Vec<[f64; 2]> {
        self.samples.iter().map(TrainingSample::features).collect()
    }

    pub fn targets(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.force).collect()
    }

    /// Shuffles with `seed` and splits into `(train, test)`.
    ///
    /// The test part holds `ceil(len * test_fraction)` samples.
    pub fn split(&self, test_fraction: f64, seed: u64) -> (TrainingSet, TrainingSet) {
        let mut shuffled = self.samples.clone();
        shuffled.shuffle(&mut create_rng(seed));
        let n_test = ((shuffled.len() as f64) * test_fraction.clamp(0.0, 1.0)).ceil() as usize;
        let train = shuffled.split_off(n_test);
        (TrainingSet::new(train), TrainingSet::new(shuffled))
    }

    /// Mean squared error of `predictor` on this set; `NaN` when empty.
    pub fn mse<P: Predictor + ?Sized>(&self, predictor: &P) -> f64 {
        let predicted: Vec<f64> = self
            .samples
            .iter()
            .map(|s| predictor.predict(s.angle, s.angular_velocity))
            .collect();
        mean_squared_error(&self.targets(), &predicted)
    }
}

/// Samples uniformly over the configured ranges and records the controller's
/// force for each sample.
///
/// Only angle and angular velocity are sampled, so `controller` should be a
/// two-input one such as [`PendulumController::hand_tuned_two_input`]. A
/// four-input controller is evaluated with position and velocity at 0, where
/// its centering rule fires at full strength and pulls every target toward 0.
///
/// # Errors
/// [`FuzzyError::InvalidConfig`] for a bad configuration, or the first
/// inference error.
pub fn generate_training_set<R: Rng>(
    controller: &PendulumController,
    config: &TrainingConfig,
    rng: &mut R,
) -> FuzzyResult<TrainingSet> {
    config.validate()?;
    let (a_lo, a_hi) = config.angle_range;
    let (v_lo, v_hi) = config.angular_velocity_range;

    let samples = (0..config.samples)
        .map(|_| {
            let angle = rng.random_range(a_lo..a_hi);
            let angular_velocity = rng.random_range(v_lo..v_hi);
            let force = controller.evaluate(angle, angular_velocity, None, None)?;
            Ok(TrainingSample {
                angle,
                angular_velocity,
                force,
            })
        })
        .collect::<FuzzyResult<Vec<_>>>()?;

    tracing::debug!(samples = samples.len(), "training set generated");
    Ok(TrainingSet::new(samples))
}

/// Mean of squared differences; `NaN` for empty input.
///
/// # Panics
/// Panics if the slices have different lengths.
pub fn mean_squared_error(reference: &[f64], predicted: &[f64]) -> f64 {
    assert_eq!(
        reference.len(),
        predicted.len(),
        "reference and prediction must have equal length"
    );
    if reference.is_empty() {
        return f64::NAN;
    }
    reference
        .iter()
        .zip(predicted)
        .map(|(r, p)| (r - p) * (r - p))
        .sum::<f64>()
        / reference.len() as f64
}

/// Inverse-distance weighted k-nearest-neighbour regressor.
///
/// Features are scaled by their training range so angle and angular
/// velocity contribute comparably.
#[derive(Debug, Clone)]
pub struct KNearest {
    k: usize,
    points: Vec<[f64; 2]>,
    targets: Vec<f64>,
    scale: [f64; 2],
}

impl KNearest {
    /// Fits on `set`.
    ///
    /// # Errors
    /// [`FuzzyError::InvalidConfig`] if `k` is 0 or `set` is empty.
    pub fn fit(set: &TrainingSet, k: usize) -> FuzzyResult<Self> {
        if k == 0 {
            return Err(FuzzyError::InvalidConfig("k must be > 0".into()));
        }
        if set.is_empty() {
            return Err(FuzzyError::InvalidConfig("training set is empty".into()));
        }
        let points = set.features();
        let scale = [0, 1].map(|d| {
            let (lo, hi) = points
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                    (lo.min(p[d]), hi.max(p[d]))
                });
            if hi > lo {
                hi - lo
            } else {
                1.0
            }
        });
        Ok(Self {
            k: k.min(points.len()),
            points,
            targets: set.targets(),
            scale,
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }
}

impl Predictor for KNearest {
    fn predict(&self, angle: f64, angular_velocity: f64) -> f64 {
        let mut nearest: Vec<(f64, f64)> = self
            .points
            .iter()
            .zip(&self.targets)
            .map(|(p, &t)| {
                let da = (p[0] - angle) / self.scale[0];
                let dv = (p[1] - angular_velocity) / self.scale[1];
                ((da * da + dv * dv).sqrt(), t)
            })
            .collect();
        nearest.sort_by(|a, b| a.0.total_cmp(&b.0));
        nearest.truncate(self.k);

        if let Some(&(_, t)) = nearest.iter().find(|(d, _)| *d == 0.0) {
            return t;
        }
        let (num, den) = nearest
            .iter()
            .fold((0.0, 0.0), |(num, den), &(d, t)| (num + t / d, den + 1.0 / d));
        num / den
    }
}
