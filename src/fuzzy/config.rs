//! Inference engine configuration.

/// How the aggregated output set is reduced to one crisp value.
///
/// All methods work on the discretized output universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Defuzzification {
    /// `Σ(u_i · μ_i) / Σ(μ_i)`.
    #[default]
    Centroid,
    /// First point where the cumulative membership reaches half the total.
    Bisector,
    /// Mean of the points holding the maximum degree.
    MeanOfMaximum,
    /// Smallest point holding the maximum degree.
    SmallestOfMaximum,
    /// Largest point holding the maximum degree.
    LargestOfMaximum,
}

impl Defuzzification {
    /// Reduces `(points, degrees)` to a crisp value.
    ///
    /// Returns `None` when the set is identically zero.
    pub fn apply(self, points: &[f64], degrees: &[f64]) -> Option<f64> {
        debug_assert_eq!(points.len(), degrees.len());
        let total: f64 = degrees.iter().sum();
        if total <= 0.0 {
            return None;
        }
        match self {
            Defuzzification::Centroid => {
                let num: f64 = points.iter().zip(degrees).map(|(u, m)| u * m).sum();
                Some(num / total)
            }
            Defuzzification::Bisector => {
                let half = total / 2.0;
                let mut acc = 0.0;
                for (u, m) in points.iter().zip(degrees) {
                    acc += m;
                    if acc >= half {
                        return Some(*u);
                    }
                }
                points.last().copied()
            }
            Defuzzification::MeanOfMaximum
            | Defuzzification::SmallestOfMaximum
            | Defuzzification::LargestOfMaximum => {
                let peak = degrees.iter().copied().fold(0.0, f64::max);
                let at_peak: Vec<f64> = points
                    .iter()
                    .zip(degrees)
                    .filter(|(_, &m)| (peak - m).abs() <= 1e-12)
                    .map(|(&u, _)| u)
                    .collect();
                match self {
                    Defuzzification::SmallestOfMaximum => at_peak.first().copied(),
                    Defuzzification::LargestOfMaximum => at_peak.last().copied(),
                    _ => Some(at_peak.iter().sum::<f64>() / at_peak.len() as f64),
                }
            }
        }
    }
}

/// What [`InferenceEngine::infer`](super::InferenceEngine::infer) returns when
/// no rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EmptyOutputPolicy {
    /// Surface [`FuzzyError::NoRuleFired`](crate::FuzzyError::NoRuleFired).
    #[default]
    Error,
    /// Return the given value.
    Neutral(f64),
}

/// Configuration for [`InferenceEngine`](super::InferenceEngine).
///
/// # Examples
///
/// ```
/// use u_fuzzy::fuzzy::{Defuzzification, EmptyOutputPolicy, EngineConfig};
///
/// let config = EngineConfig::default()
///     .with_defuzzification(Defuzzification::MeanOfMaximum)
///     .with_empty_output(EmptyOutputPolicy::Neutral(0.0));
/// assert_eq!(config.defuzzification, Defuzzification::MeanOfMaximum);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Defuzzification method. Defaults to centroid.
    pub defuzzification: Defuzzification,

    /// Behavior for an identically zero aggregate. Defaults to an error.
    pub empty_output: EmptyOutputPolicy,
}

impl EngineConfig {
    pub fn with_defuzzification(mut self, method: Defuzzification) -> Self {
        self.defuzzification = method;
        self
    }

    pub fn with_empty_output(mut self, policy: EmptyOutputPolicy) -> Self {
        self.empty_output = policy;
        self
    }
}
