//! Linguistic variables: a named universe with labeled membership functions.

use super::membership::MembershipFunction;
use super::universe::Universe;
use crate::error::{FuzzyError, FuzzyResult};

/// A named input or output dimension.
///
/// Labels keep their insertion order so fuzzification and diagnostics are
/// reproducible. Labels may overlap; their degrees need not sum to 1.
///
/// # Examples
///
/// ```
/// use u_fuzzy::fuzzy::{LinguisticVariable, MembershipFunction, Universe};
///
/// let angle = LinguisticVariable::new("angle", Universe::integer(-90, 90).unwrap())
///     .with_term("left", MembershipFunction::Trapezoidal(-90.0, -90.0, -45.0, 0.0))
///     .unwrap()
///     .with_term("center", MembershipFunction::Triangular(-45.0, 0.0, 45.0))
///     .unwrap();
///
/// assert_eq!(angle.degree("center", 0.0), Some(1.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinguisticVariable {
    name: String,
    universe: Universe,
    terms: Vec<(String, MembershipFunction)>,
}

impl LinguisticVariable {
    /// Creates a variable with no labels.
    pub fn new(name: impl Into<String>, universe: Universe) -> Self {
        Self {
            name: name.into(),
            universe,
            terms: Vec::new(),
        }
    }

    /// Adds a labeled membership function.
    ///
    /// Fails if the label already exists on this variable.
    pub fn with_term(
        mut self,
        label: impl Into<String>,
        function: MembershipFunction,
    ) -> FuzzyResult<Self> {
        self.add_term(label, function)?;
        Ok(self)
    }

    /// In-place form of [`with_term`](Self::with_term).
    pub fn add_term(
        &mut self,
        label: impl Into<String>,
        function: MembershipFunction,
    ) -> FuzzyResult<()> {
        let label = label.into();
        if self.label_index(&label).is_some() {
            return Err(FuzzyError::DuplicateLabel {
                variable: self.name.clone(),
                label,
            });
        }
        self.terms.push((label, function));
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Labels in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|(l, _)| l.as_str())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Position of `label` among this variable's terms.
    pub fn label_index(&self, label: &str) -> Option<usize> {
        self.terms.iter().position(|(l, _)| l == label)
    }

    /// Membership function for `label`.
    pub fn term(&self, label: &str) -> Option<&MembershipFunction> {
        self.terms.iter().find(|(l, _)| l == label).map(|(_, f)| f)
    }

    /// Membership function by position.
    pub fn term_at(&self, index: usize) -> Option<&MembershipFunction> {
        self.terms.get(index).map(|(_, f)| f)
    }

    /// Degree of `x` in `label`, or `None` for an unknown label.
    pub fn degree(&self, label: &str, x: f64) -> Option<f64> {
        self.term(label).map(|f| f.evaluate(x))
    }

    /// Degrees of `x` in every label, in label order.
    pub fn fuzzify(&self, x: f64) -> Vec<f64> {
        self.terms.iter().map(|(_, f)| f.evaluate(x)).collect()
    }

    /// Samples `label` over every point of the universe.
    pub fn sample(&self, label: &str) -> Option<Vec<f64>> {
        self.term(label)
            .map(|f| self.universe.points().map(|u| f.evaluate(u)).collect())
    }

    /// Discrete centroid of a single label over the universe.
    ///
    /// Returns `None` for an unknown label or a label with no support on
    /// the universe.
    pub fn centroid(&self, label: &str) -> Option<f64> {
        let f = self.term(label)?;
        let (num, den) = self.universe.points().fold((0.0, 0.0), |(n, d), u| {
            let m = f.evaluate(u);
            (n + u * m, d + m)
        });
        (den > 0.0).then(|| num / den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn velocity() -> LinguisticVariable {
        LinguisticVariable::new("velocity", Universe::integer(-5, 5).unwrap())
            .with_term("left", MembershipFunction::Trapezoidal(-5.0, -5.0, -2.0, 0.0))
            .unwrap()
            .with_term("zero", MembershipFunction::Triangular(-2.0, 0.0, 2.0))
            .unwrap()
            .with_term("right", MembershipFunction::Trapezoidal(0.0, 2.0, 5.0, 5.0))
            .unwrap()
    }

    #[test]
    fn test_fuzzify_in_label_order() {
        let v = velocity();
        assert_eq!(v.fuzzify(-1.0), vec![0.5, 0.5, 0.0]);
        assert_eq!(v.labels().collect::<Vec<_>>(), ["left", "zero", "right"]);
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let err = velocity()
            .with_term("zero", MembershipFunction::Triangular(-1.0, 0.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, FuzzyError::DuplicateLabel { .. }));
    }

    #[test]
    fn test_unknown_label() {
        let v = velocity();
        assert_eq!(v.degree("fast", 1.0), None);
        assert_eq!(v.label_index("right"), Some(2));
    }

    #[test]
    fn test_symmetric_label_centroid() {
        let v = velocity();
        assert!(v.centroid("zero").unwrap().abs() < 1e-12);
        assert!(v.centroid("right").unwrap() > 2.0);
    }

    #[test]
    fn test_centroid_without_support() {
        let v = LinguisticVariable::new("x", Universe::integer(0, 10).unwrap())
            .with_term("far", MembershipFunction::Triangular(50.0, 60.0, 70.0))
            .unwrap();
        assert_eq!(v.centroid("far"), None);
    }
}
