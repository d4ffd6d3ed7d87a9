//! Fuzzy rules and the rule base.
//!
//! A rule is an explicit list of `(variable, label)` antecedent clauses,
//! combined with the minimum operator, and one `(variable, label)`
//! consequent. Rules are assembled through [`Rule::when`]:
//!
//! ```
//! use u_fuzzy::fuzzy::Rule;
//!
//! let rule = Rule::when("angle", "left")
//!     .and("angular_velocity", "zero")
//!     .then("force", "light_left");
//!
//! assert_eq!(rule.antecedent().len(), 2);
//! assert_eq!(rule.consequent().label, "light_left");
//! ```

/// A `(variable, label)` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clause {
    pub variable: String,
    pub label: String,
}

impl Clause {
    pub fn new(variable: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            label: label.into(),
        }
    }
}

/// A Mamdani rule: `clause AND clause AND ... -> consequent`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    antecedent: Vec<Clause>,
    consequent: Clause,
}

impl Rule {
    /// Starts a rule with its first antecedent clause.
    pub fn when(variable: impl Into<String>, label: impl Into<String>) -> RuleBuilder {
        RuleBuilder {
            antecedent: vec![Clause::new(variable, label)],
        }
    }

    pub fn antecedent(&self) -> &[Clause] {
        &self.antecedent
    }

    pub fn consequent(&self) -> &Clause {
        &self.consequent
    }

    /// Firing strength given the degree of each antecedent clause, in order.
    ///
    /// The minimum of the degrees; an empty slice yields 0.
    pub fn strength(degrees: &[f64]) -> f64 {
        if degrees.is_empty() {
            return 0.0;
        }
        degrees.iter().copied().fold(1.0, f64::min)
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("IF ")?;
        for (i, c) in self.antecedent.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{} is {}", c.variable, c.label)?;
        }
        write!(
            f,
            " THEN {} is {}",
            self.consequent.variable, self.consequent.label
        )
    }
}

/// Accumulates antecedent clauses until [`then`](RuleBuilder::then) closes the rule.
#[derive(Debug, Clone)]
pub struct RuleBuilder {
    antecedent: Vec<Clause>,
}

impl RuleBuilder {
    /// Adds a conjunctive clause.
    pub fn and(mut self, variable: impl Into<String>, label: impl Into<String>) -> Self {
        self.antecedent.push(Clause::new(variable, label));
        self
    }

    /// Sets the consequent and finishes the rule.
    pub fn then(self, variable: impl Into<String>, label: impl Into<String>) -> Rule {
        Rule {
            antecedent: self.antecedent,
            consequent: Clause::new(variable, label),
        }
    }
}

/// Ordered collection of rules.
///
/// Order does not change inference results (aggregation is a max), but it
/// fixes the order of rule traces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleBase {
    rules: Vec<Rule>,
}

impl RuleBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Distinct antecedent variable names, in first-use order.
    pub fn input_variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for clause in self.rules.iter().flat_map(|r| r.antecedent.iter()) {
            if !names.contains(&clause.variable.as_str()) {
                names.push(&clause.variable);
            }
        }
        names
    }
}

impl FromIterator<Rule> for RuleBase {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl Extend<Rule> for RuleBase {
    fn extend<T: IntoIterator<Item = Rule>>(&mut self, iter: T) {
        self.rules.extend(iter);
    }
}

impl<'a> IntoIterator for &'a RuleBase {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_builder_and_display() {
        let rule = Rule::when("position", "left")
            .and("velocity", "left")
            .then("force", "strong_right");
        assert_eq!(
            rule.to_string(),
            "IF position is left AND velocity is left THEN force is strong_right"
        );
    }

    #[test]
    fn test_input_variables_first_use_order() {
        let base: RuleBase = [
            Rule::when("angle", "left").and("angular_velocity", "left").then("force", "a"),
            Rule::when("position", "left").then("force", "b"),
            Rule::when("angular_velocity", "zero").and("angle", "center").then("force", "c"),
        ]
        .into_iter()
        .collect();
        assert_eq!(base.input_variables(), ["angle", "angular_velocity", "position"]);
    }

    #[test]
    fn test_strength_empty() {
        assert_eq!(Rule::strength(&[]), 0.0);
    }

    proptest! {
        #[test]
        fn prop_strength_is_min(degrees in prop::collection::vec(0.0f64..=1.0, 1..6)) {
            let expected = degrees.iter().copied().fold(f64::INFINITY, f64::min);
            prop_assert_eq!(Rule::strength(&degrees), expected);
        }
    }
}
