//! Mamdani inference: fuzzify → rule strength → clip → aggregate → defuzzify.

use std::collections::HashMap;

use super::config::{EmptyOutputPolicy, EngineConfig};
use super::rule::{Rule, RuleBase};
use super::variable::LinguisticVariable;
use crate::error::{FuzzyError, FuzzyResult};

/// Crisp input values keyed by variable name.
///
/// Variables not referenced by any rule are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inputs(HashMap<String, f64>);

impl Inputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the crisp value of `variable`.
    pub fn with(mut self, variable: impl Into<String>, value: f64) -> Self {
        self.0.insert(variable.into(), value);
        self
    }

    pub fn set(&mut self, variable: impl Into<String>, value: f64) {
        self.0.insert(variable.into(), value);
    }

    pub fn get(&self, variable: &str) -> Option<f64> {
        self.0.get(variable).copied()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Inputs {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A rule with its clauses resolved to `(input index, label index)`.
#[derive(Debug, Clone)]
struct CompiledRule {
    clauses: Vec<(usize, usize)>,
    consequent: usize,
}

/// Degrees of one input variable's labels for a crisp value.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableMembership {
    pub variable: String,
    pub value: f64,
    /// `(label, degree)` in label order.
    pub degrees: Vec<(String, f64)>,
}

/// Firing strength of one rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleActivation {
    /// Position of the rule in the rule base.
    pub rule_index: usize,
    pub strength: f64,
    pub consequent: String,
}

/// Full diagnostic record of one inference.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceTrace {
    /// Fuzzified inputs, for every variable the rules reference.
    pub memberships: Vec<VariableMembership>,
    /// One entry per rule, in rule-base order.
    pub activations: Vec<RuleActivation>,
    /// Aggregated output degrees over the output universe.
    pub aggregate: Vec<f64>,
    /// Defuzzified value; `None` when no rule fired.
    pub output: Option<f64>,
}

/// Stateless Mamdani inference engine.
///
/// Built once from input variables, one output variable and a rule base;
/// every rule reference is checked at construction. [`infer`](Self::infer)
/// takes `&self` and keeps no state between calls, so one engine can be
/// shared across threads.
///
/// # Examples
///
/// ```
/// use u_fuzzy::fuzzy::*;
///
/// let u = Universe::integer(-10, 10).unwrap();
/// let error = LinguisticVariable::new("error", u)
///     .with_term("neg", MembershipFunction::Trapezoidal(-10.0, -10.0, -5.0, 0.0)).unwrap()
///     .with_term("pos", MembershipFunction::Trapezoidal(0.0, 5.0, 10.0, 10.0)).unwrap();
/// let action = LinguisticVariable::new("action", u)
///     .with_term("down", MembershipFunction::Triangular(-10.0, -5.0, 0.0)).unwrap()
///     .with_term("up", MembershipFunction::Triangular(0.0, 5.0, 10.0)).unwrap();
/// let rules = RuleBase::new()
///     .with_rule(Rule::when("error", "neg").then("action", "up"))
///     .with_rule(Rule::when("error", "pos").then("action", "down"));
///
/// let engine = InferenceEngine::new(vec![error], action, rules).unwrap();
/// let out = engine.infer(&Inputs::new().with("error", -8.0)).unwrap();
/// assert!((out - 5.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    inputs: Vec<LinguisticVariable>,
    output: LinguisticVariable,
    rules: RuleBase,
    compiled: Vec<CompiledRule>,
    /// Input variables referenced by at least one rule.
    referenced: Vec<usize>,
    /// Output universe points.
    points: Vec<f64>,
    /// Each output label sampled over `points`.
    output_samples: Vec<Vec<f64>>,
    config: EngineConfig,
}

impl InferenceEngine {
    /// Builds an engine, resolving every rule against the declared variables.
    ///
    /// # Errors
    /// - [`FuzzyError::EmptyRuleBase`] if `rules` is empty
    /// - [`FuzzyError::UnknownVariable`] / [`FuzzyError::UnknownLabel`] for
    ///   dangling rule references
    /// - [`FuzzyError::InvalidConfig`] for duplicate variable names
    pub fn new(
        inputs: Vec<LinguisticVariable>,
        output: LinguisticVariable,
        rules: RuleBase,
    ) -> FuzzyResult<Self> {
        if rules.is_empty() {
            return Err(FuzzyError::EmptyRuleBase);
        }
        for (i, var) in inputs.iter().enumerate() {
            if var.name() == output.name()
                || inputs[..i].iter().any(|other| other.name() == var.name())
            {
                return Err(FuzzyError::InvalidConfig(format!(
                    "variable '{}' declared more than once",
                    var.name()
                )));
            }
        }

        let compiled = rules
            .iter()
            .map(|rule| compile(rule, &inputs, &output))
            .collect::<FuzzyResult<Vec<_>>>()?;

        let mut referenced: Vec<usize> = compiled
            .iter()
            .flat_map(|r| r.clauses.iter().map(|&(v, _)| v))
            .collect();
        referenced.sort_unstable();
        referenced.dedup();

        let points: Vec<f64> = output.universe().points().collect();
        let output_samples = (0..output.len())
            .filter_map(|i| output.term_at(i))
            .map(|f| points.iter().map(|&u| f.evaluate(u)).collect())
            .collect();

        Ok(Self {
            inputs,
            output,
            rules,
            compiled,
            referenced,
            points,
            output_samples,
            config: EngineConfig::default(),
        })
    }

    /// Replaces the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn inputs(&self) -> &[LinguisticVariable] {
        &self.inputs
    }

    pub fn output(&self) -> &LinguisticVariable {
        &self.output
    }

    pub fn rules(&self) -> &RuleBase {
        &self.rules
    }

    /// Runs one inference and returns the crisp output.
    ///
    /// # Errors
    /// - [`FuzzyError::IncompleteAntecedent`] if a referenced variable has no value
    /// - [`FuzzyError::NoRuleFired`] if every rule has zero strength and the
    ///   policy is [`EmptyOutputPolicy::Error`]
    pub fn infer(&self, inputs: &Inputs) -> FuzzyResult<f64> {
        let degrees = self.fuzzify(inputs)?;
        let strengths = self.rule_strengths(&degrees);
        let aggregate = self.aggregate(&strengths);
        self.resolve(self.defuzzify(&aggregate))
    }

    /// Runs one inference and records every intermediate step.
    ///
    /// Unlike [`infer`](Self::infer), an empty aggregate is reported as
    /// `output: None` rather than an error.
    pub fn trace(&self, inputs: &Inputs) -> FuzzyResult<InferenceTrace> {
        let degrees = self.fuzzify(inputs)?;
        let strengths = self.rule_strengths(&degrees);
        let aggregate = self.aggregate(&strengths);
        let output = match self.defuzzify(&aggregate) {
            Some(v) => Some(v),
            None => match self.config.empty_output {
                EmptyOutputPolicy::Neutral(v) => Some(v),
                EmptyOutputPolicy::Error => None,
            },
        };

        let memberships = self
            .referenced
            .iter()
            .filter_map(|&v| {
                let var = &self.inputs[v];
                let d = degrees[v].as_ref()?;
                Some(VariableMembership {
                    variable: var.name().to_string(),
                    value: inputs.get(var.name())?,
                    degrees: var.labels().map(String::from).zip(d.iter().copied()).collect(),
                })
            })
            .collect();

        let activations = self
            .rules
            .iter()
            .zip(&strengths)
            .enumerate()
            .map(|(i, (rule, &strength))| RuleActivation {
                rule_index: i,
                strength,
                consequent: rule.consequent().label.clone(),
            })
            .collect();

        Ok(InferenceTrace {
            memberships,
            activations,
            aggregate,
            output,
        })
    }

    /// Fuzzifies every referenced input; unreferenced slots stay `None`.
    fn fuzzify(&self, inputs: &Inputs) -> FuzzyResult<Vec<Option<Vec<f64>>>> {
        let mut degrees = vec![None; self.inputs.len()];
        for &v in &self.referenced {
            let var = &self.inputs[v];
            let x = inputs
                .get(var.name())
                .ok_or_else(|| FuzzyError::IncompleteAntecedent {
                    variable: var.name().to_string(),
                })?;
            degrees[v] = Some(var.fuzzify(x));
        }
        Ok(degrees)
    }

    fn rule_strengths(&self, degrees: &[Option<Vec<f64>>]) -> Vec<f64> {
        self.compiled
            .iter()
            .map(|rule| {
                let clause_degrees: Vec<f64> = rule
                    .clauses
                    .iter()
                    .map(|&(v, l)| degrees[v].as_ref().map_or(0.0, |d| d[l]))
                    .collect();
                Rule::strength(&clause_degrees)
            })
            .collect()
    }

    /// Clips each output label at the strongest rule concluding it, then
    /// takes the pointwise maximum over labels.
    fn aggregate(&self, strengths: &[f64]) -> Vec<f64> {
        let mut label_strength = vec![0.0_f64; self.output_samples.len()];
        for (rule, &s) in self.compiled.iter().zip(strengths) {
            label_strength[rule.consequent] = label_strength[rule.consequent].max(s);
        }

        let mut aggregate = vec![0.0_f64; self.points.len()];
        for (samples, &s) in self.output_samples.iter().zip(&label_strength) {
            if s <= 0.0 {
                continue;
            }
            for (agg, &m) in aggregate.iter_mut().zip(samples) {
                *agg = agg.max(m.min(s));
            }
        }
        tracing::trace!(?label_strength, "aggregated rule strengths");
        aggregate
    }

    fn defuzzify(&self, aggregate: &[f64]) -> Option<f64> {
        self.config.defuzzification.apply(&self.points, aggregate)
    }

    fn resolve(&self, value: Option<f64>) -> FuzzyResult<f64> {
        match (value, self.config.empty_output) {
            (Some(v), _) => Ok(v),
            (None, EmptyOutputPolicy::Neutral(v)) => Ok(v),
            (None, EmptyOutputPolicy::Error) => Err(FuzzyError::NoRuleFired),
        }
    }
}

fn compile(
    rule: &Rule,
    inputs: &[LinguisticVariable],
    output: &LinguisticVariable,
) -> FuzzyResult<CompiledRule> {
    let clauses = rule
        .antecedent()
        .iter()
        .map(|clause| {
            let v = inputs
                .iter()
                .position(|var| var.name() == clause.variable)
                .ok_or_else(|| FuzzyError::UnknownVariable(clause.variable.clone()))?;
            let l = inputs[v]
                .label_index(&clause.label)
                .ok_or_else(|| FuzzyError::UnknownLabel {
                    variable: clause.variable.clone(),
                    label: clause.label.clone(),
                })?;
            Ok((v, l))
        })
        .collect::<FuzzyResult<Vec<_>>>()?;

    let consequent = rule.consequent();
    if consequent.variable != output.name() {
        return Err(FuzzyError::UnknownVariable(consequent.variable.clone()));
    }
    let consequent = output
        .label_index(&consequent.label)
        .ok_or_else(|| FuzzyError::UnknownLabel {
            variable: consequent.variable.clone(),
            label: consequent.label.clone(),
        })?;

    Ok(CompiledRule {
        clauses,
        consequent,
    })
}
