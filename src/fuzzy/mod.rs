//! Mamdani fuzzy inference.
//!
//! A generic, domain-agnostic fuzzy inference engine. Users declare
//! [`LinguisticVariable`]s over bounded [`Universe`]s, write a [`RuleBase`]
//! with the [`Rule::when`] builder, and evaluate crisp [`Inputs`] through an
//! [`InferenceEngine`].
//!
//! # Pipeline
//!
//! 1. **Fuzzification**: degree of each input in each of its labels
//! 2. **Rule strength**: minimum over a rule's antecedent degrees
//! 3. **Implication**: consequent set clipped at the rule strength
//! 4. **Aggregation**: pointwise maximum over all clipped sets
//! 5. **Defuzzification**: centroid (default) over the discretized output universe
//!
//! # Key Types
//!
//! - [`MembershipFunction`]: trapezoidal and triangular shapes
//! - [`LinguisticVariable`]: labeled membership functions over one universe
//! - [`RuleBase`]: ordered rules, each an explicit list of clauses
//! - [`InferenceEngine`]: immutable, reusable evaluator
//! - [`EngineConfig`]: defuzzification method and empty-output policy
//!
//! # References
//!
//! - Zadeh (1965), "Fuzzy sets", *Information and Control* 8(3)
//! - Mamdani & Assilian (1975), "An experiment in linguistic synthesis with a
//!   fuzzy logic controller"

mod config;
mod engine;
mod membership;
mod rule;
mod universe;
mod variable;

pub use config::{Defuzzification, EmptyOutputPolicy, EngineConfig};
pub use engine::{InferenceEngine, InferenceTrace, Inputs, RuleActivation, VariableMembership};
pub use membership::{MembershipFunction, MembershipKind};
pub use rule::{Clause, Rule, RuleBase, RuleBuilder};
pub use universe::Universe;
pub use variable::LinguisticVariable;
