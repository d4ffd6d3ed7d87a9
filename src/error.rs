//! Error types shared by the fuzzy engine, controller assembly and tuning loop.

use thiserror::Error;

/// Root error type for fuzzy inference and controller construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FuzzyError {
    /// A rule references an input variable that was not supplied.
    ///
    /// Fatal to the single inference call only.
    #[error("incomplete antecedent: no input supplied for variable '{variable}'")]
    IncompleteAntecedent { variable: String },

    /// Every rule fired with zero strength, so the aggregated output set is empty.
    #[error("no rule fired: aggregated output set is identically zero")]
    NoRuleFired,

    /// A chromosome could not be decoded into usable membership functions.
    #[error("invalid chromosome: {0}")]
    InvalidChromosome(String),

    /// A universe of discourse has non-finite bounds, an empty range or a bad step.
    #[error("invalid universe: {0}")]
    InvalidUniverse(String),

    /// Membership function breakpoints are not finite or not ordered.
    #[error("invalid membership function: {0}")]
    InvalidMembership(String),

    /// A rule references a variable the engine does not declare.
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    /// A rule references a label the variable does not define.
    #[error("variable '{variable}' has no label '{label}'")]
    UnknownLabel { variable: String, label: String },

    /// A label was defined twice on one variable.
    #[error("variable '{variable}' already defines label '{label}'")]
    DuplicateLabel { variable: String, label: String },

    /// The engine was built without any rules.
    #[error("rule base is empty")]
    EmptyRuleBase,

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias used throughout the crate.
pub type FuzzyResult<T> = Result<T, FuzzyError>;
