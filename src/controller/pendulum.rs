//! Inverted-pendulum fuzzy controller.
//!
//! Inputs are the pole angle (degrees) and angular velocity, optionally the
//! cart position and velocity; the output is the force applied to the cart.
//! Both controller variants share the 3×3 angle/angular-velocity rule
//! table. The hand-tuned variant adds position/velocity rules that push the
//! cart back toward the center.

use crate::error::FuzzyResult;
use crate::fuzzy::{
    InferenceEngine, InferenceTrace, Inputs, LinguisticVariable, MembershipFunction, Rule,
    RuleBase, Universe,
};

pub const ANGLE: &str = "angle";
pub const ANGULAR_VELOCITY: &str = "angular_velocity";
pub const POSITION: &str = "position";
pub const VELOCITY: &str = "velocity";
pub const FORCE: &str = "force";

/// `(angle, angular_velocity) -> force`, shared by every variant.
pub const ANGLE_RULES: [(&str, &str, &str); 9] = [
    ("left", "left", "strong_left"),
    ("left", "zero", "light_left"),
    ("left", "right", "neutral"),
    ("center", "left", "light_left"),
    ("center", "zero", "neutral"),
    ("center", "right", "light_right"),
    ("right", "left", "neutral"),
    ("right", "zero", "light_right"),
    ("right", "right", "strong_right"),
];

/// `(position, velocity) -> force`, hand-tuned variant only.
pub const CART_RULES: [(&str, &str, &str); 7] = [
    ("left", "left", "strong_right"),
    ("left", "zero", "light_right"),
    ("center", "left", "light_right"),
    ("center", "zero", "neutral"),
    ("center", "right", "light_left"),
    ("right", "zero", "light_left"),
    ("right", "right", "strong_left"),
];

pub fn angle_universe() -> FuzzyResult<Universe> {
    Universe::integer(-90, 90)
}

pub fn angular_velocity_universe() -> FuzzyResult<Universe> {
    Universe::integer(-100, 100)
}

pub fn position_universe() -> FuzzyResult<Universe> {
    Universe::integer(-10, 10)
}

pub fn velocity_universe() -> FuzzyResult<Universe> {
    Universe::integer(-5, 5)
}

pub fn force_universe() -> FuzzyResult<Universe> {
    Universe::integer(-100, 100)
}

/// One full state sample of the cart-pole.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PendulumState {
    pub angle: f64,
    pub angular_velocity: f64,
    pub position: f64,
    pub velocity: f64,
}

impl PendulumState {
    pub const fn new(angle: f64, angular_velocity: f64, position: f64, velocity: f64) -> Self {
        Self {
            angle,
            angular_velocity,
            position,
            velocity,
        }
    }
}

/// Which rule set a controller was assembled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerKind {
    /// Four inputs, 16 rules, hand-authored membership functions.
    HandTuned,
    /// Angle and angular velocity only, 9 rules, supplied membership functions.
    Tuned,
}

/// Three-label input variable: trapezoid shoulders around a center triangle.
fn shoulder_variable(
    name: &str,
    universe: Universe,
    labels: [&str; 3],
    plateau: f64,
) -> FuzzyResult<LinguisticVariable> {
    let (lo, hi) = (universe.min(), universe.max());
    LinguisticVariable::new(name, universe)
        .with_term(labels[0], MembershipFunction::trapezoidal(lo, lo, -plateau, 0.0)?)?
        .with_term(labels[1], MembershipFunction::triangular(-plateau, 0.0, plateau)?)?
        .with_term(labels[2], MembershipFunction::trapezoidal(0.0, plateau, hi, hi)?)
}

pub fn hand_tuned_angle() -> FuzzyResult<LinguisticVariable> {
    shoulder_variable(ANGLE, angle_universe()?, ["left", "center", "right"], 45.0)
}

pub fn hand_tuned_angular_velocity() -> FuzzyResult<LinguisticVariable> {
    shoulder_variable(
        ANGULAR_VELOCITY,
        angular_velocity_universe()?,
        ["left", "zero", "right"],
        50.0,
    )
}

pub fn hand_tuned_position() -> FuzzyResult<LinguisticVariable> {
    shoulder_variable(POSITION, position_universe()?, ["left", "center", "right"], 5.0)
}

pub fn hand_tuned_velocity() -> FuzzyResult<LinguisticVariable> {
    shoulder_variable(VELOCITY, velocity_universe()?, ["left", "zero", "right"], 2.0)
}

pub fn hand_tuned_force() -> FuzzyResult<LinguisticVariable> {
    LinguisticVariable::new(FORCE, force_universe()?)
        .with_term(
            "strong_left",
            MembershipFunction::trapezoidal(-100.0, -100.0, -50.0, -25.0)?,
        )?
        .with_term("light_left", MembershipFunction::triangular(-50.0, -25.0, 0.0)?)?
        .with_term("neutral", MembershipFunction::triangular(-25.0, 0.0, 25.0)?)?
        .with_term("light_right", MembershipFunction::triangular(0.0, 25.0, 50.0)?)?
        .with_term(
            "strong_right",
            MembershipFunction::trapezoidal(25.0, 50.0, 100.0, 100.0)?,
        )
}

fn table_rules<'a>(
    first: &'a str,
    second: &'a str,
    table: &'a [(&'a str, &'a str, &'a str)],
) -> impl Iterator<Item = Rule> + 'a {
    table
        .iter()
        .map(move |&(a, b, out)| Rule::when(first, a).and(second, b).then(FORCE, out))
}

/// The 9 angle/angular-velocity rules.
pub fn angle_rule_base() -> RuleBase {
    table_rules(ANGLE, ANGULAR_VELOCITY, &ANGLE_RULES).collect()
}

/// The 9 angle rules followed by the 7 cart rules.
pub fn hand_tuned_rule_base() -> RuleBase {
    let mut rules = angle_rule_base();
    rules.extend(table_rules(POSITION, VELOCITY, &CART_RULES));
    rules
}

/// A ready-to-evaluate pendulum controller.
///
/// # Examples
///
/// ```
/// use u_fuzzy::controller::PendulumController;
///
/// let controller = PendulumController::hand_tuned().unwrap();
/// let force = controller.evaluate(0.0, 0.0, Some(0.0), Some(0.0)).unwrap();
/// assert!(force.abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct PendulumController {
    engine: InferenceEngine,
    kind: ControllerKind,
}

impl PendulumController {
    /// Hand-tuned four-input controller.
    pub fn hand_tuned() -> FuzzyResult<Self> {
        let engine = InferenceEngine::new(
            vec![
                hand_tuned_angle()?,
                hand_tuned_angular_velocity()?,
                hand_tuned_position()?,
                hand_tuned_velocity()?,
            ],
            hand_tuned_force()?,
            hand_tuned_rule_base(),
        )?;
        Ok(Self {
            engine,
            kind: ControllerKind::HandTuned,
        })
    }

    /// Two-input controller over the hand-authored angle, angular-velocity
    /// and force variables and the 9-rule table.
    ///
    /// This is the untuned baseline of the tuning loop and the data source
    /// for approximator training.
    pub fn hand_tuned_two_input() -> FuzzyResult<Self> {
        Self::from_variables(
            hand_tuned_angle()?,
            hand_tuned_angular_velocity()?,
            hand_tuned_force()?,
        )
    }

    /// Two-input controller over the given variables and the 9-rule table.
    ///
    /// The variables must be named [`ANGLE`], [`ANGULAR_VELOCITY`] and
    /// [`FORCE`] and define the labels the rule table uses.
    pub fn from_variables(
        angle: LinguisticVariable,
        angular_velocity: LinguisticVariable,
        force: LinguisticVariable,
    ) -> FuzzyResult<Self> {
        let engine = InferenceEngine::new(vec![angle, angular_velocity], force, angle_rule_base())?;
        Ok(Self {
            engine,
            kind: ControllerKind::Tuned,
        })
    }

    /// Replaces the engine configuration (defuzzification, empty-output policy).
    pub fn with_engine_config(mut self, config: crate::fuzzy::EngineConfig) -> Self {
        self.engine = self.engine.with_config(config);
        self
    }

    pub fn kind(&self) -> ControllerKind {
        self.kind
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    /// Force for the given state.
    ///
    /// Missing position/velocity are treated as 0 by the hand-tuned
    /// controller and ignored by the tuned one.
    pub fn evaluate(
        &self,
        angle: f64,
        angular_velocity: f64,
        position: Option<f64>,
        velocity: Option<f64>,
    ) -> FuzzyResult<f64> {
        self.engine
            .infer(&self.inputs(angle, angular_velocity, position, velocity))
    }

    /// Force for a full state sample.
    pub fn evaluate_state(&self, state: &PendulumState) -> FuzzyResult<f64> {
        self.evaluate(
            state.angle,
            state.angular_velocity,
            Some(state.position),
            Some(state.velocity),
        )
    }

    /// Diagnostic trace for the given state.
    pub fn trace(
        &self,
        angle: f64,
        angular_velocity: f64,
        position: Option<f64>,
        velocity: Option<f64>,
    ) -> FuzzyResult<InferenceTrace> {
        self.engine
            .trace(&self.inputs(angle, angular_velocity, position, velocity))
    }

    fn inputs(
        &self,
        angle: f64,
        angular_velocity: f64,
        position: Option<f64>,
        velocity: Option<f64>,
    ) -> Inputs {
        let inputs = Inputs::new()
            .with(ANGLE, angle)
            .with(ANGULAR_VELOCITY, angular_velocity);
        match self.kind {
            ControllerKind::HandTuned => inputs
                .with(POSITION, position.unwrap_or(0.0))
                .with(VELOCITY, velocity.unwrap_or(0.0)),
            ControllerKind::Tuned => inputs,
        }
    }
}
