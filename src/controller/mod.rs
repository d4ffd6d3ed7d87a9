//! Controller assembly for the inverted-pendulum benchmark.
//!
//! Builds [`PendulumController`]s on top of the generic
//! [`InferenceEngine`](crate::fuzzy::InferenceEngine): either from the
//! hand-authored membership functions, or from variables decoded out of a
//! tuned [`Chromosome`](crate::tuning::Chromosome).
//!
//! The "pendulum" is never simulated; controllers are static maps from a
//! state sample to a force.

mod pendulum;

pub use pendulum::{
    angle_rule_base, angle_universe, angular_velocity_universe, force_universe,
    hand_tuned_angle, hand_tuned_angular_velocity, hand_tuned_force, hand_tuned_position,
    hand_tuned_rule_base, hand_tuned_velocity, position_universe, velocity_universe,
    ControllerKind, PendulumController, PendulumState, ANGLE, ANGLE_RULES, ANGULAR_VELOCITY,
    CART_RULES, FORCE, POSITION, VELOCITY,
};
