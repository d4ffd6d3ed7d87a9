//! End-to-end controller scenarios.

use u_fuzzy::controller::{
    hand_tuned_angle, hand_tuned_angular_velocity, hand_tuned_force, PendulumController,
    PendulumState, FORCE,
};
use u_fuzzy::fuzzy::{Defuzzification, EmptyOutputPolicy, EngineConfig};
use u_fuzzy::tuning::Chromosome;
use u_fuzzy::FuzzyError;

fn hand_tuned_two_input() -> PendulumController {
    PendulumController::from_variables(
        hand_tuned_angle().unwrap(),
        hand_tuned_angular_velocity().unwrap(),
        hand_tuned_force().unwrap(),
    )
    .unwrap()
}

#[test]
fn neutral_state_gives_zero_force() {
    let c = PendulumController::hand_tuned().unwrap();
    let force = c
        .evaluate_state(&PendulumState::new(0.0, 0.0, 0.0, 0.0))
        .unwrap();
    assert!(force.abs() < 1e-9, "force {force}");
}

#[test]
fn opposing_saturated_rules_cancel() {
    // Angle rules fire strong_right, cart rules fire strong_left, both at 1
    let c = PendulumController::hand_tuned().unwrap();
    let trace = c.trace(90.0, 100.0, Some(10.0), Some(5.0)).unwrap();

    let fired: Vec<(&str, f64)> = trace
        .activations
        .iter()
        .filter(|a| a.strength > 0.0)
        .map(|a| (a.consequent.as_str(), a.strength))
        .collect();
    assert_eq!(fired, vec![("strong_right", 1.0), ("strong_left", 1.0)]);

    let force = trace.output.unwrap();
    assert!(force.abs() < 1e-9, "force {force}");
}

#[test]
fn saturated_two_input_gives_strong_right_centroid() {
    let c = hand_tuned_two_input();
    let force = c.evaluate(90.0, 100.0, None, None).unwrap();

    let expected = hand_tuned_force().unwrap().centroid("strong_right").unwrap();
    assert!((force - expected).abs() < 1e-9, "{force} vs {expected}");
    assert!((force - 4321.0 / 63.0).abs() < 1e-9);
    assert_eq!(c.engine().output().name(), FORCE);
}

#[test]
fn controller_output_is_antisymmetric() {
    let c = PendulumController::hand_tuned().unwrap();
    for &(a, v, p, w) in &[(-30.0, 20.0, 0.0, 0.0), (45.0, -10.0, -5.0, -2.0), (15.0, 5.0, 5.0, 1.0)] {
        let pos = c.evaluate(a, v, Some(p), Some(w)).unwrap();
        let neg = c.evaluate(-a, -v, Some(-p), Some(-w)).unwrap();
        assert!((pos + neg).abs() < 1e-9, "{pos} vs {neg}");
    }
}

#[test]
fn hand_tuned_chromosome_matches_hand_tuned_two_input() {
    let from_genes = Chromosome::hand_tuned().to_controller().unwrap();
    let direct = hand_tuned_two_input();
    for (a, v) in [(-30.0, 20.0), (45.0, -10.0), (0.0, 0.0), (15.0, 5.0), (-45.0, -30.0)] {
        assert_eq!(
            from_genes.evaluate(a, v, None, None).unwrap(),
            direct.evaluate(a, v, None, None).unwrap()
        );
    }
}

#[test]
fn empty_output_policy_decides_no_rule_fired() {
    // A collapsed chromosome fires nothing away from 80
    let mut genes = Chromosome::hand_tuned().genes().to_vec();
    for g in genes[0..22].iter_mut() {
        *g = 80.0;
    }
    let chromosome = Chromosome::new(genes).unwrap();

    let strict = chromosome.to_controller().unwrap();
    assert_eq!(strict.evaluate(0.0, 0.0, None, None), Err(FuzzyError::NoRuleFired));

    let lenient = strict.with_engine_config(
        EngineConfig::default().with_empty_output(EmptyOutputPolicy::Neutral(0.0)),
    );
    assert_eq!(lenient.evaluate(0.0, 0.0, None, None), Ok(0.0));
}

#[test]
fn defuzzification_methods_agree_on_sign() {
    for method in [
        Defuzzification::Centroid,
        Defuzzification::Bisector,
        Defuzzification::MeanOfMaximum,
        Defuzzification::SmallestOfMaximum,
        Defuzzification::LargestOfMaximum,
    ] {
        let c = hand_tuned_two_input()
            .with_engine_config(EngineConfig::default().with_defuzzification(method));
        let force = c.evaluate(60.0, 60.0, None, None).unwrap();
        assert!(force > 0.0, "{method:?} gave {force}");
    }
}
