//! Compares the hand-tuned, genetically tuned and approximated controllers.
//!
//! Usage: `pendulum-compare [SEED]` (default seed 42). Set `RUST_LOG` to
//! change log verbosity.

use std::error::Error;

use tracing::info;
use u_fuzzy::approximator::{generate_training_set, KNearest, TrainingConfig};
use u_fuzzy::comparison::{compare, COMPARISON_CASES};
use u_fuzzy::controller::PendulumController;
use u_fuzzy::random::create_rng;
use u_fuzzy::tuning::{tune, TuningConfig};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<u64>()?,
        None => 42,
    };

    let hand_tuned = PendulumController::hand_tuned()?;

    let tuning = tune(&TuningConfig::default().with_seed(seed))?;
    info!(best = tuning.best_fitness, "best chromosome selected");
    let tuned = tuning.controller()?;

    let mut rng = create_rng(seed);
    let data_source = PendulumController::hand_tuned_two_input()?;
    let data = generate_training_set(&data_source, &TrainingConfig::default(), &mut rng)?;
    let (train, test) = data.split(0.3, seed);
    let model = KNearest::fit(&train, 5)?;
    info!(
        train_mse = train.mse(&model),
        test_mse = test.mse(&model),
        "approximator trained"
    );

    let report = compare(&hand_tuned, &tuned, &model, &COMPARISON_CASES);
    println!("{report}");
    Ok(())
}
