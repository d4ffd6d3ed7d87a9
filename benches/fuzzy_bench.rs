//! Criterion benchmarks for fuzzy inference and membership-function tuning.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_fuzzy::comparison::COMPARISON_CASES;
use u_fuzzy::controller::PendulumController;
use u_fuzzy::fuzzy::{Defuzzification, EngineConfig};
use u_fuzzy::tuning::{tune, Benchmark, Chromosome, TuningConfig};

// ===========================================================================
// Inference
// ===========================================================================

fn bench_inference(c: &mut Criterion) {
    let mut group = c.benchmark_group("inference");

    let hand_tuned = PendulumController::hand_tuned().unwrap();
    group.bench_function("hand_tuned_4_inputs", |b| {
        b.iter(|| {
            for state in &COMPARISON_CASES {
                black_box(hand_tuned.evaluate_state(black_box(state)).unwrap());
            }
        })
    });

    for method in [
        Defuzzification::Centroid,
        Defuzzification::Bisector,
        Defuzzification::MeanOfMaximum,
    ] {
        let controller = Chromosome::hand_tuned()
            .to_controller()
            .unwrap()
            .with_engine_config(EngineConfig::default().with_defuzzification(method));
        group.bench_with_input(
            BenchmarkId::new("two_input", format!("{method:?}")),
            &controller,
            |b, ctrl| {
                b.iter(|| {
                    for state in &COMPARISON_CASES {
                        black_box(
                            ctrl.evaluate(black_box(state.angle), black_box(state.angular_velocity), None, None)
                                .unwrap(),
                        );
                    }
                })
            },
        );
    }
    group.finish();
}

// ===========================================================================
// Fitness and tuning
// ===========================================================================

fn bench_fitness(c: &mut Criterion) {
    let benchmark = Benchmark::default();
    let chromosome = Chromosome::hand_tuned();
    c.bench_function("fitness_hand_tuned_chromosome", |b| {
        b.iter(|| black_box(benchmark.evaluate(black_box(&chromosome))))
    });
}

fn bench_tuning(c: &mut Criterion) {
    let mut group = c.benchmark_group("tuning");
    group.sample_size(10);

    for (pop, gen) in [(20usize, 5usize), (50, 20)] {
        let config = TuningConfig::default()
            .with_population_size(pop)
            .with_generations(gen)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("p{}_g{}", pop, gen), pop),
            &config,
            |b, cfg| {
                b.iter(|| {
                    let result = tune(black_box(cfg)).unwrap();
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_inference, bench_fitness, bench_tuning);
criterion_main!(benches);
