//! Simulation Benchmarks with 95% Confidence Intervals
//!
//! Measures the per-tick cost of the engine and its two hot paths:
//! the RK4 step and the functional-response evaluation.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use biomass_sim::engine::{functional_response, rk4_step, run_rk4_simulation};
use biomass_sim::model::{FunctionalResponseKind, Interaction, Scenario, Species};
use biomass_sim::scenarios::{predator_prey, PredatorPreyConfig};

/// Food chain of `n` species where species `i + 1` preys on species `i`.
fn food_chain(n: usize) -> Scenario {
    let species = (0..n)
        .map(|i| {
            let s = Species::new(format!("S{i}"), 100.0, if i == 0 { 0.8 } else { -0.1 });
            if i == 0 {
                s.with_carrying_capacity(1000.0)
            } else {
                s
            }
        })
        .collect();
    let interactions = (1..n)
        .map(|i| {
            Interaction::new(format!("S{i}"), format!("S{}", i - 1), 0.001)
                .with_efficiency(0.1)
                .with_handling_time(0.5)
        })
        .collect();
    Scenario::new(species, interactions, 0.1, 5.0)
}

/// Full Rabbit/Fox run (200 ticks).
fn bench_predator_prey_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("PredatorPrey");
    group.sample_size(100);
    group.confidence_level(0.95);

    let scenario = predator_prey();
    group.bench_function("run_20_years", |b| {
        b.iter(|| {
            let mut s = scenario.clone();
            black_box(run_rk4_simulation(&mut s))
        });
    });

    let fine = PredatorPreyConfig {
        time_step: 0.01,
        ..Default::default()
    }
    .build();
    group.bench_function("run_20_years_fine_step", |b| {
        b.iter(|| {
            let mut s = fine.clone();
            black_box(run_rk4_simulation(&mut s))
        });
    });

    group.finish();
}

/// Scaling with the number of species.
fn bench_food_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("FoodChain");
    group.sample_size(50);
    group.confidence_level(0.95);

    for n in [2, 8, 32].iter() {
        let scenario = food_chain(*n);
        group.bench_with_input(BenchmarkId::new("run", n), &scenario, |b, scenario| {
            b.iter(|| {
                let mut s = scenario.clone();
                black_box(run_rk4_simulation(&mut s))
            });
        });
    }

    group.finish();
}

fn bench_rk4_step(c: &mut Criterion) {
    c.bench_function("rk4_step_logistic", |b| {
        b.iter(|| {
            rk4_step(
                black_box(0.0),
                black_box(500.0),
                black_box(0.1),
                |_, y| 0.8 * (1.0 - y / 1000.0),
            )
        });
    });
}

fn bench_functional_response(c: &mut Criterion) {
    let mut group = c.benchmark_group("FunctionalResponse");

    for kind in [
        FunctionalResponseKind::TypeI,
        FunctionalResponseKind::TypeII,
        FunctionalResponseKind::TypeIII,
    ] {
        let interaction = Interaction::new("Fox", "Rabbit", 0.01)
            .with_response(kind)
            .with_handling_time(0.5);
        group.bench_with_input(
            BenchmarkId::new("consumption", kind.label()),
            &interaction,
            |b, interaction| {
                b.iter(|| functional_response(interaction, black_box(50.0), black_box(500.0)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_predator_prey_run,
    bench_food_chain,
    bench_rk4_step,
    bench_functional_response,
);
criterion_main!(benches);
