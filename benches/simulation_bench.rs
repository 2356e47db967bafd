use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mitosim::core::config::SimSettings;
use mitosim::model::{mammalian_cycle, GrowthCase, ParameterSet};
use mitosim::sim::FineStepper;

fn bench_mammalian_tick(c: &mut Criterion) {
    let cycle = mammalian_cycle(&ParameterSet::mammalian(), GrowthCase::Case1).unwrap();
    // target far enough out that the bench never finishes the run
    let settings = SimSettings::new(1e12, 5.0, 1e9);
    let mut simulation = cycle.net.simulation(settings).unwrap();
    c.bench_function("mammalian_tick", |b| {
        b.iter(|| simulation.step().unwrap())
    });
}

fn bench_fine_step_decay(c: &mut Criterion) {
    let stepper = FineStepper::new(500);
    c.bench_function("fine_step_decay_500", |b| {
        b.iter(|| black_box(stepper.decay_rate(black_box(0.005), black_box(0.3), 5.0)))
    });
}

criterion_group!(benches, bench_mammalian_tick, bench_fine_step_decay);
criterion_main!(benches);
