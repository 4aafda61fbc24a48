use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matrix_core::config::AppConfig;
use matrix_core::field::FoodGrid;
use matrix_core::Simulation;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn bench_automaton_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("automaton_step");
    for &(w, h) in &[(72u16, 48u16), (256, 256)] {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut grid = FoodGrid::new(w, h);
        grid.seed(0.3, &mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(format!("{w}x{h}")), &(), |b, _| {
            b.iter(|| grid.step(black_box(0.00055), &mut rng))
        });
    }
    group.finish();
}

fn bench_simulation_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_tick");
    for &agents in &[60usize, 120] {
        let mut config = AppConfig::default();
        config.world.seed = Some(42);
        config.world.initial_agents = agents;
        config.evolution.max_agents = agents.max(config.evolution.max_agents);
        config.telemetry.log_interval = 0;
        let Ok(mut sim) = Simulation::new(config) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(agents), &agents, |b, _| {
            b.iter(|| black_box(sim.tick(1.0)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_automaton_step, bench_simulation_tick);
criterion_main!(benches);
