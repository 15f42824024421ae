use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use itc_runtime::{
    NeuronConfig, Population, SceneObject, SimulationEngine, SimulationParams, StimulusEpoch,
};

fn neuron_config() -> NeuronConfig {
    NeuronConfig::with_preferences([("car", 0.8), ("van", 0.4), ("bus", 0.1)])
        .dynamics("tamura")
        .position("gaussian")
        .size("lognormal")
        .occlusion("two_input_sigmoid")
}

fn scene() -> Vec<SceneObject> {
    vec![
        SceneObject::new("car", 0.1, 0.0, 0.2),
        SceneObject::new("van", -0.2, 0.1, 0.3).with_visibility(0.7, 0.5),
    ]
}

fn bench_population_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("itc_population_step");
    let scene = scene();

    for &n in &[16u32, 128u32, 1024u32] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("two_objects", n), &n, |b, &n| {
            let mut population = Population::new(n, &neuron_config(), 1234).expect("bench population");
            b.iter(|| population.step(&scene).unwrap());
        });
    }

    group.finish();
}

fn bench_simulation_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("itc_simulation_run");
    // 1 s of simulated time keeps benches fast in CI
    let steps = 200;

    for &n in &[16u32, 64u32] {
        group.throughput(Throughput::Elements(n as u64 * steps as u64));
        group.bench_with_input(BenchmarkId::new("spikes", n), &n, |b, &n| {
            b.iter_batched(
                || {
                    let population = Population::new(n, &neuron_config(), 1234).expect("bench population");
                    let params = SimulationParams::new(steps).unwrap().with_spikes(true).with_seed(1);
                    let mut engine = SimulationEngine::new(population, params).unwrap();
                    engine
                        .add_stimulus(StimulusEpoch::new(20, 120, scene()).unwrap())
                        .unwrap();
                    engine
                },
                |mut engine| {
                    let _res = engine.run().unwrap();
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_population_step, bench_simulation_run);
criterion_main!(benches);
