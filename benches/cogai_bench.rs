//! Criterion benchmarks for the GA and backpropagation engines.
//!
//! Uses synthetic inputs (random planar cities, XOR) to measure pure
//! algorithm overhead.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use std::sync::Arc;
use u_cogai::ga::{Chromosome, CostMatrix, GaConfig, GaRunner};
use u_cogai::nn::{Backpropagation, NetworkConfig};
use u_cogai::random::create_rng;

/// Euclidean distances between `n` random points in the unit square.
fn random_cities(n: usize, seed: u64) -> Arc<CostMatrix> {
    let mut rng = create_rng(seed);
    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)))
        .collect();
    let costs = CostMatrix::from_fn(n, |i, j| {
        let (dx, dy) = (points[i].0 - points[j].0, points[i].1 - points[j].1);
        (dx * dx + dy * dy).sqrt()
    })
    .expect("n > 0");
    Arc::new(costs)
}

fn bench_ga_evolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_evolve");
    group.sample_size(10);

    for &n in &[10usize, 30, 60] {
        let costs = random_cities(n, 7);
        let config = GaConfig::new(100, 50).with_seed(42);
        group.bench_with_input(BenchmarkId::new("cities", n), &n, |b, _| {
            b.iter(|| {
                GaRunner::run(Arc::clone(&costs), black_box(&config)).expect("valid config")
            });
        });
    }
    group.finish();
}

fn bench_crossover(c: &mut Criterion) {
    let costs = random_cities(200, 3);
    let mut rng = create_rng(42);
    let a = Chromosome::randomize(&costs, &mut rng);
    let b = Chromosome::randomize(&costs, &mut rng);

    c.bench_function("ox_crossover_200", |bench| {
        bench.iter(|| Chromosome::crossover(black_box(&a), black_box(&b), &mut rng));
    });
}

fn bench_train(c: &mut Criterion) {
    let mut group = c.benchmark_group("nn_train");

    for layers in [vec![2, 2, 1], vec![16, 32, 8], vec![64, 64, 64, 10]] {
        let label = format!("{layers:?}");
        let config = NetworkConfig::new(layers.clone()).with_seed(42);
        let mut net = Backpropagation::new(&config).expect("valid config");
        let inputs = vec![0.5; layers[0]];
        let expected = vec![0.25; *layers.last().expect("non-empty")];

        group.bench_function(BenchmarkId::new("step", label), |b| {
            b.iter(|| net.train(black_box(&inputs), black_box(&expected)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ga_evolve, bench_crossover, bench_train);
criterion_main!(benches);
