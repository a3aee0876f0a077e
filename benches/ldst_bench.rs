//! Criterion benchmarks for the annealer and its kernels.
//!
//! Uses complete graphs with deterministic pseudo-random weights so the
//! numbers measure algorithm overhead only.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use u_ldst::anneal::{AnnealConfig, AnnealRunner};
use u_ldst::graph::Graph;
use u_ldst::initial::InitialTree;
use u_ldst::neighbor::Transition;

fn weighted_complete(n: usize) -> Graph {
    Graph::complete(n, |a, b| ((a * 31 + b * 17) % 97 + 1) as f64).unwrap()
}

fn bench_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("kernel");
    for n in [16, 64] {
        let graph = weighted_complete(n);
        let mut rng = StdRng::seed_from_u64(42);
        let tree = InitialTree::RandomGreedy.build(&graph, &mut rng).unwrap();
        for kernel in [Transition::CycleSwap, Transition::RandomSwap] {
            group.bench_with_input(
                BenchmarkId::new(format!("{kernel:?}"), n),
                &n,
                |b, _| b.iter(|| kernel.propose(black_box(&graph), black_box(&tree), &mut rng)),
            );
        }
    }
    group.finish();
}

fn bench_anneal(c: &mut Criterion) {
    let mut group = c.benchmark_group("anneal");
    group.sample_size(10);
    for n in [16, 32] {
        let graph = weighted_complete(n);
        let config = AnnealConfig::default()
            .with_stopping_iteration(2_000)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| AnnealRunner::run(black_box(&graph), &config))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_kernels, bench_anneal);
criterion_main!(benches);
