// Benchmarks for exact k-NN and the association statistics
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use weatlab_core::association::group_effect_size;
use weatlab_core::{k_nearest, VectorStore};

fn random_store(size: usize, dim: usize) -> VectorStore {
    let mut rng = rand::rng();
    let entries = (0..size).map(|i| {
        let v: Vec<f64> = (0..dim).map(|_| rng.random_range(-1.0..1.0)).collect();
        (format!("w{}", i), v)
    });
    VectorStore::build(entries.collect::<Vec<_>>()).unwrap()
}

fn benchmark_k_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("k_nearest");

    for size in [1_000, 10_000, 100_000].iter() {
        let store = random_store(*size, 100);
        let query = store.embedding(0);
        group.bench_with_input(BenchmarkId::new("top10", size), size, |b, _| {
            b.iter(|| k_nearest(black_box(query.vector), query.norm, &store, 10).unwrap());
        });
    }

    group.finish();
}

fn benchmark_effect_size(c: &mut Criterion) {
    let store = random_store(400, 300);
    let all: Vec<usize> = (0..store.len()).collect();
    let groups: Vec<_> = all.chunks(100).map(|idx| store.embeddings(idx).unwrap()).collect();

    c.bench_function("group_effect_size_100x4", |b| {
        b.iter(|| {
            group_effect_size(
                black_box(&groups[0]),
                &groups[1],
                &groups[2],
                &groups[3],
            )
            .unwrap()
        });
    });
}

criterion_group!(benches, benchmark_k_nearest, benchmark_effect_size);
criterion_main!(benches);
