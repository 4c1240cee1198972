//! Criterion benchmarks for u-locus.
//!
//! Uses a ring of cliques (planted partition) so that decode, modularity
//! and the full evolutionary loop run on a graph with clear structure.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use u_locus::lga::{modularity, GenotypeCodec, LgaConfig, LgaRunner};
use u_locus::Graph;

/// `k` cliques of size `s`, consecutive cliques joined by one edge.
fn ring_of_cliques(k: usize, s: usize) -> Graph {
    let mut g = Graph::new();
    for c in 0..k {
        let base = c * s;
        for i in 0..s {
            for j in (i + 1)..s {
                g.add_edge(base + i, base + j);
            }
        }
        g.add_edge(base + s - 1, ((c + 1) % k) * s);
    }
    g
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for &k in &[8, 32, 128] {
        let g = ring_of_cliques(k, 8);
        let codec = GenotypeCodec::build(&g).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let genotype = codec.generate_genotype(&mut rng).unwrap();
        group.bench_with_input(BenchmarkId::new("nodes", k * 8), &genotype, |b, gt| {
            b.iter(|| codec.decode(black_box(gt)).unwrap());
        });
    }
    group.finish();
}

fn bench_modularity(c: &mut Criterion) {
    let mut group = c.benchmark_group("modularity");
    for &k in &[8, 32, 128] {
        let g = ring_of_cliques(k, 8);
        let codec = GenotypeCodec::build(&g).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let phenotype = codec
            .decode(&codec.generate_genotype(&mut rng).unwrap())
            .unwrap();
        group.bench_with_input(BenchmarkId::new("nodes", k * 8), &phenotype, |b, p| {
            b.iter(|| modularity(&g, black_box(p)).unwrap());
        });
    }
    group.finish();
}

fn bench_run(c: &mut Criterion) {
    let g = ring_of_cliques(16, 6);
    let config = LgaConfig::default()
        .with_population_size(50)
        .with_generations(30)
        .with_crossover_rate(0.8)
        .with_seed(42);

    let mut group = c.benchmark_group("lga_run");
    group.sample_size(10);
    group.bench_function("sequential", |b| {
        let config = config.clone().with_parallel(false);
        b.iter(|| LgaRunner::run(black_box(&g), &config).unwrap());
    });
    group.bench_function("parallel", |b| {
        let config = config.clone().with_parallel(true);
        b.iter(|| LgaRunner::run(black_box(&g), &config).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_decode, bench_modularity, bench_run);
criterion_main!(benches);
