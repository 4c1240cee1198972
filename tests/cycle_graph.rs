//! End-to-end runs on small graphs with known community structure.

use rand::rngs::StdRng;
use rand::SeedableRng;
use u_locus::lga::{modularity, Evolution, GenotypeCodec, LgaConfig, LgaRunner, Phenotype};
use u_locus::{Error, Graph};

fn cycle4() -> Graph {
    Graph::from_edges([(0, 1), (1, 2), (2, 3), (3, 0)])
}

fn cycle_config() -> LgaConfig {
    LgaConfig::default()
        .with_population_size(20)
        .with_generations(30)
        .with_selection_rate(0.1)
        .with_crossover_rate(0.8)
        .with_mutation_rate(0.05)
        .with_parallel(false)
        .with_seed(2018)
}

#[test]
fn cycle_graph_converges() {
    let g = cycle4();
    for node in g.nodes() {
        assert_eq!(g.degree(*node), Some(2));
    }

    let result = LgaRunner::run(&g, &cycle_config()).unwrap();

    assert_eq!(result.best_fitness_history.len(), 30);
    assert_eq!(result.avg_fitness_history.len(), 30);
    for w in result.best_fitness_history.windows(2) {
        assert!(w[1] >= w[0], "best history decreased: {} -> {}", w[0], w[1]);
    }
    assert!(result.best_fitness >= 0.0);

    let phenotype = result.best.phenotype().expect("best individual is evaluated");
    assert_eq!(phenotype.sizes().iter().sum::<usize>(), 4);
    assert!((modularity(&g, phenotype).unwrap() - result.best_fitness).abs() < 1e-12);
}

#[test]
fn injected_rng_reproduces_single_run() {
    let g = cycle4();
    let codec = GenotypeCodec::build(&g).unwrap();
    let config = cycle_config();

    let a = Evolution::new(&g, &codec, &config)
        .run(&mut StdRng::seed_from_u64(17))
        .unwrap();
    let b = Evolution::new(&g, &codec, &config)
        .run(&mut StdRng::seed_from_u64(17))
        .unwrap();

    assert_eq!(a.best, b.best);
    assert_eq!(a.avg_fitness_history, b.avg_fitness_history);
    assert_eq!(a.best_fitness_history, b.best_fitness_history);
}

#[test]
fn karate_like_two_cliques() {
    // Two 5-cliques joined by a single edge.
    let mut edges = Vec::new();
    for base in [0, 5] {
        for i in 0..5 {
            for j in (i + 1)..5 {
                edges.push((base + i, base + j));
            }
        }
    }
    edges.push((4, 5));
    let g = Graph::from_edges(edges);

    let config = LgaConfig::reference()
        .with_evolution_runs(3)
        .with_population_size(40)
        .with_generations(40)
        .with_seed(1);
    let result = LgaRunner::run(&g, &config).unwrap();

    let split = Phenotype::new(vec![(0..5).collect(), (5..10).collect()]);
    let optimum = modularity(&g, &split).unwrap();
    assert!(
        (result.best_fitness - optimum).abs() < 1e-9,
        "expected {optimum}, got {}",
        result.best_fitness
    );
    assert_eq!(result.runs, 3);
    assert!(result.best_run < 3);
}

#[test]
fn empty_graph_is_rejected() {
    let err = LgaRunner::run(&Graph::new(), &cycle_config()).unwrap_err();
    assert!(matches!(err, Error::InvalidGraph(_)));
}
