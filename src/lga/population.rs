//! Population creation, evaluation and ranking.

use super::codec::GenotypeCodec;
use super::fitness::modularity;
use super::types::{Evaluation, Individual};
use crate::error::{Error, Result};
use crate::graph::Graph;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Creates `size` unevaluated individuals with random genotypes.
pub fn generate<R: Rng>(codec: &GenotypeCodec, size: usize, rng: &mut R) -> Result<Vec<Individual>> {
    (0..size)
        .map(|_| codec.generate_genotype(rng).map(Individual::new))
        .collect()
}

/// Decodes and scores every unevaluated individual, then ranks the
/// population by descending fitness.
///
/// The sort is stable, so equal-fitness individuals keep their relative
/// order. Evaluation consumes no randomness: the parallel and sequential
/// paths return identical populations.
pub fn evaluate(
    graph: &Graph,
    codec: &GenotypeCodec,
    population: Vec<Individual>,
    parallel: bool,
) -> Result<Vec<Individual>> {
    let mut population = evaluate_all(graph, codec, population, parallel)?;
    rank(&mut population);
    Ok(population)
}

fn evaluate_one(graph: &Graph, codec: &GenotypeCodec, mut ind: Individual) -> Result<Individual> {
    if !ind.is_evaluated() {
        let phenotype = codec.decode(ind.genotype())?;
        let fitness = modularity(graph, &phenotype)?;
        ind.set_evaluation(Evaluation { phenotype, fitness });
    }
    Ok(ind)
}

#[cfg(feature = "parallel")]
fn evaluate_all(
    graph: &Graph,
    codec: &GenotypeCodec,
    population: Vec<Individual>,
    parallel: bool,
) -> Result<Vec<Individual>> {
    if parallel {
        population
            .into_par_iter()
            .map(|ind| evaluate_one(graph, codec, ind))
            .collect()
    } else {
        population
            .into_iter()
            .map(|ind| evaluate_one(graph, codec, ind))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_all(
    graph: &Graph,
    codec: &GenotypeCodec,
    population: Vec<Individual>,
    _parallel: bool,
) -> Result<Vec<Individual>> {
    population
        .into_iter()
        .map(|ind| evaluate_one(graph, codec, ind))
        .collect()
}

/// Sorts by descending fitness; unevaluated individuals sink to the end.
fn rank(population: &mut [Individual]) {
    population.sort_by(|a, b| {
        let fa = a.fitness().unwrap_or(f64::NEG_INFINITY);
        let fb = b.fitness().unwrap_or(f64::NEG_INFINITY);
        fb.partial_cmp(&fa).unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Mean fitness of the evaluated individuals, or `None` if there are none.
pub fn mean_fitness(population: &[Individual]) -> Option<f64> {
    let (sum, count) = population
        .iter()
        .filter_map(Individual::fitness)
        .fold((0.0, 0usize), |(s, c), f| (s + f, c + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Top individual of a ranked population.
///
/// # Errors
/// [`Error::EmptyPopulation`] if `population` is empty.
pub fn best(population: &[Individual]) -> Result<&Individual> {
    population.first().ok_or(Error::EmptyPopulation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn two_triangles() -> Graph {
        Graph::from_edges([(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3)])
    }

    #[test]
    fn test_generate_unevaluated() {
        let g = two_triangles();
        let codec = GenotypeCodec::build(&g).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let pop = generate(&codec, 12, &mut rng).unwrap();
        assert_eq!(pop.len(), 12);
        assert!(pop.iter().all(|ind| !ind.is_evaluated()));
        assert!(pop.iter().all(|ind| ind.genotype().len() == 6));
    }

    #[test]
    fn test_evaluate_sorts_descending() {
        let g = two_triangles();
        let codec = GenotypeCodec::build(&g).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let pop = generate(&codec, 30, &mut rng).unwrap();
        let pop = evaluate(&g, &codec, pop, false).unwrap();

        assert!(pop.iter().all(Individual::is_evaluated));
        for w in pop.windows(2) {
            assert!(w[0].fitness().unwrap() >= w[1].fitness().unwrap());
        }
    }

    #[test]
    fn test_evaluate_matches_direct_modularity() {
        let g = two_triangles();
        let codec = GenotypeCodec::build(&g).unwrap();
        let pop = vec![Individual::new(vec![1, 2, 0, 4, 5, 3])];
        let pop = evaluate(&g, &codec, pop, false).unwrap();
        assert!((pop[0].fitness().unwrap() - 5.0 / 14.0).abs() < 1e-12);
        assert_eq!(pop[0].phenotype().unwrap().len(), 2);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let g = two_triangles();
        let codec = GenotypeCodec::build(&g).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        let pop = generate(&codec, 40, &mut rng).unwrap();
        let seq = evaluate(&g, &codec, pop.clone(), false).unwrap();
        let par = evaluate(&g, &codec, pop, true).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_mean_and_best() {
        let g = two_triangles();
        let codec = GenotypeCodec::build(&g).unwrap();
        assert!(mean_fitness(&[]).is_none());
        assert_eq!(best(&[]).unwrap_err(), Error::EmptyPopulation);

        let pop = vec![
            Individual::new(vec![1, 2, 0, 4, 5, 3]),
            Individual::new(vec![1, 2, 3, 4, 5, 3]),
        ];
        let pop = evaluate(&g, &codec, pop, false).unwrap();
        let mean = mean_fitness(&pop).unwrap();
        assert!((mean - (5.0 / 14.0) / 2.0).abs() < 1e-12);
        assert!((best(&pop).unwrap().fitness().unwrap() - 5.0 / 14.0).abs() < 1e-12);
    }
}
