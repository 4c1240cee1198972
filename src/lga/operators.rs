//! Genetic operators for locus-encoded partitions.
//!
//! Every operator reads a whole population and returns a new one; nothing
//! is changed in place behind the caller's back.
//!
//! # Operators
//!
//! - [`select`]: truncation selection of the top-ranked fraction
//! - [`crossover`]: uniform crossover refilling the population to size
//! - [`mutate`]: per-locus neighbor resampling
//!
//! Uniform crossover and neighbor resampling both keep every locus pointing
//! at a real neighbor, so offspring are always decodable.
//!
//! # References
//!
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"
//! - Pizzuti (2008), "GA-Net: A Genetic Algorithm for Community Detection
//!   in Social Networks"

use super::codec::GenotypeCodec;
use super::types::{Genotype, Individual};
use crate::error::{Error, Result};
use rand::Rng;

/// Absorbs floating error in `rate × size` before rounding up.
const RATE_EPSILON: f64 = 1e-9;

/// Number of survivors kept by truncation selection: `ceil(rate × size)`
/// clamped to `[1, size]`.
pub fn survivor_count(size: usize, rate: f64) -> usize {
    let raw = (rate * size as f64 - RATE_EPSILON).ceil();
    (raw.max(1.0) as usize).min(size)
}

/// Truncation selection.
///
/// `population` must already be ranked (descending fitness). Returns the
/// top [`survivor_count`] individuals.
///
/// # Errors
/// [`Error::EmptyPopulation`] if `population` is empty.
pub fn select(population: &[Individual], rate: f64) -> Result<Vec<Individual>> {
    if population.is_empty() {
        return Err(Error::EmptyPopulation);
    }
    let keep = survivor_count(population.len(), rate);
    Ok(population[..keep].to_vec())
}

/// Refills `survivors` to `target_size` with offspring.
///
/// Survivors are carried over unchanged and come first. Offspring are
/// produced two per pairing; if the gap is odd, one extra pairing
/// contributes a single child picked by a fair coin.
///
/// Parents are two distinct survivors drawn uniformly. With a single
/// survivor, the second parent is a fresh random genotype. A pairing
/// recombines with probability `rate` (uniform crossover), otherwise the
/// children are plain copies of the parents.
///
/// If there are already `target_size` or more survivors, the first
/// `target_size` are returned.
///
/// # Errors
/// [`Error::EmptyPopulation`] if `survivors` is empty.
pub fn crossover<R: Rng>(
    codec: &GenotypeCodec,
    survivors: &[Individual],
    target_size: usize,
    rate: f64,
    rng: &mut R,
) -> Result<Vec<Individual>> {
    if survivors.is_empty() {
        return Err(Error::EmptyPopulation);
    }
    if survivors.len() >= target_size {
        return Ok(survivors[..target_size].to_vec());
    }

    let gap = target_size - survivors.len();
    let mut next = Vec::with_capacity(target_size);
    next.extend_from_slice(survivors);

    for _ in 0..gap / 2 {
        let (c1, c2) = breed(codec, survivors, rate, rng)?;
        next.push(Individual::new(c1));
        next.push(Individual::new(c2));
    }

    if gap % 2 == 1 {
        let (c1, c2) = breed(codec, survivors, rate, rng)?;
        let child = if rng.random_bool(0.5) { c2 } else { c1 };
        next.push(Individual::new(child));
    }

    Ok(next)
}

/// Picks parents and produces two children.
fn breed<R: Rng>(
    codec: &GenotypeCodec,
    survivors: &[Individual],
    rate: f64,
    rng: &mut R,
) -> Result<(Genotype, Genotype)> {
    let (px, py): (&[usize], Genotype) = if survivors.len() == 1 {
        (survivors[0].genotype(), codec.generate_genotype(rng)?)
    } else {
        let (i, j) = distinct_pair(survivors.len(), rng);
        (survivors[i].genotype(), survivors[j].genotype().to_vec())
    };

    if rng.random::<f64>() < rate {
        Ok(uniform_crossover(px, &py, rng))
    } else {
        Ok((px.to_vec(), py))
    }
}

/// Two distinct indices in `0..n` (n ≥ 2), uniform without replacement.
fn distinct_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    (i, j)
}

/// Uniform crossover: one fair coin per locus decides which parent feeds
/// which child.
///
/// # Panics
/// Panics if the parents differ in length.
pub fn uniform_crossover<R: Rng>(
    parent_x: &[usize],
    parent_y: &[usize],
    rng: &mut R,
) -> (Genotype, Genotype) {
    assert_eq!(
        parent_x.len(),
        parent_y.len(),
        "parents must have equal length"
    );

    let mut child1 = Vec::with_capacity(parent_x.len());
    let mut child2 = Vec::with_capacity(parent_x.len());
    for (&x, &y) in parent_x.iter().zip(parent_y) {
        if rng.random_bool(0.5) {
            child1.push(y);
            child2.push(x);
        } else {
            child1.push(x);
            child2.push(y);
        }
    }
    (child1, child2)
}

/// Per-locus mutation.
///
/// Every locus of every individual is resampled with probability `rate`
/// from the full neighbor distribution, which may return the same value.
/// Individuals that draw no resample keep their evaluation; the rest are
/// reset to unevaluated.
pub fn mutate<R: Rng>(
    codec: &GenotypeCodec,
    population: &[Individual],
    rate: f64,
    rng: &mut R,
) -> Result<Vec<Individual>> {
    population
        .iter()
        .map(|ind| -> Result<Individual> {
            let mut out = ind.clone();
            for locus in 0..ind.genotype().len() {
                if rng.random::<f64>() < rate {
                    out.genotype_mut()[locus] = codec.random_gene(locus, rng)?;
                }
            }
            Ok(out)
        })
        .collect()
}
