//! Locus-based Genetic Algorithm (LGA) for community detection.
//!
//! Individuals encode a partition with one locus per node: locus `i` holds
//! the gene index of one of node `i`'s neighbors. Decoding takes the
//! connected components of these locus links, so every decoded community
//! is connected and the number of communities emerges from evolution
//! instead of being fixed in advance. Fitness is Newman modularity.
//!
//! # Key Types
//!
//! - [`GenotypeCodec`]: Per-graph gene ↔ node mapping, neighbor lists, decoding
//! - [`Individual`]: Genotype plus optional decoded phenotype and fitness
//! - [`LgaConfig`]: Algorithm parameters (runs, generations, rates, presets)
//! - [`Evolution`]: One run as a step-wise state machine
//! - [`LgaRunner`]: Independent runs, best-of selection
//! - [`EvolutionResult`]: Best partition and convergence history
//!
//! # Submodules
//!
//! - [`operators`]: Truncation selection, uniform crossover, locus mutation
//! - [`population`]: Population generation, evaluation and ranking
//!
//! # References
//!
//! - Park & Song (1989), "A Genetic Algorithm for Clustering Problems"
//! - Pizzuti (2008), "GA-Net: A Genetic Algorithm for Community Detection
//!   in Social Networks"
//! - Newman & Girvan (2004), "Finding and evaluating community structure
//!   in networks"

mod codec;
mod config;
mod fitness;
pub mod operators;
pub mod population;
mod runner;
mod types;

pub use codec::GenotypeCodec;
pub use config::LgaConfig;
pub use fitness::modularity;
pub use runner::{Evolution, EvolutionResult, LgaRunner, RunOutcome, RunPhase};
pub use types::{Evaluation, Genotype, Individual, Phenotype};
