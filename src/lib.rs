//! Community detection with a locus-based genetic algorithm.
//!
//! Evolves a population of graph partitions and keeps the one with the
//! highest Newman modularity:
//!
//! - **Graph**: Simple undirected graph consumed read-only.
//! - **Disjoint-Set**: Union-find with rank and path compression, used to
//!   decode genotypes.
//! - **LGA**: Locus-based encoding, modularity fitness, truncation
//!   selection, uniform crossover, neighbor mutation and a multi-run driver.
//!
//! # Example
//!
//! ```
//! use u_locus::{Graph, lga::{LgaConfig, LgaRunner}};
//!
//! let g = Graph::from_edges([(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3)]);
//! let config = LgaConfig::default().with_generations(30).with_seed(7);
//! let result = LgaRunner::run(&g, &config).unwrap();
//! println!("Q = {:.4}", result.best_fitness);
//! ```
//!
//! # Architecture
//!
//! Graph parsing, attribute loading, persistence and plotting live with the
//! consumers. This crate only turns an in-memory [`Graph`] into an
//! [`lga::EvolutionResult`]; enable the `serde` feature to serialize results.

pub mod disjoint_set;
pub mod error;
pub mod graph;
pub mod lga;

pub use disjoint_set::DisjointSet;
pub use error::{Error, Result};
pub use graph::{Graph, NodeId};
