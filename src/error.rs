//! Error taxonomy for the locus-based GA.
//!
//! Every failure is terminal for the run that raised it. Callers decide
//! whether to skip the offending graph or abort a whole batch.

use crate::graph::NodeId;
use thiserror::Error;

/// Errors raised by the graph model, codec, fitness evaluator and driver.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The graph cannot be used (no nodes, or no edges when modularity is needed).
    #[error("invalid graph: {0}")]
    InvalidGraph(&'static str),

    /// A node without neighbors cannot be represented by locus encoding.
    #[error("node {0} has no neighbors and cannot be locus-encoded")]
    IsolatedNode(NodeId),

    /// Disjoint-set or gene index outside `[0, len)`.
    #[error("index {index} out of range for universe of size {len}")]
    IndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Size of the universe.
        len: usize,
    },

    /// Selection or crossover invoked on an empty population.
    #[error("population is empty")]
    EmptyPopulation,

    /// Genotype length does not match the number of loci.
    #[error("genotype has {found} genes, expected {expected}")]
    GenotypeLength {
        /// Number of loci in the codec.
        expected: usize,
        /// Length of the offending genotype.
        found: usize,
    },

    /// Phenotype does not partition the graph's nodes.
    #[error("invalid partition: {0}")]
    InvalidPartition(String),

    /// Rejected configuration parameter.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

/// Result alias for `u-locus`.
pub type Result<T> = std::result::Result<T, Error>;
