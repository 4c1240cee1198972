//! Genotype, phenotype and individual types.
//!
//! An [`Individual`] owns its genotype and, once evaluated, an
//! [`Evaluation`] holding the decoded phenotype and its modularity. Any
//! mutable access to the genotype drops the evaluation, so derived data is
//! never stale.

use crate::graph::NodeId;

/// Locus-encoded chromosome: position `i` holds the gene index of a
/// neighbor of the node at gene index `i`.
pub type Genotype = Vec<usize>;

/// A partition of the graph's nodes into communities.
///
/// Communities are ordered by the smallest gene index they contain and
/// members by gene index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Phenotype {
    communities: Vec<Vec<NodeId>>,
}

impl Phenotype {
    /// Wraps a list of communities.
    ///
    /// No validation happens here; [`modularity`](super::modularity)
    /// rejects partitions that do not cover the graph exactly once.
    pub fn new(communities: Vec<Vec<NodeId>>) -> Self {
        Self { communities }
    }

    /// The communities.
    pub fn communities(&self) -> &[Vec<NodeId>] {
        &self.communities
    }

    /// Number of communities.
    pub fn len(&self) -> usize {
        self.communities.len()
    }

    /// Returns `true` if there are no communities.
    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }

    /// Size of each community.
    pub fn sizes(&self) -> Vec<usize> {
        self.communities.iter().map(Vec::len).collect()
    }

    /// Total number of nodes across communities.
    pub fn node_count(&self) -> usize {
        self.communities.iter().map(Vec::len).sum()
    }

    /// Consumes the phenotype, returning its communities.
    pub fn into_communities(self) -> Vec<Vec<NodeId>> {
        self.communities
    }
}

/// Derived data of an evaluated individual.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    /// Decoded partition.
    pub phenotype: Phenotype,
    /// Modularity of the partition.
    pub fitness: f64,
}

/// A candidate partition in the population.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    genotype: Genotype,
    evaluation: Option<Evaluation>,
}

impl Individual {
    /// Creates an unevaluated individual.
    pub fn new(genotype: Genotype) -> Self {
        Self {
            genotype,
            evaluation: None,
        }
    }

    /// The genotype.
    pub fn genotype(&self) -> &[usize] {
        &self.genotype
    }

    /// Mutable genotype access. Clears any evaluation.
    pub fn genotype_mut(&mut self) -> &mut Genotype {
        self.evaluation = None;
        &mut self.genotype
    }

    /// Consumes the individual, returning its genotype.
    pub fn into_genotype(self) -> Genotype {
        self.genotype
    }

    /// Returns `true` once phenotype and fitness are attached.
    pub fn is_evaluated(&self) -> bool {
        self.evaluation.is_some()
    }

    /// The evaluation, if any.
    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    /// Modularity, if evaluated.
    pub fn fitness(&self) -> Option<f64> {
        self.evaluation.as_ref().map(|e| e.fitness)
    }

    /// Decoded partition, if evaluated.
    pub fn phenotype(&self) -> Option<&Phenotype> {
        self.evaluation.as_ref().map(|e| &e.phenotype)
    }

    pub(crate) fn set_evaluation(&mut self, evaluation: Evaluation) {
        self.evaluation = Some(evaluation);
    }
}
